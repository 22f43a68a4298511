use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{Result, WeatherError},
    payload::{CurrentPayload, ForecastPayload},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const UNITS: &str = "metric";
const LANG: &str = "pt_br";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(WeatherError::missing_api_key)
    }

    /// GET `{base_url}/{endpoint}` with the shared parameters appended to
    /// `params`. `city` is set for name lookups so a 404 maps to `NotFound`.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        city: Option<&str>,
    ) -> Result<T> {
        let api_key = self.api_key()?;
        let url = format!("{}/{endpoint}", self.base_url);

        tracing::debug!(%url, ?params, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", api_key), ("units", UNITS), ("lang", LANG)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint, "OpenWeather request failed");
                WeatherError::Upstream(format!("request to {endpoint} failed: {e}"))
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(status_error(endpoint, status, city));
        }

        let body = res.text().await.map_err(|e| {
            WeatherError::Upstream(format!("failed to read {endpoint} response body: {e}"))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(
                error = %e,
                endpoint,
                body = %truncate_body(&body),
                "unexpected OpenWeather payload"
            );
            WeatherError::Upstream(format!("failed to parse {endpoint} response: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn fetch_current_by_city(&self, city: &str) -> Result<CurrentPayload> {
        self.get("weather", &[("q", city.to_string())], Some(city)).await
    }

    async fn fetch_current_by_coords(&self, lat: f64, lon: f64) -> Result<CurrentPayload> {
        self.get("weather", &[("lat", lat.to_string()), ("lon", lon.to_string())], None)
            .await
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastPayload> {
        self.get("forecast", &[("q", city.to_string())], Some(city)).await
    }
}

fn status_error(endpoint: &str, status: StatusCode, city: Option<&str>) -> WeatherError {
    match city {
        Some(city) if status == StatusCode::NOT_FOUND => {
            tracing::debug!(city, "OpenWeather has no match");
            WeatherError::NotFound(city.to_string())
        }
        _ => {
            let text = status.canonical_reason().unwrap_or(status.as_str());
            tracing::warn!(%status, endpoint, "OpenWeather returned an error status");
            WeatherError::Upstream(text.to_string())
        }
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
