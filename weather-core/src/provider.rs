use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::Result,
    payload::{CurrentPayload, ForecastPayload},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Access to the upstream weather API.
///
/// Every fetch checks the credential before touching the network and issues
/// exactly one request otherwise.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fails with `Configuration` when no credential is available.
    fn ensure_configured(&self) -> Result<()>;

    async fn fetch_current_by_city(&self, city: &str) -> Result<CurrentPayload>;

    /// Coordinates always resolve to the nearest station, so this never
    /// reports `NotFound`.
    async fn fetch_current_by_coords(&self, lat: f64, lon: f64) -> Result<CurrentPayload>;

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastPayload>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing key is not an error here; it surfaces on the first lookup.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let mut provider = OpenWeatherProvider::new(config.api_key().map(str::to_owned));
    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url);
    }
    Box::new(provider)
}
