use std::sync::Arc;

use crate::{
    cache::CacheStore,
    error::{Result, WeatherError},
    model::{CurrentWeather, ForecastDay},
    normalize::{to_current_weather, to_forecast_days},
    provider::WeatherProvider,
};

/// Values kept in the lookup cache.
#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    Current(CurrentWeather),
    Forecast(Vec<ForecastDay>),
}

/// Which provider operation a lookup maps to; also the cache key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    CurrentByCity,
    CurrentByCoords,
    ForecastByCity,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::CurrentByCity => "current_city",
            LookupKind::CurrentByCoords => "current_coords",
            LookupKind::ForecastByCity => "forecast_city",
        }
    }

    pub fn city_key(&self, city: &str) -> String {
        format!("{}_{}", self.as_str(), city.trim().to_lowercase())
    }

    /// Raw float rendering; no rounding or snapping of nearby points.
    pub fn coords_key(&self, lat: f64, lon: f64) -> String {
        format!("{}_{lat}_{lon}", self.as_str())
    }
}

/// Cached front for a [`WeatherProvider`].
///
/// Lookups check the cache first and only reach the provider on a miss.
/// Failures propagate unchanged and are never cached. Must be used from
/// within a Tokio runtime.
#[derive(Debug)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<CacheStore<Cached>>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: Arc<CacheStore<Cached>>) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &CacheStore<Cached> {
        &self.cache
    }

    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWeather> {
        let key = LookupKind::CurrentByCity.city_key(city);
        if let Some(Cached::Current(weather)) = self.cached(&key) {
            return Ok(weather);
        }

        self.provider.ensure_configured()?;
        let provider = self.provider.clone();
        let city = city.trim().to_string();
        self.fill(key, async move {
            let payload = provider.fetch_current_by_city(&city).await?;
            let weather = to_current_weather(&payload);
            Ok::<_, WeatherError>((weather.clone(), Cached::Current(weather)))
        })
        .await
    }

    pub async fn current_by_coords(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        let key = LookupKind::CurrentByCoords.coords_key(lat, lon);
        if let Some(Cached::Current(weather)) = self.cached(&key) {
            return Ok(weather);
        }

        self.provider.ensure_configured()?;
        let provider = self.provider.clone();
        self.fill(key, async move {
            let payload = provider.fetch_current_by_coords(lat, lon).await?;
            let weather = to_current_weather(&payload);
            Ok::<_, WeatherError>((weather.clone(), Cached::Current(weather)))
        })
        .await
    }

    pub async fn forecast(&self, city: &str) -> Result<Vec<ForecastDay>> {
        let key = LookupKind::ForecastByCity.city_key(city);
        if let Some(Cached::Forecast(days)) = self.cached(&key) {
            return Ok(days);
        }

        self.provider.ensure_configured()?;
        let provider = self.provider.clone();
        let city = city.trim().to_string();
        self.fill(key, async move {
            let payload = provider.fetch_forecast(&city).await?;
            let days = to_forecast_days(&payload);
            Ok::<_, WeatherError>((days.clone(), Cached::Forecast(days)))
        })
        .await
    }

    /// Run a cache miss to completion on its own task.
    ///
    /// The fetch and the cache write survive the caller dropping this future,
    /// so an abandoned lookup still fills the cache for the next caller.
    async fn fill<T, F>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<(T, Cached)>> + Send + 'static,
    {
        let cache = self.cache.clone();
        let task = tokio::spawn(async move {
            let (value, cached) = fetch.await?;
            cache.set(key, cached);
            Ok::<_, WeatherError>(value)
        });

        task.await.map_err(|e| {
            tracing::warn!(error = %e, "weather lookup task failed");
            WeatherError::Upstream(format!("lookup task failed: {e}"))
        })?
    }

    fn cached(&self, key: &str) -> Option<Cached> {
        let hit = self.cache.get(key);
        tracing::debug!(key, hit = hit.is_some(), "weather cache lookup");
        hit
    }
}
