//! Core library for cached weather lookups.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider client and its payload shapes
//! - Normalization into stable domain models
//! - A short-TTL cache in front of the provider
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod provider;
pub mod service;

pub use cache::CacheStore;
pub use config::Config;
pub use error::{Result, WeatherError};
pub use model::{CurrentWeather, ForecastDay, icon_url};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use service::{Cached, LookupKind, WeatherService};
