use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    CacheStore, Config, LookupKind, WeatherError, WeatherService, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Print the normalized data as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Current conditions for a city.
    Current {
        /// City name, e.g. "São Paulo".
        city: String,
    },

    /// Current conditions at a coordinate pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Five-day forecast for a city.
    Forecast {
        /// City name, e.g. "Rio de Janeiro".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let json = self.json;

        match self.command {
            Command::Configure => configure(),
            Command::Current { city } => {
                let city = require_city(&city)?;
                let weather = build_service()?
                    .current_by_city(city)
                    .await
                    .map_err(|e| user_error(e, LookupKind::CurrentByCity))?;
                output::print_current(&weather, json)
            }
            Command::Coords { lat, lon } => {
                let weather = build_service()?
                    .current_by_coords(lat, lon)
                    .await
                    .map_err(|e| user_error(e, LookupKind::CurrentByCoords))?;
                output::print_current(&weather, json)
            }
            Command::Forecast { city } => {
                let city = require_city(&city)?;
                let days = build_service()?
                    .forecast(city)
                    .await
                    .map_err(|e| user_error(e, LookupKind::ForecastByCity))?;
                output::print_forecast(&days, json)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Each run starts with an empty cache and performs one lookup, so the cache
/// only pays off for long-lived callers that keep a `WeatherService` around.
fn build_service() -> anyhow::Result<WeatherService> {
    let config = Config::from_env()?;
    let provider = Arc::from(provider_from_config(&config));
    Ok(WeatherService::new(provider, Arc::new(CacheStore::new())))
}

fn require_city(city: &str) -> anyhow::Result<&str> {
    let city = city.trim();
    if city.is_empty() {
        bail!("Digite o nome de uma cidade");
    }
    Ok(city)
}

fn user_error(err: WeatherError, kind: LookupKind) -> anyhow::Error {
    tracing::debug!(error = %err, ?kind, "lookup failed");
    anyhow!(err.user_message(kind))
}
