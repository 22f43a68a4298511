use thiserror::Error;

use crate::service::LookupKind;

/// Failures a weather lookup can end with.
///
/// None of these are retried by the core and none of them leave a cache entry
/// behind, so repeating the same lookup always reaches the provider again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The provider API key is missing. Raised before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider has no data for the requested city name.
    #[error("city not found: {0}")]
    NotFound(String),

    /// Any other provider failure: non-success status, transport error or an
    /// undecodable body. Carries the provider's status text for diagnostics.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl WeatherError {
    pub(crate) fn missing_api_key() -> Self {
        WeatherError::Configuration(format!(
            "{} is not set.\n\
             Hint: export it or run `weather configure` and enter your API key.",
            crate::config::API_KEY_ENV
        ))
    }

    /// Localized (pt-BR) message for end users of a `kind` lookup.
    pub fn user_message(&self, kind: LookupKind) -> String {
        match self {
            WeatherError::Configuration(_) => {
                format!("{} não está configurada", crate::config::API_KEY_ENV)
            }
            WeatherError::NotFound(_) => "Cidade não encontrada".to_string(),
            WeatherError::Upstream(status) => match kind {
                LookupKind::ForecastByCity => format!("Erro ao buscar previsão: {status}"),
                LookupKind::CurrentByCity | LookupKind::CurrentByCoords => {
                    format!("Erro ao buscar dados do tempo: {status}")
                }
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
