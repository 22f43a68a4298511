use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@4x.png";

/// Current conditions for one location, temperatures rounded to whole °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    pub timestamp: DateTime<Utc>,
}

/// One representative 3-hour sample for a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub sampled_at: DateTime<Utc>,
    pub temperature: i64,
    /// Min/max stated by the chosen sample, not by the whole day.
    pub temp_min: i64,
    pub temp_max: i64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Provider-hosted image URL for an icon code such as `01d`.
pub fn icon_url(icon: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon)
}
