//! Conversion from provider payloads into the stable internal shapes.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::{
    model::{CurrentWeather, ForecastDay},
    payload::{CurrentPayload, ForecastEntry, ForecastPayload, OwWeather},
};

/// Maximum number of days kept from the forecast feed.
pub const FORECAST_DAYS: usize = 5;

const NOON: u32 = 12;

pub fn to_current_weather(payload: &CurrentPayload) -> CurrentWeather {
    let (description, icon) = condition(&payload.weather);

    CurrentWeather {
        city: payload.name.clone(),
        country: payload.sys.country.clone(),
        temperature: round_temp(payload.main.temp),
        feels_like: round_temp(payload.main.feels_like),
        humidity: payload.main.humidity,
        pressure: payload.main.pressure,
        wind_speed: payload.wind.speed,
        description,
        icon,
        timestamp: unix_to_utc(payload.dt),
    }
}

/// Reduce the 3-hourly feed to one sample per UTC calendar day.
///
/// Each day keeps the sample closest to noon. A later sample only replaces the
/// current pick when strictly closer, so the first one seen wins a tie.
pub fn to_forecast_days(payload: &ForecastPayload) -> Vec<ForecastDay> {
    let mut days: Vec<(NaiveDate, &ForecastEntry, u32)> = Vec::new();

    for entry in &payload.list {
        let at = unix_to_utc(entry.dt);
        let date = at.date_naive();
        let distance = at.hour().abs_diff(NOON);

        match days.iter_mut().find(|(d, _, _)| *d == date) {
            Some(best) if distance < best.2 => *best = (date, entry, distance),
            Some(_) => {}
            None => days.push((date, entry, distance)),
        }
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, entry, _)| to_forecast_day(date, entry))
        .collect()
}

fn to_forecast_day(date: NaiveDate, entry: &ForecastEntry) -> ForecastDay {
    let (description, icon) = condition(&entry.weather);

    ForecastDay {
        date,
        sampled_at: unix_to_utc(entry.dt),
        temperature: round_temp(entry.main.temp),
        temp_min: round_temp(entry.main.temp_min),
        temp_max: round_temp(entry.main.temp_max),
        description,
        icon,
        humidity: entry.main.humidity,
        wind_speed: entry.wind.speed,
    }
}

fn condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_default()
}

/// Nearest whole degree, halves away from zero.
fn round_temp(value: f64) -> i64 {
    value.round() as i64
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}
