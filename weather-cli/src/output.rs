use chrono::{Datelike, NaiveDate, Weekday};
use weather_core::{CurrentWeather, ForecastDay, icon_url};

pub fn print_current(weather: &CurrentWeather, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(weather)?);
    } else {
        println!("{}", render_current(weather));
    }
    Ok(())
}

pub fn print_forecast(days: &[ForecastDay], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(days)?);
    } else {
        println!("{}", render_forecast(days));
    }
    Ok(())
}

fn render_current(w: &CurrentWeather) -> String {
    format!(
        "{city}, {country}\n\
         {temp}°C ({description}), sensação {feels}°C\n\
         Umidade: {humidity}%\n\
         Vento: {wind} m/s\n\
         Pressão: {pressure} hPa\n\
         Atualizado: {updated}\n\
         Ícone: {icon}",
        city = w.city,
        country = w.country,
        temp = w.temperature,
        description = w.description,
        feels = w.feels_like,
        humidity = w.humidity,
        wind = w.wind_speed,
        pressure = w.pressure,
        updated = w.timestamp.format("%d/%m/%Y %H:%M UTC"),
        icon = icon_url(&w.icon),
    )
}

fn render_forecast(days: &[ForecastDay]) -> String {
    let mut out = String::from("Previsão para os próximos dias");
    for day in days {
        out.push_str(&format!(
            "\n{date}  {temp:>3}°C  ({min}° / {max}°)  {description}",
            date = short_date(day.date),
            temp = day.temperature,
            min = day.temp_min,
            max = day.temp_max,
            description = day.description,
        ));
    }
    out
}

/// e.g. "sex., 01/03"
fn short_date(date: NaiveDate) -> String {
    let weekday = match date.weekday() {
        Weekday::Mon => "seg.",
        Weekday::Tue => "ter.",
        Weekday::Wed => "qua.",
        Weekday::Thu => "qui.",
        Weekday::Fri => "sex.",
        Weekday::Sat => "sáb.",
        Weekday::Sun => "dom.",
    };
    format!("{weekday}, {}", date.format("%d/%m"))
}
