//! OpenWeather client and lookup service against a mock provider.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use weather_core::{CacheStore, OpenWeatherProvider, WeatherError, WeatherProvider, WeatherService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn sao_paulo_body() -> Value {
    json!({
        "name": "São Paulo",
        "sys": { "country": "BR" },
        "main": { "temp": 25.6, "feels_like": 26.1, "humidity": 60, "pressure": 1015 },
        "wind": { "speed": 3.2 },
        "weather": [{ "description": "céu limpo", "icon": "01d" }],
        "dt": 1_700_000_000
    })
}

fn forecast_body() -> Value {
    // 2024-03-01T00:00:00Z, then every 3 hours for 7 days.
    let start = 1_709_251_200_i64;
    let list: Vec<Value> = (0..56)
        .map(|i| {
            json!({
                "dt": start + i * 3 * 3600,
                "main": {
                    "temp": 20.0 + (i % 8) as f64,
                    "feels_like": 20.0,
                    "temp_min": 18.4,
                    "temp_max": 27.5,
                    "humidity": 65,
                    "pressure": 1012
                },
                "weather": [{ "description": "nuvens dispersas", "icon": "03d" }],
                "wind": { "speed": 2.5 }
            })
        })
        .collect();

    json!({ "cod": "200", "cnt": list.len(), "list": list })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(Some(API_KEY.to_string())).with_base_url(&server.uri())
}

fn service(server: &MockServer) -> WeatherService {
    WeatherService::new(Arc::new(provider(server)), Arc::new(CacheStore::new()))
}

#[tokio::test]
async fn current_by_city_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "pt_br"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sao_paulo_body()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = provider(&server).fetch_current_by_city("São Paulo").await.unwrap();
    assert_eq!(payload.name, "São Paulo");
    assert_eq!(payload.sys.country, "BR");
}

#[tokio::test]
async fn current_by_coords_sends_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "-23.5505"))
        .and(query_param("lon", "-46.6333"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(sao_paulo_body()))
        .expect(1)
        .mount(&server)
        .await;

    let weather = service(&server).current_by_coords(-23.5505, -46.6333).await.unwrap();
    assert_eq!(weather.city, "São Paulo");
}

#[tokio::test]
async fn second_lookup_within_ttl_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sao_paulo_body()))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let first = svc.current_by_city("São Paulo").await.unwrap();
    let second = svc.current_by_city("São Paulo").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.temperature, 26);
    assert_eq!(first.feels_like, 26);
    assert_eq!(first.humidity, 60);
    assert_eq!(first.pressure, 1015);
    assert_eq!(first.wind_speed, 3.2);
    assert_eq!(first.description, "céu limpo");
    assert_eq!(first.icon, "01d");
    assert_eq!(first.timestamp.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn unknown_city_is_not_found_and_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "CidadeInvalidaXYZ"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let svc = service(&server);
    for _ in 0..2 {
        let err = svc.current_by_city("CidadeInvalidaXYZ").await.unwrap_err();
        assert_eq!(err, WeatherError::NotFound("CidadeInvalidaXYZ".into()));
    }
    assert!(svc.cache().is_empty());
}

#[tokio::test]
async fn forecast_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service(&server).forecast("Nowhere").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound(_)));
}

#[tokio::test]
async fn coords_404_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service(&server).current_by_coords(0.0, 0.0).await.unwrap_err();
    assert_eq!(err, WeatherError::Upstream("Not Found".into()));
}

#[tokio::test]
async fn server_error_carries_status_text_and_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let svc = service(&server);
    for _ in 0..2 {
        let err = svc.current_by_city("Recife").await.unwrap_err();
        assert_eq!(err, WeatherError::Upstream("Service Unavailable".into()));
    }
}

#[tokio::test]
async fn malformed_body_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = service(&server).current_by_city("Recife").await.unwrap_err();
    assert!(matches!(err, WeatherError::Upstream(_)));
}

#[tokio::test]
async fn missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sao_paulo_body()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(None).with_base_url(&server.uri());
    let svc = WeatherService::new(Arc::new(provider), Arc::new(CacheStore::new()));

    assert!(matches!(
        svc.current_by_city("Recife").await,
        Err(WeatherError::Configuration(_))
    ));
    assert!(matches!(
        svc.current_by_coords(1.0, 2.0).await,
        Err(WeatherError::Configuration(_))
    ));
    assert!(matches!(svc.forecast("Recife").await, Err(WeatherError::Configuration(_))));
}

#[tokio::test]
async fn forecast_is_reduced_to_five_noon_samples() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Rio de Janeiro"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let days = svc.forecast(" Rio de Janeiro ").await.unwrap();

    assert_eq!(days.len(), 5);
    let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
    assert_eq!(dates, ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05"]);
    for day in &days {
        assert_eq!(day.sampled_at.format("%H").to_string(), "12");
        // 12:00 is the fifth sample of each day: 20 + 4.
        assert_eq!(day.temperature, 24);
        assert_eq!(day.temp_min, 18);
        assert_eq!(day.temp_max, 28);
    }

    svc.forecast("rio de janeiro").await.unwrap();
}

#[tokio::test]
async fn abandoned_lookup_still_fills_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sao_paulo_body())
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server);
    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), svc.current_by_city("Recife")).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(svc.cache().len(), 1);

    let weather = svc.current_by_city("recife").await.unwrap();
    assert_eq!(weather.city, "São Paulo");
}
