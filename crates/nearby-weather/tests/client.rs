//! Integration tests for `WeatherClient` using wiremock HTTP mocks.

use chrono::Utc;
use nearby_core::Coordinate;
use nearby_location::{DebugEventLog, LocationSource, ResolvedLocation};
use nearby_weather::{WeatherClient, WeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> WeatherClient {
    WeatherClient::with_base_url("test-key", 10, base_url)
        .expect("client construction should not fail")
}

fn resolved(latitude: f64, longitude: f64) -> ResolvedLocation {
    ResolvedLocation {
        coordinate: Coordinate::new(latitude, longitude),
        accuracy: Some(20.0),
        address: Some("New York, NY, US".to_string()),
        timestamp: Utc::now(),
        source: LocationSource::Gps,
    }
}

#[tokio::test]
async fn current_weather_parses_name_and_description() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .and(query_param("lat", "40.7128"))
        .and(query_param("lon", "-74.006"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lat": 40.71, "lon": -74.0 },
            "name": "New York",
            "weather": [{ "description": "clear sky" }]
        })))
        .mount(&server)
        .await;

    let log = DebugEventLog::new(true);
    let client = test_client(&server.uri());
    let report = client
        .current_weather(&resolved(40.7128, -74.006), &log)
        .await
        .expect("should parse weather");

    assert_eq!(report.name, "New York");
    assert_eq!(report.description, "clear sky");
    assert!(!report.coordinates_mismatch, "a few hundred meters is fine");
    assert!(report.coordinate_distance_m.unwrap() < 10_000.0);

    let rendered = log.report();
    assert!(rendered.contains("weather_request"));
    assert!(rendered.contains("weather_response"));
    assert!(rendered.contains("New York - clear sky"));
}

#[tokio::test]
async fn far_away_response_coordinates_flag_a_mismatch() {
    let server = MockServer::start().await;

    // Requested New York; the service answers for Philadelphia (~130 km).
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lat": 39.9526, "lon": -75.1652 },
            "name": "Philadelphia",
            "weather": [{ "description": "light rain" }]
        })))
        .mount(&server)
        .await;

    let log = DebugEventLog::new(true);
    let client = test_client(&server.uri());
    let report = client
        .current_weather(&resolved(40.7128, -74.006), &log)
        .await
        .unwrap();

    assert!(report.coordinates_mismatch);
    assert!(report.coordinate_distance_m.unwrap() > 10_000.0);
    assert!(
        log.report().contains("coordinate mismatch"),
        "mismatch must be flagged in the debug output"
    );
}

#[tokio::test]
async fn missing_coord_field_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Somewhere",
            "weather": []
        })))
        .mount(&server)
        .await;

    let log = DebugEventLog::new(true);
    let client = test_client(&server.uri());
    let report = client
        .current_weather(&resolved(40.7128, -74.006), &log)
        .await
        .unwrap();

    assert_eq!(report.name, "Somewhere");
    assert_eq!(report.description, "No description");
    assert!(report.response_coordinate.is_none());
    assert!(report.coordinate_distance_m.is_none());
    assert!(!report.coordinates_mismatch);
}

#[tokio::test]
async fn http_error_is_surfaced_and_logged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let log = DebugEventLog::new(true);
    let client = test_client(&server.uri());
    let result = client
        .current_weather(&resolved(40.7128, -74.006), &log)
        .await;

    assert!(matches!(result, Err(WeatherError::Http(_))));
    assert!(log.report().contains("weather_error"));
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let log = DebugEventLog::new(true);
    let client = test_client(&server.uri());
    let result = client
        .current_weather(&resolved(40.7128, -74.006), &log)
        .await;

    assert!(matches!(result, Err(WeatherError::Deserialize { .. })));
}
