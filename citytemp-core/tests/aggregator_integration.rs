//! Integration tests for the weather aggregator against a mock HTTP server.
//!
//! Hourly timestamps in the mocked archive bodies use years far in the past
//! (always observed) or far in the future (never observed), since the
//! aggregator filters against the real wall clock.

use citytemp_core::{Endpoints, WeatherAggregator, WeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn aggregator_for(server: &MockServer) -> WeatherAggregator {
    WeatherAggregator::with_endpoints(Endpoints {
        geocoding: format!("{}/v1/search", server.uri()),
        forecast: format!("{}/v1/forecast", server.uri()),
        archive: format!("{}/v1/archive", server.uri()),
    })
}

fn geocoding_body() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "latitude": -33.45,
            "longitude": -70.66,
            "name": "Santiago",
            "admin1": "Región Metropolitana",
            "country": "Chile",
            "timezone": "America/Santiago"
        }]
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "current": {"temperature_2m": 15.3},
        "daily": {
            "temperature_2m_min": [7.9],
            "temperature_2m_max": [19.1]
        }
    })
}

fn archive_body(times: &[&str], temps: &[f64]) -> serde_json::Value {
    serde_json::json!({
        "hourly": {
            "time": times,
            "temperature_2m": temps
        }
    })
}

async fn mount_geocoding(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_archive(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_a_full_reading() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Santiago de Chile"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body()))
        .mount(&server)
        .await;

    // Both follow-up requests must carry the geocoded timezone.
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "America/Santiago"))
        .and(query_param("forecast_days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("timezone", "America/Santiago"))
        .and(query_param("hourly", "temperature_2m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(
            &["2000-01-01T00:00", "2000-01-01T06:00"],
            &[8.0, 6.5],
        )))
        .mount(&server)
        .await;

    let reading = aggregator_for(&server)
        .resolve("Santiago de Chile")
        .await
        .expect("reading");

    assert_eq!(reading.label, "Santiago, Región Metropolitana, Chile");
    assert_eq!(reading.temp.as_deref(), Some("15.3"));
    assert_eq!(reading.temp_min_observed.as_deref(), Some("6.5"));
    assert_eq!(reading.temp_max_observed.as_deref(), Some("8.0"));
    assert_eq!(reading.temp_min_forecast.as_deref(), Some("7.9"));
    assert_eq!(reading.temp_max_forecast.as_deref(), Some("19.1"));
}

#[tokio::test]
async fn zero_matches_yield_absent_without_further_calls() {
    let server = MockServer::start().await;

    mount_geocoding(&server, serde_json::json!({"results": []})).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(&[], &[])))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);

    let err = aggregator.try_resolve("Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound(_)));

    assert_eq!(aggregator.resolve("Atlantis").await, None);
}

#[tokio::test]
async fn missing_results_field_counts_as_no_match() {
    let server = MockServer::start().await;

    mount_geocoding(&server, serde_json::json!({"generationtime_ms": 0.3})).await;

    assert_eq!(aggregator_for(&server).resolve("Atlantis").await, None);
}

#[tokio::test]
async fn falls_back_to_mean_when_current_is_missing() {
    let server = MockServer::start().await;

    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(
        &server,
        serde_json::json!({
            "daily": {
                "temperature_2m_min": [7.9],
                "temperature_2m_max": [19.1]
            }
        }),
    )
    .await;
    mount_archive(
        &server,
        archive_body(&["2000-01-01T00:00", "2000-01-01T06:00"], &[10.0, 20.0]),
    )
    .await;

    let reading = aggregator_for(&server)
        .resolve("Santiago de Chile")
        .await
        .expect("reading");

    assert_eq!(reading.temp.as_deref(), Some("15.0"));
    assert_eq!(reading.temp_min_observed.as_deref(), Some("10.0"));
    assert_eq!(reading.temp_max_observed.as_deref(), Some("20.0"));
}

#[tokio::test]
async fn temp_stays_absent_without_current_or_observed_range() {
    let server = MockServer::start().await;

    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(
        &server,
        serde_json::json!({
            "daily": {
                "temperature_2m_min": [7.9],
                "temperature_2m_max": [19.1]
            }
        }),
    )
    .await;
    // Samples exist, but none have been recorded yet.
    mount_archive(
        &server,
        archive_body(&["3000-01-01T00:00", "3000-01-01T06:00"], &[10.0, 20.0]),
    )
    .await;

    let reading = aggregator_for(&server)
        .resolve("Santiago de Chile")
        .await
        .expect("reading");

    assert_eq!(reading.temp, None);
    assert_eq!(reading.temp_min_observed, None);
    assert_eq!(reading.temp_max_observed, None);
    assert_eq!(reading.temp_min_forecast.as_deref(), Some("7.9"));
    assert_eq!(reading.temp_max_forecast.as_deref(), Some("19.1"));
}

#[tokio::test]
async fn future_samples_do_not_contribute_to_the_observed_range() {
    let server = MockServer::start().await;

    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(&server, forecast_body()).await;
    mount_archive(
        &server,
        archive_body(
            &["2000-01-01T00:00", "2000-01-01T06:00", "3000-01-01T12:00"],
            &[8.0, 6.5, 99.9],
        ),
    )
    .await;

    let reading = aggregator_for(&server)
        .resolve("Santiago de Chile")
        .await
        .expect("reading");

    assert_eq!(reading.temp_min_observed.as_deref(), Some("6.5"));
    assert_eq!(reading.temp_max_observed.as_deref(), Some("8.0"));
}

#[tokio::test]
async fn forecast_failure_fails_the_whole_aggregation() {
    let server = MockServer::start().await;

    mount_geocoding(&server, geocoding_body()).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    // The archive succeeding must not produce a partial reading.
    mount_archive(
        &server,
        archive_body(&["2000-01-01T00:00"], &[8.0]),
    )
    .await;

    let aggregator = aggregator_for(&server);

    let err = aggregator.try_resolve("Santiago de Chile").await.unwrap_err();
    assert!(matches!(err, WeatherError::Upstream(_)));

    assert_eq!(aggregator.resolve("Santiago de Chile").await, None);
}

#[tokio::test]
async fn malformed_archive_body_fails_the_whole_aggregation() {
    let server = MockServer::start().await;

    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(&server, forecast_body()).await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    assert_eq!(aggregator_for(&server).resolve("Santiago de Chile").await, None);
}

#[tokio::test]
async fn geocoding_failure_yields_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    assert_eq!(aggregator_for(&server).resolve("Santiago de Chile").await, None);
}

#[tokio::test]
async fn missing_timezone_falls_back_to_auto() {
    let server = MockServer::start().await;

    mount_geocoding(
        &server,
        serde_json::json!({
            "results": [{
                "latitude": -33.45,
                "longitude": -70.66,
                "name": "Santiago",
                "country": "Chile"
            }]
        }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(&[], &[])))
        .mount(&server)
        .await;

    let reading = aggregator_for(&server)
        .resolve("Santiago")
        .await
        .expect("reading");

    assert_eq!(reading.label, "Santiago, Chile");
}

#[tokio::test]
async fn identical_inputs_yield_identical_readings() {
    let server = MockServer::start().await;

    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(&server, forecast_body()).await;
    mount_archive(
        &server,
        archive_body(&["2000-01-01T00:00", "2000-01-01T06:00"], &[8.0, 6.5]),
    )
    .await;

    let aggregator = aggregator_for(&server);

    let first = aggregator.resolve("Santiago de Chile").await.expect("reading");
    let second = aggregator.resolve("Santiago de Chile").await.expect("reading");

    assert_eq!(first, second);
}
