//! Open-Meteo geocoding: free-text city name to coordinates and a display label.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use crate::model::Location;
use crate::provider::{lenient_f64, truncate_body};

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingMatch>,
}

#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    #[serde(default, deserialize_with = "lenient_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    longitude: Option<f64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    admin1: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

/// Look up a city name, returning the first match if any.
///
/// `count=1` asks the service for a single candidate up front. A candidate
/// without usable coordinates counts as no match.
pub(crate) async fn search(
    http: &Client,
    base_url: &str,
    city: &str,
    language: &str,
) -> Result<Option<Location>> {
    let res = http
        .get(base_url)
        .query(&[
            ("name", city),
            ("count", "1"),
            ("language", language),
            ("format", "json"),
        ])
        .send()
        .await
        .context("Failed to send request to Open-Meteo geocoding")?;

    let status = res.status();
    let body = res
        .text()
        .await
        .context("Failed to read Open-Meteo geocoding response body")?;

    if !status.is_success() {
        return Err(anyhow!(
            "Open-Meteo geocoding request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    let parsed: GeocodingResponse =
        serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

    Ok(parsed.results.into_iter().next().and_then(location_from_match))
}

fn location_from_match(m: GeocodingMatch) -> Option<Location> {
    let latitude = m.latitude?;
    let longitude = m.longitude?;

    // Non-empty parts of (name, admin1, country), in that order.
    let label = [m.name, m.admin1, m.country]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    Some(Location {
        latitude,
        longitude,
        label,
        timezone: m.timezone,
    })
}
