//! Open-Meteo forecast: current temperature plus today's forecast min/max.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{ForecastReading, Location};
use crate::provider::{lenient_f64, lenient_f64_vec, truncate_body};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentBlock>,
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    #[serde(default, deserialize_with = "lenient_f64")]
    temperature_2m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    temperature_2m_max: Vec<Option<f64>>,
}

/// Fetch today's forecast for a location.
pub(crate) async fn today(
    http: &Client,
    base_url: &str,
    location: &Location,
) -> Result<ForecastReading> {
    let res = http
        .get(base_url)
        .query(&[
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("timezone", location.timezone_or_auto().to_string()),
            ("current", "temperature_2m".to_string()),
            ("daily", "temperature_2m_min,temperature_2m_max".to_string()),
            ("forecast_days", "1".to_string()),
        ])
        .send()
        .await
        .context("Failed to send request to Open-Meteo forecast")?;

    let status = res.status();
    let body = res
        .text()
        .await
        .context("Failed to read Open-Meteo forecast response body")?;

    if !status.is_success() {
        return Err(anyhow!(
            "Open-Meteo forecast request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    let parsed: ForecastResponse =
        serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

    Ok(reading_from_response(parsed))
}

// With forecast_days=1 the daily arrays hold exactly one element: today.
fn reading_from_response(res: ForecastResponse) -> ForecastReading {
    let current_c = res.current.and_then(|c| c.temperature_2m);

    let (min_c, max_c) = match res.daily {
        Some(daily) => (
            daily.temperature_2m_min.first().copied().flatten(),
            daily.temperature_2m_max.first().copied().flatten(),
        ),
        None => (None, None),
    };

    ForecastReading {
        current_c,
        min_c,
        max_c,
    }
}
