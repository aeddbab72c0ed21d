//! Open-Meteo archive: today's hourly observations, reduced to the min/max
//! recorded so far.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Location, ObservedRange};
use crate::provider::{lenient_f64_vec, truncate_body};

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    temperature_2m: Vec<Option<f64>>,
}

/// Fetch today's hourly observations and reduce them to the observed range.
///
/// `now` is the caller's wall clock; it picks both the requested calendar
/// date and the cutoff deciding which samples count as observed.
pub(crate) async fn observed_today(
    http: &Client,
    base_url: &str,
    location: &Location,
    now: NaiveDateTime,
) -> Result<ObservedRange> {
    let today = now.date().format("%Y-%m-%d").to_string();

    let res = http
        .get(base_url)
        .query(&[
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("timezone", location.timezone_or_auto().to_string()),
            ("start_date", today.clone()),
            ("end_date", today),
            ("hourly", "temperature_2m".to_string()),
        ])
        .send()
        .await
        .context("Failed to send request to Open-Meteo archive")?;

    let status = res.status();
    let body = res
        .text()
        .await
        .context("Failed to read Open-Meteo archive response body")?;

    if !status.is_success() {
        return Err(anyhow!(
            "Open-Meteo archive request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    let parsed: ArchiveResponse =
        serde_json::from_str(&body).context("Failed to parse Open-Meteo archive JSON")?;

    let range = match parsed.hourly {
        Some(hourly) => observed_range(&hourly.time, &hourly.temperature_2m, now),
        None => ObservedRange::default(),
    };

    Ok(range)
}

/// Min/max over samples timestamped at or before `now`. Samples with a
/// missing value or an unparsable timestamp are skipped.
fn observed_range(times: &[String], temps: &[Option<f64>], now: NaiveDateTime) -> ObservedRange {
    let mut range = ObservedRange::default();

    for (time, temp) in times.iter().zip(temps) {
        let Some(temp) = *temp else { continue };
        let Some(stamp) = parse_hourly_stamp(time) else {
            continue;
        };
        if stamp > now {
            continue;
        }
        range.min_c = Some(range.min_c.map_or(temp, |min| min.min(temp)));
        range.max_c = Some(range.max_c.map_or(temp, |max| max.max(temp)));
    }

    range
}

// The archive emits minute resolution; accept a seconds suffix too.
fn parse_hourly_stamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
