//! Open-Meteo endpoint clients.
//!
//! One module per endpoint, each with its own response structs and fetch
//! function. The three endpoints live on separate hosts in production, so
//! their base URLs travel together in [`Endpoints`] and can be pointed at a
//! local server in tests.

use serde::{Deserialize, Deserializer};

pub mod archive;
pub mod forecast;
pub mod geocoding;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Base URLs for the three Open-Meteo endpoints.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub archive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: GEOCODING_URL.to_string(),
            forecast: FORECAST_URL.to_string(),
            archive: ARCHIVE_URL.to_string(),
        }
    }
}

/// Accept any JSON value in a numeric slot, yielding `Some` only for numbers.
/// Upstream shape deviations (strings, nulls, objects) read as absent instead
/// of failing the whole parse.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Element-wise [`lenient_f64`] for the parallel sample arrays.
pub(crate) fn lenient_f64_vec<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|value| value.as_f64()).collect())
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
