//! The weather aggregator: city name in, merged temperature reading out.

use chrono::Local;
use reqwest::Client;

use crate::config::DEFAULT_LANGUAGE;
use crate::error::WeatherError;
use crate::model::{ForecastReading, ObservedRange, WeatherReading, format_temp};
use crate::provider::{self, Endpoints};

/// Aggregates the geocoding, forecast and archive endpoints into a single
/// best-effort reading.
///
/// Stateless: every call is one request/response cycle with no retry, no
/// caching, and no coalescing; concurrent calls are fully independent.
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    http: Client,
    endpoints: Endpoints,
    language: String,
}

impl WeatherAggregator {
    pub fn new() -> Self {
        Self::with_endpoints(Endpoints::default())
    }

    /// Aggregator over explicit base URLs; tests point these at a mock server.
    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Language for geocoded place labels.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Best-effort reading for a city: `None` when the city is unknown or any
    /// upstream call fails. Never returns an error; failures are logged as
    /// diagnostics and flattened, which is all a rendering caller can act on.
    pub async fn resolve(&self, city: &str) -> Option<WeatherReading> {
        match self.try_resolve(city).await {
            Ok(reading) => Some(reading),
            Err(WeatherError::NotFound(query)) => {
                tracing::debug!(%query, "geocoding returned no candidates");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "weather aggregation failed");
                None
            }
        }
    }

    /// Like [`WeatherAggregator::resolve`], but keeps the failure kind.
    pub async fn try_resolve(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        let location = provider::geocoding::search(
            &self.http,
            &self.endpoints.geocoding,
            city,
            &self.language,
        )
        .await?
        .ok_or_else(|| WeatherError::NotFound(city.to_string()))?;

        // Fork-join: both fetches run concurrently and both must succeed.
        // Either failure fails the whole aggregation; no partial readings.
        let now = Local::now().naive_local();
        let (forecast, observed) = tokio::try_join!(
            provider::forecast::today(&self.http, &self.endpoints.forecast, &location),
            provider::archive::observed_today(&self.http, &self.endpoints.archive, &location, now),
        )?;

        Ok(merge_reading(location.label, forecast, observed))
    }
}

impl Default for WeatherAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge the two fetches into the final reading. The headline temperature is
/// the forecast's current value, else the mean of today's observed extremes
/// when both are known.
fn merge_reading(
    label: String,
    forecast: ForecastReading,
    observed: ObservedRange,
) -> WeatherReading {
    let current_c = forecast
        .current_c
        .or_else(|| match (observed.min_c, observed.max_c) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            _ => None,
        });

    WeatherReading {
        label,
        temp: current_c.map(format_temp),
        temp_min_observed: observed.min_c.map(format_temp),
        temp_max_observed: observed.max_c.map(format_temp),
        temp_min_forecast: forecast.min_c.map(format_temp),
        temp_max_forecast: forecast.max_c.map(format_temp),
    }
}
