use serde::{Deserialize, Serialize};

/// A geocoded place. Lives only for the duration of one aggregation call.
#[derive(Debug, Clone)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable label, e.g. "Santiago, Región Metropolitana, Chile".
    pub label: String,
    /// IANA timezone id reported by the geocoder, if any.
    pub timezone: Option<String>,
}

impl Location {
    /// Timezone to send upstream; Open-Meteo resolves `auto` from the coordinates.
    pub fn timezone_or_auto(&self) -> &str {
        self.timezone.as_deref().unwrap_or("auto")
    }
}

/// Today's forecast at a location: the current scalar plus the day's min/max.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForecastReading {
    pub current_c: Option<f64>,
    pub min_c: Option<f64>,
    pub max_c: Option<f64>,
}

/// Min/max over the hourly samples recorded so far today.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObservedRange {
    pub min_c: Option<f64>,
    pub max_c: Option<f64>,
}

/// The merged reading handed across the crate boundary.
///
/// Numeric fields are pre-formatted to one decimal place; absent means the
/// value could not be derived, never zero. Placeholder text for absent values
/// is the renderer's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub label: String,
    pub temp: Option<String>,
    pub temp_min_observed: Option<String>,
    pub temp_max_observed: Option<String>,
    pub temp_min_forecast: Option<String>,
    pub temp_max_forecast: Option<String>,
}

/// Render a temperature with exactly one decimal digit.
pub fn format_temp(value: f64) -> String {
    format!("{value:.1}")
}
