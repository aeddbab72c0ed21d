//! Core library for the `citytemp` CLI.
//!
//! This crate defines:
//! - Configuration handling (default city, geocoding language)
//! - Open-Meteo endpoint clients (geocoding, forecast, archive)
//! - The aggregator that merges the three endpoints into one reading
//!
//! It is used by `citytemp-cli`, but can also be reused by other binaries or services.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use aggregator::WeatherAggregator;
pub use config::Config;
pub use error::WeatherError;
pub use model::{ForecastReading, Location, ObservedRange, WeatherReading};
pub use provider::Endpoints;
