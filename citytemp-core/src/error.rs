use thiserror::Error;

/// Failure modes of a weather aggregation.
///
/// `resolve` flattens both variants to `None`; `try_resolve` surfaces them so
/// callers that want to tell "unknown city" from "upstream trouble" can.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Geocoding produced no usable candidate for the query.
    #[error("no location found for \"{0}\"")]
    NotFound(String),

    /// Any of the upstream requests failed: network error, non-success
    /// status, or a body that could not be parsed at all.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
