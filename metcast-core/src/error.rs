use thiserror::Error;

use crate::provider::Endpoint;

/// Failures surfaced by the OpenWeather client and the search flow.
///
/// Derivation and aggregation never produce these; missing data there is an
/// empty or `None` result.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Malformed request URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Failed to send request to OpenWeather ({endpoint}): {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    HttpStatus {
        endpoint: Endpoint,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing upstream data: {0}")]
    MissingUpstreamData(String),
}

/// AQI category outside 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("air quality index {0} is outside the 1..=5 range")]
pub struct InvalidAqi(pub u8);

pub type Result<T> = std::result::Result<T, WeatherError>;
