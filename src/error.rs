//! Error types for map-locator

use crate::geo::GeocodeStatus;
use thiserror::Error;

/// Main error type for map-locator operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No API key configured for provider '{0}'")]
    MissingApiKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    /// Provider answered, but not with a usable result
    #[error("Geocoding failed: {0}")]
    Geocoding(GeocodeStatus),

    /// Non-OK status that came with the provider's explanation
    #[error("Geocoding failed: {status} ({message})")]
    GeocodingRejected {
        status: GeocodeStatus,
        message: String,
    },

    #[error("Geolocation error: {0}")]
    Geolocation(String),
}

/// Result type alias for map-locator operations
pub type Result<T> = std::result::Result<T, Error>;
