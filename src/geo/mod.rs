//! Geocoding module
//!
//! Provides forward geocoding (address to coordinates), reverse geocoding
//! (coordinates to address) and device geolocation.

pub mod device;
pub mod google;
pub mod nominatim;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Status reported by a geocoding provider
///
/// Mirrors the Google Geocoding API status strings. Every status other than
/// `Ok` is handled the same way by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    /// A status string this crate does not know about
    Other(String),
}

impl GeocodeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverDailyLimit => "OVER_DAILY_LIMIT",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for GeocodeStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_DAILY_LIMIT" => Self::OverDailyLimit,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "UNKNOWN_ERROR" => Self::UnknownError,
            _ => Self::Other(s),
        }
    }
}

impl From<GeocodeStatus> for String {
    fn from(status: GeocodeStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Human-readable address
    pub formatted_address: String,
    /// Position of the match
    pub location: Coordinates,
}

/// A provider response: a status plus zero or more matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: GeocodeStatus,
    pub results: Vec<GeocodeResult>,
    /// Extra detail some providers attach to non-OK statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// A successful response with the given matches
    ///
    /// An empty list is reported as `ZERO_RESULTS`.
    pub fn ok(results: Vec<GeocodeResult>) -> Self {
        let status = if results.is_empty() {
            GeocodeStatus::ZeroResults
        } else {
            GeocodeStatus::Ok
        };
        Self {
            status,
            results,
            error_message: None,
        }
    }

    /// A response carrying only a status
    pub fn status(status: GeocodeStatus) -> Self {
        Self {
            status,
            results: Vec::new(),
            error_message: None,
        }
    }

    /// Take the first match, if the provider reported `OK` and returned one
    ///
    /// A non-OK status keeps the provider's `error_message`, when it sent one.
    pub fn into_first(self) -> Result<GeocodeResult> {
        if self.status != GeocodeStatus::Ok {
            return Err(match self.error_message {
                Some(message) => Error::GeocodingRejected {
                    status: self.status,
                    message,
                },
                None => Error::Geocoding(self.status),
            });
        }
        self.results
            .into_iter()
            .next()
            .ok_or(Error::Geocoding(GeocodeStatus::ZeroResults))
    }
}

/// Trait for geocoding backends
///
/// Transport failures come back as `Err`; provider-level outcomes (including
/// "nothing found") come back as a `GeocodeResponse` status.
pub trait GeoBackend: Send + Sync {
    /// Short provider name, used in logs and status output
    fn name(&self) -> &str;

    /// Geocode a free-text address
    fn geocode(&self, query: &str) -> impl Future<Output = Result<GeocodeResponse>> + Send;

    /// Reverse geocode coordinates to an address
    fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> impl Future<Output = Result<GeocodeResponse>> + Send;
}

/// Runtime-selected geocoding provider
#[derive(Debug, Clone)]
pub enum Provider {
    Google(google::GoogleBackend),
    Nominatim(nominatim::NominatimBackend),
}

impl GeoBackend for Provider {
    fn name(&self) -> &str {
        match self {
            Self::Google(b) => b.name(),
            Self::Nominatim(b) => b.name(),
        }
    }

    async fn geocode(&self, query: &str) -> Result<GeocodeResponse> {
        match self {
            Self::Google(b) => b.geocode(query).await,
            Self::Nominatim(b) => b.geocode(query).await,
        }
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<GeocodeResponse> {
        match self {
            Self::Google(b) => b.reverse_geocode(coords).await,
            Self::Nominatim(b) => b.reverse_geocode(coords).await,
        }
    }
}

/// Build the geocoding provider named in the config
pub fn get_geocoder(config: &Config) -> Result<Provider> {
    match config.provider.name.to_lowercase().as_str() {
        "google" => {
            let key = config.api_key()?;
            Ok(Provider::Google(google::GoogleBackend::new(key)?))
        }
        "nominatim" | "osm" | "openstreetmap" => {
            Ok(Provider::Nominatim(nominatim::NominatimBackend::new()?))
        }
        other => Err(Error::Config(format!("Unknown geocoding provider: {}", other))),
    }
}

/// Build the device locator named in the config
pub fn get_device_locator(config: &Config) -> Result<device::DeviceLocator> {
    device::DeviceLocator::from_config(&config.geolocation)
}
