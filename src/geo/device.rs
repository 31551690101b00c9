//! Device geolocation
//!
//! The host's answer to "where am I". Desktop and server hosts have no GPS,
//! so the default source is IP geolocation via ip-api.com. Positions are
//! never cached: each widget asks once and forgets on exit.

use crate::config::GeolocationConfig;
use crate::constants::api::{IP_API_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Source of the device's current position
pub trait Geolocator: Send + Sync {
    /// Whether this host can geolocate at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Ask for the current position
    ///
    /// Fails with `Error::Geolocation` when the position is denied,
    /// unavailable, or the lookup times out.
    fn current_position(&self) -> impl Future<Output = Result<Coordinates>> + Send;
}

/// IP-based geolocation
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    /// Create an IP locator with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(IP_API_URL, timeout)
    }

    /// Create an IP locator against a different endpoint
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    fn parse(data: IpApiResponse) -> Result<Coordinates> {
        if data.status != "success" {
            return Err(Error::Geolocation(format!(
                "IP location lookup failed: {}",
                data.message.unwrap_or(data.status)
            )));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Geolocation("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Geolocation("No longitude in response".to_string()))?;

        Ok(Coordinates::new(lat, lng))
    }
}

impl Geolocator for IpLocator {
    async fn current_position(&self) -> Result<Coordinates> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Geolocation("IP location request timed out".to_string())
            } else {
                Error::Geolocation(format!("IP location request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            return Err(Error::Geolocation(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geolocation(format!("Failed to parse IP location response: {}", e)))?;

        let coords = Self::parse(data)?;
        debug!(lat = coords.lat, lng = coords.lng, "IP geolocation");
        Ok(coords)
    }
}

/// A position fixed in configuration
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

impl Geolocator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// A host without any geolocation capability
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl Geolocator for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates> {
        Err(Error::Geolocation("Geolocation is not supported on this host".to_string()))
    }
}

/// Runtime-selected device locator
#[derive(Debug, Clone)]
pub enum DeviceLocator {
    Ip(IpLocator),
    Fixed(FixedLocator),
    Unsupported(Unsupported),
}

impl DeviceLocator {
    /// Build the locator named by `geolocation.source`
    pub fn from_config(config: &GeolocationConfig) -> Result<Self> {
        match config.source.to_lowercase().as_str() {
            "ip" => Ok(Self::Ip(IpLocator::new(Duration::from_secs(config.timeout_secs))?)),
            "fixed" => {
                let coords = Coordinates::new(config.lat, config.lng);
                coords.validate()?;
                Ok(Self::Fixed(FixedLocator(coords)))
            }
            "none" => Ok(Self::Unsupported(Unsupported)),
            other => Err(Error::Config(format!("Unknown geolocation source: {}", other))),
        }
    }
}

impl Geolocator for DeviceLocator {
    fn is_supported(&self) -> bool {
        match self {
            Self::Ip(l) => l.is_supported(),
            Self::Fixed(l) => l.is_supported(),
            Self::Unsupported(l) => l.is_supported(),
        }
    }

    async fn current_position(&self) -> Result<Coordinates> {
        match self {
            Self::Ip(l) => l.current_position().await,
            Self::Fixed(l) => l.current_position().await,
            Self::Unsupported(l) => l.current_position().await,
        }
    }
}
