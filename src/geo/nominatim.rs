//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Keyless alternative to Google. Nominatim has no status field, so empty
//! result lists and `{"error": ...}` bodies are reported as `ZERO_RESULTS`.
//! Usage policy: 1 request per second, identifying User-Agent required.

use crate::constants::api::{NOMINATIM_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeocodeResponse, GeocodeResult, GeocodeStatus};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search/reverse response item
///
/// Reverse lookups that find nothing answer 200 with only `error` set.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: Option<String>,
    lon: Option<String>,
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimBackend {
    /// Create a new Nominatim backend
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Create a backend against a self-hosted or fake instance
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Parse lat/lng strings to coordinates
    ///
    /// `NaN`, `inf` and out-of-range values parse as floats but are rejected.
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid longitude: {}", lng)))?;
        let coords = Coordinates::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }

    fn into_result(item: NominatimResult) -> Result<Option<GeocodeResult>> {
        if item.error.is_some() {
            return Ok(None);
        }
        match (item.lat, item.lon, item.display_name) {
            (Some(lat), Some(lon), Some(display_name)) => Ok(Some(GeocodeResult {
                formatted_address: display_name,
                location: Self::parse_coords(&lat, &lon)?,
            })),
            _ => Ok(None),
        }
    }

    async fn get(&self, url: &str) -> Result<Option<reqwest::Response>> {
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Geocoding(GeocodeStatus::Other(format!(
                "HTTP {}",
                response.status()
            ))));
        }
        Ok(Some(response))
    }
}

impl GeoBackend for NominatimBackend {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn geocode(&self, query: &str) -> Result<GeocodeResponse> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(query, "Nominatim forward geocode");

        let Some(response) = self.get(&url).await? else {
            return Ok(GeocodeResponse::status(GeocodeStatus::ZeroResults));
        };
        let items: Vec<NominatimResult> = response.json().await?;

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            if let Some(result) = Self::into_result(item)? {
                results.push(result);
            }
        }
        Ok(GeocodeResponse::ok(results))
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<GeocodeResponse> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, coords.lat, coords.lng
        );
        debug!(lat = coords.lat, lng = coords.lng, "Nominatim reverse geocode");

        let Some(response) = self.get(&url).await? else {
            return Ok(GeocodeResponse::status(GeocodeStatus::ZeroResults));
        };
        let item: NominatimResult = response.json().await?;

        Ok(GeocodeResponse::ok(Self::into_result(item)?.into_iter().collect()))
    }
}
