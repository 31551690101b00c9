//! Google Geocoding API backend
//!
//! Requires an API key. Both directions go through the same endpoint:
//! `?address=` for search, `?latlng=` for reverse lookups.

use crate::constants::api::{GOOGLE_GEOCODE_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeocodeResponse, GeocodeResult, GeocodeStatus};
use serde::Deserialize;
use tracing::debug;

/// Google geocoding backend
#[derive(Clone)]
pub struct GoogleBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GoogleBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleBackend")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

impl GoogleResponse {
    fn into_geocode_response(self) -> GeocodeResponse {
        GeocodeResponse {
            status: GeocodeStatus::from(self.status),
            results: self
                .results
                .into_iter()
                .map(|r| GeocodeResult {
                    formatted_address: r.formatted_address,
                    location: Coordinates::new(r.geometry.location.lat, r.geometry.location.lng),
                })
                .collect(),
            error_message: self.error_message,
        }
    }
}

impl GoogleBackend {
    /// Create a backend talking to the public Google endpoint
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, GOOGLE_GEOCODE_URL)
    }

    /// Create a backend against a different endpoint (proxies, tests)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forward_url(&self, query: &str) -> String {
        format!(
            "{}?address={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    fn reverse_url(&self, coords: Coordinates) -> String {
        format!(
            "{}?latlng={},{}&key={}",
            self.base_url,
            coords.lat,
            coords.lng,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn fetch(&self, url: &str) -> Result<GeocodeResponse> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(GeocodeStatus::Other(format!(
                "HTTP {}",
                response.status()
            ))));
        }

        let raw: GoogleResponse = response.json().await?;
        let parsed = raw.into_geocode_response();
        debug!(
            status = %parsed.status,
            results = parsed.results.len(),
            "Google geocoding response"
        );
        Ok(parsed)
    }
}

impl GeoBackend for GoogleBackend {
    fn name(&self) -> &str {
        "google"
    }

    async fn geocode(&self, query: &str) -> Result<GeocodeResponse> {
        debug!(query, "Google forward geocode");
        self.fetch(&self.forward_url(query)).await
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<GeocodeResponse> {
        debug!(lat = coords.lat, lng = coords.lng, "Google reverse geocode");
        self.fetch(&self.reverse_url(coords)).await
    }
}
