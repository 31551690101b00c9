//! Centralized constants for the map-locator crate
//!
//! Endpoints and user-facing strings shared by the widget, the server and
//! the CLI.

/// External API endpoints
pub mod api {
    /// Google Geocoding API (JSON output)
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// Google Maps JavaScript API loader
    pub const GOOGLE_MAPS_JS_URL: &str = "https://maps.googleapis.com/maps/api/js";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User agent sent to every provider
    pub const USER_AGENT: &str = concat!("map-locator/", env!("CARGO_PKG_VERSION"));
}

/// Map widget presentation
pub mod map {
    /// Fixed zoom level of the embedded map
    pub const DEFAULT_ZOOM: u8 = 14;

    /// Height of the map container in pixels
    pub const DEFAULT_HEIGHT_PX: u32 = 300;

    /// Shown instead of the map while it is loading or after it failed
    pub const PLACEHOLDER_MESSAGE: &str = "Error loading map. Please try again later.";

    /// Prefix of the address label
    pub const ADDRESS_LABEL: &str = "Current Location:";
}

/// Environment variables
pub mod env {
    /// Provider API key override
    pub const API_KEY: &str = "MAP_LOCATOR_API_KEY";

    /// Fallback API key variable, as used by most Google tooling
    pub const GOOGLE_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
}
