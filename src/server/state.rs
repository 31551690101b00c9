//! Server shared state
//!
//! Holds the widget and the bits of configuration the page needs.

use crate::config::Config;
use crate::error::Result;
use crate::geo::device::{DeviceLocator, Geolocator};
use crate::geo::{get_device_locator, get_geocoder, GeoBackend, Provider};
use crate::widget::view::PageConfig;
use crate::widget::LocationWidget;
use std::sync::Arc;
use tracing::debug;

/// Shared state for the HTTP server
pub struct AppState<B, L> {
    /// The location widget every request talks to
    pub widget: Arc<LocationWidget<B, L>>,

    /// Key for the Maps JavaScript API, if one is configured
    pub api_key: Option<String>,

    /// Map container height in pixels
    pub height_px: u32,
}

impl AppState<Provider, DeviceLocator> {
    /// Build the provider, locator and widget described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = get_geocoder(config)?;
        let locator = get_device_locator(config)?;
        let widget = LocationWidget::new(backend, locator).with_zoom(config.map.zoom);
        let api_key = config.api_key().ok().map(str::to_string);

        Ok(Self::new(widget, api_key, config.map.height_px))
    }
}

impl<B: GeoBackend + 'static, L: Geolocator + 'static> AppState<B, L> {
    /// Create new application state
    pub fn new(widget: LocationWidget<B, L>, api_key: Option<String>, height_px: u32) -> Self {
        Self {
            widget: Arc::new(widget),
            api_key,
            height_px,
        }
    }

    /// Loader URL, zoom and map height for the page
    pub fn page_config(&self) -> PageConfig {
        PageConfig::new(self.api_key.as_deref(), self.widget.zoom(), self.height_px)
    }

    /// Start the geolocation bootstrap in the background, if not yet started
    pub fn start_bootstrap(&self) {
        if self.widget.spawn_bootstrap() {
            debug!("Geolocation bootstrap started");
        }
    }
}
