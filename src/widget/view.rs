//! Map view
//!
//! The render model (`View`) and the page settings (`PageConfig`). The page
//! in `static/index.html` draws both through the DOM, embeds the Google Maps
//! JavaScript API and reports back through the HTTP API.

use crate::constants::api::GOOGLE_MAPS_JS_URL;
use crate::constants::map::{ADDRESS_LABEL, PLACEHOLDER_MESSAGE};
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Load state of the embedded map widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum MapStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// The single draggable marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinates,
    pub draggable: bool,
}

/// What occupies the map area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapPane {
    Map {
        center: Coordinates,
        zoom: u8,
        marker: Marker,
    },
    Placeholder {
        message: String,
    },
}

impl MapPane {
    /// Pick the pane for a map status
    ///
    /// Only a loaded map is shown; loading and failed both get the
    /// placeholder.
    pub fn for_status(status: &MapStatus, center: Coordinates, zoom: u8) -> Self {
        match status {
            MapStatus::Loaded => MapPane::Map {
                center,
                zoom,
                marker: Marker {
                    position: center,
                    draggable: true,
                },
            },
            MapStatus::Loading | MapStatus::Failed(_) => MapPane::Placeholder {
                message: PLACEHOLDER_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, MapPane::Map { .. })
    }
}

/// Everything the page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub search_query: String,
    pub address: String,
    /// "Current Location: {address}"
    pub address_label: String,
    pub pane: MapPane,
}

impl View {
    pub fn new(search_query: String, address: String, pane: MapPane) -> Self {
        let address_label = format!("{} {}", ADDRESS_LABEL, address);
        Self {
            search_query,
            address,
            address_label,
            pane,
        }
    }
}

/// Settings the static page fetches before drawing the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Maps JavaScript API loader, calling back into `initMap`
    ///
    /// Absent without an API key; the page then keeps the placeholder up.
    pub maps_script_url: Option<String>,
    pub zoom: u8,
    pub height_px: u32,
}

impl PageConfig {
    pub fn new(api_key: Option<&str>, zoom: u8, height_px: u32) -> Self {
        let maps_script_url = api_key.map(|key| {
            format!(
                "{}?key={}&callback=initMap",
                GOOGLE_MAPS_JS_URL,
                urlencoding::encode(key)
            )
        });
        Self {
            maps_script_url,
            zoom,
            height_px,
        }
    }
}
