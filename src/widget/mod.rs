//! The location widget
//!
//! One state holder shared by three event sources: the geolocation
//! bootstrap, marker drag ends and search submissions. Each event replaces
//! state and, where needed, calls out to the geocoding backend.
//!
//! Failures never propagate out of the widget. They are logged and the
//! state keeps whatever it had (defaults or a stale address).
//!
//! Independent operations are not ordered against each other: if a drag
//! and a search are both in flight, whichever provider answer arrives last
//! is what the state ends up holding.

pub mod state;
pub mod view;

use crate::constants::map::DEFAULT_ZOOM;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::device::Geolocator;
use crate::geo::{GeoBackend, GeocodeResult};
use state::{LocationSnapshot, LocationState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use view::{MapPane, MapStatus, View};

/// Location widget over a geocoding backend and a device locator
pub struct LocationWidget<B, L> {
    backend: B,
    locator: L,
    zoom: u8,
    state: RwLock<LocationState>,
    map_status: RwLock<MapStatus>,
    bootstrapped: AtomicBool,
}

impl<B: GeoBackend, L: Geolocator> LocationWidget<B, L> {
    /// Create a widget with default state: (0, 0), no address, no query
    pub fn new(backend: B, locator: L) -> Self {
        Self {
            backend,
            locator,
            zoom: DEFAULT_ZOOM,
            state: RwLock::new(LocationState::new()),
            map_status: RwLock::new(MapStatus::default()),
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// Set the map zoom level
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Whether `bootstrap` has been called on this widget
    pub fn bootstrap_started(&self) -> bool {
        self.bootstrapped.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> LocationSnapshot {
        self.state.read().await.snapshot()
    }

    /// Ask the device for its position, once per widget
    ///
    /// Later calls return immediately. On success the position is stored
    /// and reverse geocoded; on failure the state stays at its defaults.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.locate_device().await;
    }

    /// Like `bootstrap`, but on a background task
    ///
    /// Returns false if the bootstrap had already been started.
    pub fn spawn_bootstrap(self: &Arc<Self>) -> bool
    where
        B: 'static,
        L: 'static,
    {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return false;
        }
        let widget = Arc::clone(self);
        tokio::spawn(async move {
            widget.locate_device().await;
        });
        true
    }

    async fn locate_device(&self) {
        if !self.locator.is_supported() {
            debug!("Geolocation not supported, keeping default position");
            return;
        }

        match self.locator.current_position().await {
            Ok(coords) => {
                info!(lat = coords.lat, lng = coords.lng, "Device position acquired");
                self.state.write().await.set_coordinates(coords);
                self.reverse_geocode(coords).await;
            }
            Err(e) => {
                error!(error = %e, "Error fetching current location");
            }
        }
    }

    /// Look up the address for `coords` and store it
    ///
    /// Coordinates are not touched. On any failure the previous address
    /// stays.
    pub async fn reverse_geocode(&self, coords: Coordinates) {
        match self.lookup_address(coords).await {
            Ok(result) => {
                debug!(address = %result.formatted_address, "Reverse geocoded");
                self.state.write().await.set_address(result.formatted_address);
            }
            Err(e) => {
                error!(error = %e, lat = coords.lat, lng = coords.lng, "Geocoding failed");
            }
        }
    }

    /// Geocode the current search query and move there
    ///
    /// Coordinates and address are replaced together, or not at all.
    pub async fn forward_geocode(&self) {
        let query = self.state.read().await.search_query().to_string();

        match self.lookup_query(&query).await {
            Ok(result) => {
                info!(
                    query = %query,
                    address = %result.formatted_address,
                    "Address search matched"
                );
                self.state
                    .write()
                    .await
                    .set_location(result.location, result.formatted_address);
            }
            Err(e) => {
                error!(error = %e, query = %query, "Address search failed");
            }
        }
    }

    /// Marker drag end: store the new position, then reverse geocode it
    pub async fn marker_drag_end(&self, coords: Coordinates) {
        debug!(lat = coords.lat, lng = coords.lng, "Marker moved");
        self.state.write().await.set_coordinates(coords);
        self.reverse_geocode(coords).await;
    }

    /// Replace the search box text
    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.write().await.set_search_query(query.into());
    }

    /// Search button: geocode the current search text
    pub async fn submit_search(&self) {
        self.forward_geocode().await;
    }

    /// The map widget finished loading
    pub async fn map_loaded(&self) {
        *self.map_status.write().await = MapStatus::Loaded;
    }

    /// The map widget failed to load
    pub async fn map_load_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(reason = %reason, "Map failed to load");
        *self.map_status.write().await = MapStatus::Failed(reason);
    }

    pub async fn map_status(&self) -> MapStatus {
        self.map_status.read().await.clone()
    }

    /// Build the render model from the current state
    pub async fn render(&self) -> View {
        let snapshot = self.snapshot().await;
        let status = self.map_status().await;
        let pane = MapPane::for_status(&status, snapshot.coordinates, self.zoom);
        View::new(snapshot.search_query, snapshot.address, pane)
    }

    async fn lookup_address(&self, coords: Coordinates) -> Result<GeocodeResult> {
        self.backend.reverse_geocode(coords).await?.into_first()
    }

    async fn lookup_query(&self, query: &str) -> Result<GeocodeResult> {
        let result = self.backend.geocode(query).await?.into_first()?;
        result.location.validate()?;
        Ok(result)
    }
}
