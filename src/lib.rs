//! map-locator: Location Picker
//!
//! A library and CLI tool that finds where you are, lets you move a map
//! marker or search an address, and keeps a human-readable address in sync
//! with the coordinates.
//!
//! ## Features
//!
//! - Device geolocation (IP-based, fixed, or none)
//! - Forward and reverse geocoding (Google, Nominatim)
//! - A location widget with a single source of truth for coordinates,
//!   address and search text
//! - Web page with an embedded draggable-marker map + HTTP API + CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use map_locator::geo::device::FixedLocator;
//! use map_locator::geo::nominatim::NominatimBackend;
//! use map_locator::{Coordinates, LocationWidget};
//!
//! # async fn demo() -> map_locator::Result<()> {
//! let here = FixedLocator(Coordinates::new(48.8566, 2.3522)); // Paris
//! let widget = LocationWidget::new(NominatimBackend::new()?, here);
//!
//! // Ask the device where it is, then reverse geocode it
//! widget.bootstrap().await;
//! println!("Current Location: {}", widget.snapshot().await.address);
//!
//! // Search moves coordinates and address together
//! widget.set_search_query("Eiffel Tower").await;
//! widget.submit_search().await;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod server;
pub mod widget;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{GeoBackend, GeocodeResponse, GeocodeResult, GeocodeStatus};
pub use widget::state::LocationSnapshot;
pub use widget::view::{MapPane, MapStatus, PageConfig, View};
pub use widget::LocationWidget;
