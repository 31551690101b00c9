//! Location state holder
//!
//! Plain replace-whole-value state. Setters do not validate; callers pass
//! values they have already computed.

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Current coordinates, address and search text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    coordinates: Coordinates,
    address: String,
    search_query: String,
}

/// Serializable copy of a `LocationState`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub coordinates: Coordinates,
    pub address: String,
    pub search_query: String,
}

impl LocationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = coordinates;
    }

    pub fn set_address(&mut self, address: String) {
        self.address = address;
    }

    pub fn set_search_query(&mut self, query: String) {
        self.search_query = query;
    }

    /// Replace coordinates and address together
    pub fn set_location(&mut self, coordinates: Coordinates, address: String) {
        self.coordinates = coordinates;
        self.address = address;
    }

    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            coordinates: self.coordinates,
            address: self.address.clone(),
            search_query: self.search_query.clone(),
        }
    }
}
