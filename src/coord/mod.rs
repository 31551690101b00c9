//! Geographic coordinates

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
///
/// Defaults to (0, 0), the position shown before any geolocation or
/// geocoding result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate coordinates coming from outside the process
    ///
    /// Both values must be finite; latitude within -90..=90, longitude
    /// within -180..=180.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Coordinates ({}, {}) are not finite",
                self.lat, self.lng
            )));
        }
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_origin() {
        let coords = Coordinates::default();
        assert_eq!(coords, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_display() {
        let coords = Coordinates::new(48.8566, 2.3522);
        assert_eq!(coords.to_string(), "48.856600, 2.352200");
    }
}
