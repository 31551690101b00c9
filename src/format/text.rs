//! Human-readable text output formatter

use crate::config::Config;
use crate::constants::map::ADDRESS_LABEL;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::widget::state::LocationSnapshot;

/// Text formatter - outputs the address label and coordinates
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, snapshot: &LocationSnapshot, _config: &Config) -> Result<String> {
        let mut output = String::new();

        let address = if snapshot.address.is_empty() {
            "(unknown)"
        } else {
            snapshot.address.as_str()
        };
        output.push_str(&format!("{} {}\n", ADDRESS_LABEL, address));
        output.push_str(&format!("Coordinates: ({})\n", snapshot.coordinates));
        if !snapshot.search_query.is_empty() {
            output.push_str(&format!("Search: {}\n", snapshot.search_query));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;

    #[test]
    fn test_text_format() {
        let snapshot = LocationSnapshot {
            coordinates: Coordinates::new(40.0, -74.0),
            address: "1 Main St".to_string(),
            search_query: String::new(),
        };

        let output = TextFormatter.format(&snapshot, &Config::default()).unwrap();

        assert_eq!(
            output,
            "Current Location: 1 Main St\nCoordinates: (40.000000, -74.000000)\n"
        );
    }

    #[test]
    fn test_text_format_unknown_address() {
        let snapshot = LocationSnapshot {
            search_query: "Atlantis".to_string(),
            ..Default::default()
        };

        let output = TextFormatter.format(&snapshot, &Config::default()).unwrap();

        assert!(output.contains("Current Location: (unknown)"));
        assert!(output.contains("Search: Atlantis"));
    }
}
