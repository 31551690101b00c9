//! Output formatters
//!
//! Provides trait-based output formatting for location snapshots.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::widget::state::LocationSnapshot;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a location snapshot
    ///
    /// # Arguments
    /// * `snapshot` - Coordinates, address and search text to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, snapshot: &LocationSnapshot, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// Get a formatter by name, or a config error naming the bad format
/// and the ones that exist
pub fn require_formatter(name: &str) -> Result<Box<dyn OutputFormatter>> {
    get_formatter(name).ok_or_else(|| {
        let known: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown format: {} (available: {})",
            name,
            known.join(", ")
        ))
    })
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    let formatters: [Box<dyn OutputFormatter>; 3] = [
        Box::new(json::JsonFormatter),
        Box::new(text::TextFormatter),
        Box::new(url::UrlFormatter),
    ];
    formatters
        .iter()
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("gpx").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
    }

    #[test]
    fn test_require_formatter_error() {
        match require_formatter("yaml") {
            Err(Error::Config(msg)) => {
                assert!(msg.contains("yaml"));
                assert!(msg.contains("available: json, text, url"));
            }
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok(_) => panic!("yaml is not a format"),
        }
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        assert!(formats.iter().any(|f| f.name == "json"));
        assert!(formats.iter().any(|f| f.name == "text"));
        assert!(formats.iter().any(|f| f.name == "url"));
    }
}
