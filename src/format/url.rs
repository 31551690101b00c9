//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::widget::state::LocationSnapshot;

/// URL formatter - outputs a map link for the current coordinates
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        snapshot: &LocationSnapshot,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let coords = snapshot.coordinates;
        config.format_url(provider, coords.lat, coords.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the current location"
    }

    fn format(&self, snapshot: &LocationSnapshot, config: &Config) -> Result<String> {
        self.format_with_provider(snapshot, config, None)
    }
}
