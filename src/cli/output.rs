//! Output options shared by the lookup commands

use crate::config::Config;
use crate::error::Result;
use crate::format::url::UrlFormatter;
use crate::format::{require_formatter, OutputFormatter};
use crate::widget::state::LocationSnapshot;
use clap::Args;

/// Output format arguments
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format (json, text, url)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Map link provider for url output (overrides url.default)
    #[arg(long)]
    pub url_provider: Option<String>,
}

impl OutputArgs {
    /// Resolve the formatter, failing before any lookup runs
    pub fn formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        require_formatter(&self.format)
    }

    /// Format a snapshot
    pub fn render(
        &self,
        formatter: &dyn OutputFormatter,
        snapshot: &LocationSnapshot,
        config: &Config,
    ) -> Result<String> {
        let output = match self.url_provider.as_deref() {
            Some(provider) if formatter.name() == UrlFormatter.name() => {
                UrlFormatter.format_with_provider(snapshot, config, Some(provider))?
            }
            _ => formatter.format(snapshot, config)?,
        };
        Ok(output.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::error::Error;

    fn paris() -> LocationSnapshot {
        LocationSnapshot {
            coordinates: Coordinates::new(48.8566, 2.3522),
            address: "Paris, France".to_string(),
            search_query: String::new(),
        }
    }

    fn args(format: &str, url_provider: Option<&str>) -> OutputArgs {
        OutputArgs {
            format: format.to_string(),
            url_provider: url_provider.map(str::to_string),
        }
    }

    #[test]
    fn test_url_provider_override() {
        let args = args("url", Some("openstreetmap"));
        let formatter = args.formatter().unwrap();
        let output = args.render(formatter.as_ref(), &paris(), &Config::default()).unwrap();
        assert!(output.starts_with("https://www.openstreetmap.org/"));
    }

    #[test]
    fn test_url_provider_default() {
        let args = args("url", None);
        let formatter = args.formatter().unwrap();
        let output = args.render(formatter.as_ref(), &paris(), &Config::default()).unwrap();
        assert_eq!(output, "https://www.google.com/maps/@48.8566,2.3522,14z");
    }

    #[test]
    fn test_unknown_url_provider() {
        let args = args("url", Some("bing"));
        let formatter = args.formatter().unwrap();
        let result = args.render(formatter.as_ref(), &paris(), &Config::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_provider_ignored_for_text() {
        let args = args("text", Some("bing"));
        let formatter = args.formatter().unwrap();
        let output = args.render(formatter.as_ref(), &paris(), &Config::default()).unwrap();
        assert!(output.starts_with("Current Location: Paris, France"));
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(args("gpx", None).formatter(), Err(Error::Config(_))));
    }
}
