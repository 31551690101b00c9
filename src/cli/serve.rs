//! Serve command handler
//!
//! Runs the location page and its API in the foreground.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::{info, warn};

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Geocoding provider: google or nominatim (overrides config)
    #[arg(long)]
    pub provider: Option<String>,

    /// Geolocation source: ip, fixed or none (overrides config)
    #[arg(long, short = 's')]
    pub source: Option<String>,
}

impl ServeArgs {
    /// Fold the command-line overrides into `config`
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(provider) = self.provider {
            config.provider.name = provider;
        }
        if let Some(source) = self.source {
            config.geolocation.source = source;
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.server_addr(),
        provider = %config.provider.name,
        geolocation = %config.geolocation.source,
        "Starting map-locator server"
    );
    if config.api_key().is_err() {
        warn!("No Maps API key configured; the page will show the placeholder instead of a map");
    }

    server::run(config).await
}
