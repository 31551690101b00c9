//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod output;
pub mod reverse;
pub mod search;
pub mod serve;
pub mod status;

use crate::config::Config;
use crate::error::Result;
use crate::geo::device::DeviceLocator;
use crate::geo::{get_device_locator, get_geocoder, Provider};
use crate::widget::LocationWidget;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Locate yourself, search an address or reverse-geocode coordinates
#[derive(Parser)]
#[command(name = "map-locator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Geolocate this device and show its address
    Locate(locate::LocateArgs),

    /// Search for an address
    Search(search::SearchArgs),

    /// Look up the address at a coordinate
    Reverse(reverse::ReverseArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show server/provider status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Initialize logging to stderr, `RUST_LOG` overriding the default level
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build a widget from config for one-shot commands
pub(crate) fn build_widget(config: &Config) -> Result<LocationWidget<Provider, DeviceLocator>> {
    let backend = get_geocoder(config)?;
    let locator = get_device_locator(config)?;
    Ok(LocationWidget::new(backend, locator).with_zoom(config.map.zoom))
}
