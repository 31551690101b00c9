//! Reverse command handler
//!
//! Places the marker at a coordinate and prints the address found there.

use crate::cli::build_widget;
use crate::cli::output::OutputArgs;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;

    let config = Config::load()?;
    let formatter = args.output.formatter()?;
    let widget = build_widget(&config)?;

    widget.marker_drag_end(coords).await;

    let snapshot = widget.snapshot().await;
    if snapshot.address.is_empty() {
        eprintln!("Error: No address found at ({})", coords);
        std::process::exit(1);
    }

    println!("{}", args.output.render(formatter.as_ref(), &snapshot, &config)?);
    Ok(())
}
