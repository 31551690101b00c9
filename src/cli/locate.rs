//! Locate command handler
//!
//! Runs the geolocation bootstrap once and prints where it landed.

use crate::cli::build_widget;
use crate::cli::output::OutputArgs;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Geolocation source: ip, fixed or none (overrides config)
    #[arg(long, short = 's')]
    pub source: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(source) = args.source {
        config.geolocation.source = source;
    }

    let formatter = args.output.formatter()?;
    let widget = build_widget(&config)?;

    widget.bootstrap().await;

    let snapshot = widget.snapshot().await;
    println!("{}", args.output.render(formatter.as_ref(), &snapshot, &config)?);
    Ok(())
}
