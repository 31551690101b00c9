//! Search command handler
//!
//! Geocodes a free-text address.

use crate::cli::build_widget;
use crate::cli::output::OutputArgs;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address or place to search for
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let formatter = args.output.formatter()?;
    let widget = build_widget(&config)?;
    let query = args.query.join(" ");

    widget.set_search_query(query.as_str()).await;
    widget.submit_search().await;

    let snapshot = widget.snapshot().await;
    if snapshot.address.is_empty() {
        eprintln!("Error: Could not geocode '{}'", query);
        std::process::exit(1);
    }

    println!("{}", args.output.render(formatter.as_ref(), &snapshot, &config)?);
    Ok(())
}
