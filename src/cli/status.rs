//! Status command handler
//!
//! Shows configured provider/geolocation settings and whether a server is
//! running.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Skip the running-server check
    #[arg(long)]
    pub offline: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("map-locator v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Provider: {}", config.provider.name);
    println!(
        "  API key: {}",
        if config.api_key().is_ok() { "configured" } else { "missing" }
    );
    println!("Geolocation: {}", config.geolocation.source);
    println!("Map zoom: {}", config.map.zoom);
    println!();

    if !args.offline {
        check_server_status(&config).await;
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(provider) = status.get("provider").and_then(|v| v.as_str()) {
                        println!("  Provider: {}", provider);
                    }
                    if let Some(map) = status
                        .get("map")
                        .and_then(|m| m.get("state"))
                        .and_then(|v| v.as_str())
                    {
                        println!("  Map: {}", map);
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
}
