//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "provider.name")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,

    /// Print secret values (the API key) instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    // File values only: an API key from the environment must not be saved
    let mut config = Config::load_file()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                if key == "provider.api_key" && !args.reveal && !value.is_empty() {
                    println!("***");
                } else {
                    println!("{}", value);
                }
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            if key == "provider.api_key" && !args.reveal {
                println!("{} = ***", key);
            } else {
                println!("{} = {}", key, value);
            }
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[provider]");
    println!("name = \"{}\"", config.provider.name);
    if config.provider.api_key.is_empty() {
        println!("api_key = \"\" # not configured");
    } else {
        println!("api_key = \"***\" # configured");
    }
    println!();

    println!("[map]");
    println!("zoom = {}", config.map.zoom);
    println!("height_px = {}", config.map.height_px);
    println!();

    println!("[geolocation]");
    println!("source = \"{}\"", config.geolocation.source);
    println!("lat = {}", config.geolocation.lat);
    println!("lng = {}", config.geolocation.lng);
    println!("timeout_secs = {}", config.geolocation.timeout_secs);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    for (name, template) in &config.url.providers {
        println!("{} = \"{}\"", name, template);
    }
}
