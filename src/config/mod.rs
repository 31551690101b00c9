//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/map-locator/config.toml
//!
//! The provider API key may also come from `MAP_LOCATOR_API_KEY` (or
//! `GOOGLE_MAPS_API_KEY`), which wins over the file.

pub mod defaults;

use crate::constants::env::{API_KEY, GOOGLE_API_KEY};
use crate::constants::map::{DEFAULT_HEIGHT_PX, DEFAULT_ZOOM};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Map widget settings
    #[serde(default)]
    pub map: MapConfig,

    /// Device geolocation settings
    #[serde(default)]
    pub geolocation: GeolocationConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name: google or nominatim
    #[serde(default = "default_provider")]
    pub name: String,

    /// Provider API key (required for google)
    #[serde(default)]
    pub api_key: String,
}

/// Map widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Zoom level of the embedded map
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Map container height in pixels
    #[serde(default = "default_height_px")]
    pub height_px: u32,
}

/// Device geolocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Position source: ip, fixed or none
    #[serde(default = "default_geolocation_source")]
    pub source: String,

    /// Latitude used by the fixed source
    #[serde(default)]
    pub lat: f64,

    /// Longitude used by the fixed source
    #[serde(default)]
    pub lng: f64,

    /// Lookup timeout in seconds
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_height_px() -> u32 {
    DEFAULT_HEIGHT_PX
}
fn default_geolocation_source() -> String {
    DEFAULT_GEOLOCATION_SOURCE.to_string()
}
fn default_geolocation_timeout() -> u64 {
    DEFAULT_GEOLOCATION_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}&z={zoom}".to_string(),
    );
    providers
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
            api_key: String::new(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            height_px: default_height_px(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            source: default_geolocation_source(),
            lat: 0.0,
            lng: 0.0,
            timeout_secs: default_geolocation_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path, then apply the environment
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from the default path only
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            debug!(path = %path.display(), "Loaded config file");
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Apply environment overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply environment overrides from `lookup`
    ///
    /// `MAP_LOCATOR_API_KEY` takes precedence over `GOOGLE_MAPS_API_KEY`.
    /// Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = [API_KEY, GOOGLE_API_KEY]
            .into_iter()
            .filter_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .next();

        if let Some(key) = key {
            debug!("Using provider API key from environment");
            self.provider.api_key = key.trim().to_string();
        }
    }

    /// The provider API key, or an error if none is configured
    pub fn api_key(&self) -> Result<&str> {
        if self.provider.api_key.is_empty() {
            return Err(Error::MissingApiKey(self.provider.name.clone()));
        }
        Ok(&self.provider.api_key)
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "name"] => Some(self.provider.name.clone()),
            ["provider", "api_key"] => Some(self.provider.api_key.clone()),

            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "height_px"] => Some(self.map.height_px.to_string()),

            ["geolocation", "source"] => Some(self.geolocation.source.clone()),
            ["geolocation", "lat"] => Some(self.geolocation.lat.to_string()),
            ["geolocation", "lng"] => Some(self.geolocation.lng.to_string()),
            ["geolocation", "timeout_secs"] => Some(self.geolocation.timeout_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "name"] => {
                self.provider.name = value.to_string();
            }
            ["provider", "api_key"] => {
                self.provider.api_key = value.to_string();
            }

            ["map", "zoom"] => {
                self.map.zoom = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid zoom value: {}", value)))?;
            }
            ["map", "height_px"] => {
                self.map.height_px = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid height value: {}", value)))?;
            }

            ["geolocation", "source"] => {
                self.geolocation.source = value.to_string();
            }
            ["geolocation", "lat"] => {
                self.geolocation.lat = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid latitude value: {}", value)))?;
            }
            ["geolocation", "lng"] => {
                self.geolocation.lng = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid longitude value: {}", value)))?;
            }
            ["geolocation", "timeout_secs"] => {
                self.geolocation.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "provider.name",
            "provider.api_key",
            "map.zoom",
            "map.height_px",
            "geolocation.source",
            "geolocation.lat",
            "geolocation.lng",
            "geolocation.timeout_secs",
            "server.host",
            "server.port",
            "url.default",
        ]
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string())
            .replace("{zoom}", &self.map.zoom.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
