//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default geocoding provider
pub const DEFAULT_PROVIDER: &str = "google";

/// Default device geolocation source
pub const DEFAULT_GEOLOCATION_SOURCE: &str = "ip";

/// Default geolocation lookup timeout in seconds
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "map-locator";
