//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines the defaults
//! used when a section or field is missing. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Every dice response is unique and health probes must never see a cached
/// answer, so both endpoints opt out of caching entirely.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Interface bound when `http.host` is not configured (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Port bound when `http.port` is not configured
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Grace period for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

/// Time between a shutdown signal and closing the listener, during which
/// `/health` reports unhealthy so load balancers stop routing here
pub const DEFAULT_DRAIN_DELAY_SECS: u64 = 5;

// =============================================================================
// Dice Log Defaults
// =============================================================================

/// Directory holding the dice log, relative to the working directory
pub const DEFAULT_DICE_LOG_DIR: &str = "logs";

/// File name of the dice log
pub const DEFAULT_DICE_LOG_FILE: &str = "dice.log";

/// Default path of the dice log
pub const DEFAULT_DICE_LOG_PATH: &str =
    formatcp!("{}/{}", DEFAULT_DICE_LOG_DIR, DEFAULT_DICE_LOG_FILE);

/// Timestamp layout for dice log lines, e.g. `2024-05-01 13:37:00,042`
pub const DICE_LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "dice_service=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Dice log (file + console mirror) configuration
    #[serde(default)]
    pub dice_log: DiceLogConfig,
    /// Diagnostics logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds to keep serving with `/health` unhealthy after SIGTERM/SIGINT
    #[serde(default = "HttpServerConfig::default_drain_delay")]
    pub drain_delay_secs: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            drain_delay_secs: Self::default_drain_delay(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_drain_delay() -> u64 {
        DEFAULT_DRAIN_DELAY_SECS
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiceLogConfig {
    /// File every roll is appended to. Parent directories are created at startup.
    #[serde(default = "DiceLogConfig::default_path")]
    pub path: PathBuf,
    /// Mirror each line to stdout as well (default: true)
    #[serde(default = "DiceLogConfig::default_console")]
    pub console: bool,
}

impl Default for DiceLogConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            console: Self::default_console(),
        }
    }
}

impl DiceLogConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_DICE_LOG_PATH)
    }

    fn default_console() -> bool {
        true
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Whether diagnostics should be emitted as JSON lines
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file is only tolerated at [`DEFAULT_CONFIG_PATH`], where it
    /// means "run with defaults". Any explicitly chosen path must exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
