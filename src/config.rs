//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! the health check set: the memory pressure threshold, the required environment
//! variables, logging format, and default paths. `AppConfig` is the root
//! configuration struct containing all settings.

use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Health Check Constants
// =============================================================================

/// Memory pressure threshold as a percentage of total memory.
///
/// A single instantaneous sample above this value marks the `memory` check as
/// failing. No hysteresis or smoothing is applied; the external prober decides
/// how many consecutive failures matter.
pub const MEMORY_PRESSURE_THRESHOLD_PERCENT: f64 = 90.0;

/// Environment variables that must be present and non-empty for the
/// `environment` check to pass.
///
/// These cover the public API/base-URL endpoints and the authentication
/// provider. The scan short-circuits on the first missing variable.
pub const REQUIRED_ENV_VARS: [&str; 4] = [
    "PUBLIC_API_URL",
    "PUBLIC_BASE_URL",
    "AUTH_CLIENT_ID",
    "AUTH_ISSUER_URL",
];

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Health responses must never be cached - every probe needs a fresh sample.
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "vigil=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Health check tuning
    #[serde(default)]
    pub health: HealthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Health check configuration.
///
/// Defaults mirror the named constants; deployments can override either the
/// threshold or the required variable list without a rebuild.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Memory usage percentage above which the `memory` check fails
    #[serde(default = "HealthConfig::default_memory_threshold")]
    pub memory_threshold_percent: f64,
    /// Environment variables that must be present and non-empty
    #[serde(default = "HealthConfig::default_required_env")]
    pub required_env: Vec<String>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            memory_threshold_percent: Self::default_memory_threshold(),
            required_env: Self::default_required_env(),
        }
    }
}

impl HealthConfig {
    fn default_memory_threshold() -> f64 {
        MEMORY_PRESSURE_THRESHOLD_PERCENT
    }

    fn default_required_env() -> Vec<String> {
        REQUIRED_ENV_VARS.iter().map(|s| s.to_string()).collect()
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
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.health.memory_threshold_percent;
        if !(threshold > 0.0 && threshold <= 100.0) {
            return Err(ConfigError::Validation(format!(
                "health.memory_threshold_percent must be in (0, 100], got {}",
                threshold
            )));
        }

        if self.health.required_env.is_empty() {
            return Err(ConfigError::Validation(
                "health.required_env must list at least one variable".to_string(),
            ));
        }

        Ok(())
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
