//! # Configuration Management for CacheHaus
//!
//! This crate provides the configuration structures shared by all CacheHaus components.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::CacheConfig;
//!
//! let cache_config = CacheConfig::new(
//!     "DefaultRedis".to_string(),
//!     "redis://localhost:6379".to_string(),
//!     3000,
//! );
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [cache]
//! name = "DefaultRedis"
//! redis_url = "redis://localhost:6379"
//! connection_timeout_ms = 3000
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from CACHEHAUS_CONFIG or ./cachehaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path, time::Duration};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./cachehaus.toml";
const CONFIG_PATH_VAR: &str = "CACHEHAUS_CONFIG";

/// Provider name used when none is configured
pub const DEFAULT_PROVIDER_NAME: &str = "DefaultRedis";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub cache: CacheConfig,
}

/// Redis hash cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Name the provider is registered under
    #[serde(default = "default_name")]
    pub name: String,
    /// Redis connection string (redis://localhost:6379)
    pub redis_url: String,
    /// Upper bound for establishing the connection
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
}

fn default_name() -> String {
    DEFAULT_PROVIDER_NAME.to_string()
}

fn default_connection_timeout_ms() -> u64 {
    3000
}

impl AppConfig {
    /// Load configuration from the TOML file named in the environment (or `.env`) or the default path
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, a malformed one is not
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified as {} (environment or .env) or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()
    }
}

impl CacheConfig {
    /// Create a new cache configuration
    pub fn new(name: String, redis_url: String, connection_timeout_ms: u64) -> Self {
        Self {
            name,
            redis_url,
            connection_timeout_ms,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_connection_timeout(mut self, timeout_ms: u64) -> Self {
        self.connection_timeout_ms = timeout_ms;
        self
    }

    /// Connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Cache name cannot be empty".to_string(),
            ));
        }
        if self.redis_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Redis URL cannot be empty".to_string(),
            ));
        }
        if self.connection_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "Cache connection_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            redis_url: "redis://localhost:6379".to_string(),
            connection_timeout_ms: default_connection_timeout_ms(),
        }
    }
}
