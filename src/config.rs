//! Runtime configuration
//!
//! Settings come from the environment and can be overridden by the caller
//! (the command-line front end maps its flags onto the same fields).
//!
//! | Variable              | Meaning                              | Default                 |
//! |-----------------------|--------------------------------------|-------------------------|
//! | `TERJEMAH_STORE_PATH` | Key-value store file                 | `.terjemah/store.json`  |
//! | `TERJEMAH_LATENCY_MS` | Simulated online latency in ms       | `500`                   |

use crate::translate::DEFAULT_LATENCY_MS;
use std::path::PathBuf;

pub const STORE_PATH_VAR: &str = "TERJEMAH_STORE_PATH";
pub const LATENCY_VAR: &str = "TERJEMAH_LATENCY_MS";
pub const DEFAULT_STORE_PATH: &str = ".terjemah/store.json";

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds an unusable value
    InvalidValue { name: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            latency_ms: DEFAULT_LATENCY_MS,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment
    ///
    /// # Errors
    /// - `TERJEMAH_LATENCY_MS` is set but not a non-negative integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(STORE_PATH_VAR).filter(|path| !path.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(LATENCY_VAR) {
            config.latency_ms =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: LATENCY_VAR.to_string(),
                        value: value.clone(),
                    })?;
        }

        Ok(config)
    }
}
