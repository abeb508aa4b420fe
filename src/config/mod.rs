//! Configuration loading and management

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::core::entity::QuoteDefaults;
use crate::core::quotation::is_valid_prefix;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Longest accepted default validity of a quote, ten years
pub const MAX_EXPIRY_DAYS: i64 = 3650;

/// Settings of the quotes module
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuotesConfig {
    /// Simulated latency of every access layer call, in milliseconds
    pub latency_ms: u64,

    /// Days between creation and the default expiry date
    pub default_expiry_days: i64,

    /// A quote expiring within this many days is flagged on its card
    pub expiring_soon_days: i64,

    /// Prefix of generated quotation numbers
    pub quotation_prefix: String,

    /// Buffer size of the notification bus
    pub event_capacity: usize,

    /// Load the bundled seed quotes at startup
    pub seed: bool,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            default_expiry_days: 30,
            expiring_soon_days: 7,
            quotation_prefix: "QUO".to_string(),
            event_capacity: 1024,
            seed: true,
        }
    }
}

impl QuotesConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration without latency and without seed data, for tests
    pub fn instant() -> Self {
        Self {
            latency_ms: 0,
            seed: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EXPIRY_DAYS).contains(&self.default_expiry_days) {
            return Err(ConfigError::InvalidValue {
                field: "default_expiry_days".to_string(),
                message: format!("must be between 1 and {}", MAX_EXPIRY_DAYS),
            });
        }
        if self.expiring_soon_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "expiring_soon_days".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "event_capacity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !is_valid_prefix(&self.quotation_prefix) {
            return Err(ConfigError::InvalidValue {
                field: "quotation_prefix".to_string(),
                message: "must be uppercase letters and digits, starting with a letter".to_string(),
            });
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn quote_defaults(&self) -> QuoteDefaults {
        QuoteDefaults {
            quotation_prefix: self.quotation_prefix.clone(),
            expiry_days: self.default_expiry_days,
        }
    }
}
