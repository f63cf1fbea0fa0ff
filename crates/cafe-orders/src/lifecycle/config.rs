//! Runtime configuration, read from the environment with defaults.

use thiserror::Error;

/// Mailbox capacity used when `CAFE_MAILBOX_CAPACITY` is unset.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Requests each actor buffers before senders start waiting.
    pub mailbox_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl SystemConfig {
    pub const MAILBOX_CAPACITY_VAR: &'static str = "CAFE_MAILBOX_CAPACITY";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`SystemConfig::from_env`] with the variables taken from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(Self::MAILBOX_CAPACITY_VAR) {
            config.mailbox_capacity = match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: Self::MAILBOX_CAPACITY_VAR,
                        value: raw,
                    })
                }
            };
        }
        Ok(config)
    }
}
