//! Configuration error types

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// A variable is present but cannot be parsed into the expected type
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// The environment variable name
        key: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create a new missing-variable error
    pub fn missing<S: Into<String>>(key: S) -> Self {
        ConfigError::MissingVar(key.into())
    }

    /// Create a new invalid-value error
    pub fn invalid<S: Into<String>>(key: S, reason: S) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
