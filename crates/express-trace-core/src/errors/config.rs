// ABOUTME: Configuration error types raised while constructing provider adapters
// ABOUTME: Missing credentials and unknown provider names fail fast before any call is made
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required configuration value is missing or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Provider name does not match any supported provider
    #[error("Unknown express trace provider: {0}")]
    UnknownProvider(String),

    /// Configuration value could not be parsed
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Configuration key that failed to parse
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Fail with `MissingField` when `value` is empty
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField(field)` if `value` is empty
    pub fn require(field: &'static str, value: &str) -> Result<(), Self> {
        if value.is_empty() {
            return Err(Self::MissingField(field));
        }
        Ok(())
    }
}
