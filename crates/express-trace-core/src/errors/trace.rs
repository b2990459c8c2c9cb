// ABOUTME: Error taxonomy for subscribe, query and callback operations across all providers
// ABOUTME: Every variant maps to a stable numeric ErrorCode that callers can report upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! # Trace Error Types
//!
//! Errors are returned synchronously and never retried or swallowed inside an
//! adapter. The caller owns retry decisions, so every variant carries enough
//! context (provider name, provider message, missing field) to decide.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::GENERIC_REJECTION_MESSAGE;

/// Stable error codes reported for every `TraceError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    /// Request failed local validation
    #[serde(rename = "3011")]
    InvalidParameter = 3011,
    /// HTTP call could not be completed
    #[serde(rename = "3012")]
    TransportFailed = 3012,
    /// Provider response or payload could not be decoded
    #[serde(rename = "3013")]
    InvalidResponse = 3013,
    /// Provider envelope reported failure
    #[serde(rename = "3014")]
    ProviderRejected = 3014,
    /// Required callback field missing
    #[serde(rename = "3015")]
    MissingCallbackParameter = 3015,
    /// Callback authenticity check failed
    #[serde(rename = "3016")]
    SignatureMismatch = 3016,
}

impl ErrorCode {
    /// Numeric value of this code
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Human-readable description of this code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidParameter => "Express trace request parameters are invalid",
            Self::TransportFailed => "Express trace provider could not be reached",
            Self::InvalidResponse => "Express trace provider returned an unreadable response",
            Self::ProviderRejected => "Express trace provider rejected the request",
            Self::MissingCallbackParameter => "Express trace callback is missing a parameter",
            Self::SignatureMismatch => "Express trace callback signature verification failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Errors produced by provider adapters
#[derive(Debug, Error)]
pub enum TraceError {
    /// Request failed validation before any network call was made
    #[error("Invalid express trace parameter: {0}")]
    Param(String),

    /// HTTP call could not complete (network, DNS, timeout)
    #[error("{provider} request failed: {source}")]
    Transport {
        /// Provider that was being called
        provider: &'static str,
        /// Underlying transport failure
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// HTTP call completed but the body is not the expected envelope
    #[error("{provider} returned an invalid response: {source}")]
    Response {
        /// Provider that produced the body
        provider: &'static str,
        /// JSON decode failure
        #[source]
        source: serde_json::Error,
    },

    /// Envelope decoded but reports failure
    #[error("{provider} rejected the request: {message}")]
    ProviderRejected {
        /// Provider that rejected the request
        provider: &'static str,
        /// Provider message, or the generic rejection message
        message: String,
    },

    /// Required callback field is missing
    #[error("Missing callback parameter: {field}")]
    CallbackParam {
        /// Name of the first missing field
        field: &'static str,
    },

    /// Callback authenticity verification failed
    #[error("Callback signature verification failed")]
    Signature,

    /// Callback payload is not valid for the provider's expected shape
    #[error("{provider} callback payload is invalid: {reason}")]
    CallbackDecode {
        /// Provider whose payload failed to decode
        provider: &'static str,
        /// Decode failure details
        reason: String,
    },
}

impl TraceError {
    /// Create a parameter validation error
    #[must_use]
    pub fn param(message: impl Into<String>) -> Self {
        Self::Param(message.into())
    }

    /// Wrap a transport failure
    #[must_use]
    pub fn transport<E>(provider: &'static str, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Transport {
            provider,
            source: Box::new(source),
        }
    }

    /// Wrap an envelope decode failure
    #[must_use]
    pub const fn response(provider: &'static str, source: serde_json::Error) -> Self {
        Self::Response { provider, source }
    }

    /// Create a provider rejection, falling back to the generic message when
    /// the provider did not supply one
    #[must_use]
    pub fn rejected(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            GENERIC_REJECTION_MESSAGE.to_owned()
        } else {
            message
        };
        Self::ProviderRejected { provider, message }
    }

    /// Create a missing callback parameter error
    #[must_use]
    pub const fn callback_param(field: &'static str) -> Self {
        Self::CallbackParam { field }
    }

    /// Create a callback decode error
    #[must_use]
    pub fn callback_decode(provider: &'static str, reason: impl fmt::Display) -> Self {
        Self::CallbackDecode {
            provider,
            reason: reason.to_string(),
        }
    }

    /// Stable code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Param(_) => ErrorCode::InvalidParameter,
            Self::Transport { .. } => ErrorCode::TransportFailed,
            Self::Response { .. } | Self::CallbackDecode { .. } => ErrorCode::InvalidResponse,
            Self::ProviderRejected { .. } => ErrorCode::ProviderRejected,
            Self::CallbackParam { .. } => ErrorCode::MissingCallbackParameter,
            Self::Signature => ErrorCode::SignatureMismatch,
        }
    }

    /// Provider message carried by a rejection, if this is one
    #[must_use]
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::ProviderRejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for provider operations
pub type TraceResult<T> = Result<T, TraceError>;
