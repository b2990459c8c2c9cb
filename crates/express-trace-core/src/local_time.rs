// ABOUTME: Codec for the "YYYY-MM-DD HH:MM:SS" wall-clock timestamps courier providers emit
// ABOUTME: Empty strings and nulls decode to None so missing milestones never fail a whole payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Courier providers report milestone times as local wall-clock strings with no
//! offset. They are kept as `NaiveDateTime`; attaching a zone is the caller's
//! business.
//!
//! Use with serde as `#[serde(default, with = "local_time::option")]`.

use chrono::format::ParseError;
use chrono::NaiveDateTime;

use crate::constants::LOCAL_TIME_FORMAT;

/// Parse a provider timestamp; blank input yields `None`
///
/// # Errors
///
/// Returns a `ParseError` if the value is non-blank and not in
/// `YYYY-MM-DD HH:MM:SS` layout
pub fn parse(value: &str) -> Result<Option<NaiveDateTime>, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(trimmed, LOCAL_TIME_FORMAT).map(Some)
}

/// Render a timestamp in provider layout
#[must_use]
pub fn format(value: &NaiveDateTime) -> String {
    value.format(LOCAL_TIME_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDateTime>` fields
pub mod option {
    use chrono::NaiveDateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `"YYYY-MM-DD HH:MM:SS"` or `null`
    ///
    /// # Errors
    ///
    /// Propagates serializer failures
    #[allow(clippy::ref_option)] // serde `with` signature
    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&super::format(time)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a string, `""` or `null`
    ///
    /// # Errors
    ///
    /// Fails when the string is non-blank and not in provider layout
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.as_deref()
            .map_or(Ok(None), |value| super::parse(value).map_err(D::Error::custom))
    }
}
