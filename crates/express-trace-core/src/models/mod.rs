// ABOUTME: Canonical request, result and status models shared by all courier providers
// ABOUTME: Adapters decode provider wire formats internally and only expose these types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! # Canonical Model
//!
//! - **`SubscribeRequest`**: what a caller asks a provider to watch
//! - **`TrackingResult`**: what every callback decodes into
//! - **`TrackEvent`**: one milestone, newest first
//! - **`CanonicalStatus`**: the provider-independent status vocabulary
//!
//! All of these are created per request or per callback and dropped once the
//! caller has consumed them.

mod request;
mod status;
mod tracking;

pub use request::SubscribeRequest;
pub use status::CanonicalStatus;
pub use tracking::{CarrierInfo, TrackEvent, TrackingResult};

/// Serde adapter writing `i64` correlators as JSON strings
pub(crate) mod order_id_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOrderId {
        Text(String),
        Number(i64),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // serde `with` signature
    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawOrderId::deserialize(deserializer)? {
            RawOrderId::Number(value) => Ok(value),
            RawOrderId::Text(text) => text.trim().parse().map_err(D::Error::custom),
        }
    }
}
