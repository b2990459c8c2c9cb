// ABOUTME: Serde helper that decodes JSON null the same way as an absent field
// ABOUTME: Providers send null for blank text, empty lists and missing result objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Use as `#[serde(default, deserialize_with = "nullable::or_default")]`.

use serde::{Deserialize, Deserializer};

/// Deserialize `T`, mapping `null` to `T::default()`
///
/// # Errors
///
/// Fails when the value is neither `null` nor a valid `T`
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
