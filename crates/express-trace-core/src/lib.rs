// ABOUTME: Core types for the Express Trace shipment tracking platform
// ABOUTME: Foundation crate with the canonical tracking model, error taxonomy and time codec
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

#![deny(unsafe_code)]

//! # Express Trace Core
//!
//! Foundation crate providing the provider-neutral types every courier query
//! adapter produces. Provider crates decode their own wire formats and only
//! ever hand these types back to callers.
//!
//! ## Modules
//!
//! - **errors**: `TraceError` with stable `ErrorCode`s, plus `ConfigError`
//! - **models**: subscribe requests, tracking results and the canonical status vocabulary
//! - **local_time**: `"YYYY-MM-DD HH:MM:SS"` wall-clock timestamps used by providers
//! - **constants**: shared field names and messages
//! - **nullable**: decode provider `null`s as empty values

/// Shared field names, messages and formats
pub mod constants;

/// Unified error handling with stable error codes
pub mod errors;

/// Wall-clock timestamp codec for provider payloads
pub mod local_time;

/// Canonical request and tracking result models
pub mod models;

/// Null-tolerant serde decoding for provider payloads
pub mod nullable;

pub use errors::{ConfigError, ErrorCode, TraceError, TraceResult};
pub use models::{CanonicalStatus, CarrierInfo, SubscribeRequest, TrackEvent, TrackingResult};
