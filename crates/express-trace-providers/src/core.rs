// ABOUTME: Core provider trait for unified shipment tracking across courier query providers
// ABOUTME: Subscribe registers a push callback; handle_callback decodes it into a TrackingResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! # The `ExpressTrace` Contract
//!
//! Every courier query provider implements two operations:
//!
//! 1. **subscribe** - translate a canonical `SubscribeRequest` into the
//!    provider's HTTP parameters and register a push callback whose URL
//!    carries the caller's `orderId` correlator.
//! 2. **`handle_callback`** - given that correlator and the raw form fields of
//!    the provider's push notification, verify authenticity where the
//!    provider signs its payloads, decode the provider JSON and return a
//!    canonical `TrackingResult`.
//!
//! ## Provider-Specific Details vs Shared Interface
//!
//! - **Internal**: providers keep their own DTOs and status tables
//! - **External**: providers expose only the canonical model
//! - **Stateless**: no adapter keeps request or result state between calls
//!
//! Provider-specific extras (point-in-time queries, carrier lists) are
//! inherent methods on each adapter rather than part of the trait.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::TraceResult;
use crate::models::{SubscribeRequest, TrackingResult};

/// Raw key/value fields of an inbound push notification, as decoded from a
/// form-encoded POST body
pub type CallbackFields = HashMap<String, String>;

/// Unified courier query provider interface
#[async_trait]
pub trait ExpressTrace: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &'static str;

    /// Register interest in push updates for `request.number`
    ///
    /// Issues exactly one outbound HTTP call and changes no local state.
    ///
    /// # Errors
    ///
    /// - `TraceError::Param` if the request fails validation
    /// - `TraceError::Transport` if the HTTP call cannot complete
    /// - `TraceError::Response` if the body is not the provider's envelope
    /// - `TraceError::ProviderRejected` if the envelope reports failure
    async fn subscribe(&self, request: &SubscribeRequest) -> TraceResult<()>;

    /// Decode a push callback into the canonical tracking result
    ///
    /// `order_id` is the correlator recovered from the callback URL, not from
    /// the payload.
    ///
    /// # Errors
    ///
    /// - `TraceError::CallbackParam` naming the first missing required field
    /// - `TraceError::Signature` if authenticity verification fails; the
    ///   payload is not decoded in that case
    /// - `TraceError::CallbackDecode` if the payload does not match the
    ///   provider's shape
    fn handle_callback(&self, order_id: i64, fields: &CallbackFields)
        -> TraceResult<TrackingResult>;
}
