// ABOUTME: Canonical subscribe request carrying the caller's correlator and tracking number
// ABOUTME: Validated locally before any provider call so malformed requests never leave the process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use serde::{Deserialize, Serialize};

use crate::errors::{TraceError, TraceResult};

/// Request to receive push updates for one shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    /// Caller-assigned correlator echoed back on the push callback; never zero
    #[serde(with = "super::order_id_string")]
    pub order_id: i64,
    /// Tracking number in the provider's format
    pub number: String,
    /// Provider carrier code; empty lets the provider auto-detect
    #[serde(default, rename = "company")]
    pub carrier_hint: String,
}

impl SubscribeRequest {
    /// Create a request without a carrier hint
    #[must_use]
    pub fn new(order_id: i64, number: impl Into<String>) -> Self {
        Self {
            order_id,
            number: number.into(),
            carrier_hint: String::new(),
        }
    }

    /// Attach a provider carrier code
    #[must_use]
    pub fn with_carrier_hint(mut self, carrier: impl Into<String>) -> Self {
        self.carrier_hint = carrier.into();
        self
    }

    /// Carrier hint, if one was given
    #[must_use]
    pub fn carrier(&self) -> Option<&str> {
        Some(self.carrier_hint.as_str()).filter(|hint| !hint.is_empty())
    }

    /// Check the request before dispatch
    ///
    /// # Errors
    ///
    /// Returns `TraceError::Param` if the correlator is zero or the tracking
    /// number is empty
    pub fn validate(&self) -> TraceResult<()> {
        if self.order_id == 0 {
            return Err(TraceError::param("orderId is required"));
        }
        if self.number.trim().is_empty() {
            return Err(TraceError::param("number is required"));
        }
        Ok(())
    }
}
