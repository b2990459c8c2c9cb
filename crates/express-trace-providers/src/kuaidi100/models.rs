// ABOUTME: Kuaidi100 request and response DTOs for subscribe, push callbacks and real-time queries
// ABOUTME: Push callbacks and queries share one tracking snapshot shape converted to the canonical result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::companies::company_name;
use super::constants::{state_code, ISCHECK_SIGNED, ISCHECK_UNSIGNED, PROVIDER_NAME};
use crate::errors::{TraceError, TraceResult};
use crate::local_time;
use crate::nullable;
use crate::models::{CanonicalStatus, CarrierInfo, TrackEvent, TrackingResult};

// =============================================================================
// Outbound
// =============================================================================

/// JSON carried in the `param` query parameter of a subscribe call
#[derive(Debug, Serialize)]
pub(crate) struct SubscribeParam<'a> {
    pub company: &'a str,
    pub key: &'a str,
    pub number: &'a str,
    pub parameters: SubscribeOptions<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscribeOptions<'a> {
    #[serde(rename = "autoCom")]
    pub auto_com: &'a str,
    pub callbackurl: &'a str,
    pub resultv2: &'a str,
    pub salt: &'a str,
}

/// JSON carried in the `param` form field of a real-time query
#[derive(Debug, Serialize)]
pub(crate) struct QueryParam<'a> {
    pub com: &'a str,
    pub num: &'a str,
    pub resultv2: &'a str,
}

// =============================================================================
// Inbound
// =============================================================================

/// Subscribe response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct SubscribeEnvelope {
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub result: bool,
    #[serde(default, rename = "returnCode", deserialize_with = "nullable::or_default")]
    pub return_code: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub message: String,
}

/// Decoded `param` field of a push callback
#[derive(Debug, Deserialize)]
pub(crate) struct CallbackPayload {
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub message: String,
    #[serde(rename = "lastResult")]
    pub last_result: Kuaidi100Snapshot,
}

/// One tracking milestone as Kuaidi100 reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kuaidi100Trace {
    /// Milestone time
    #[serde(with = "local_time::option")]
    pub time: Option<NaiveDateTime>,
    /// Milestone description
    #[serde(deserialize_with = "nullable::or_default")]
    pub context: String,
    /// Formatted milestone time
    #[serde(with = "local_time::option")]
    pub ftime: Option<NaiveDateTime>,
    /// Sub-state label, when Kuaidi100 provides one
    pub status: Option<String>,
    /// Sub-state code, when Kuaidi100 provides one
    #[serde(rename = "statusCode")]
    pub status_code: Option<String>,
}

/// A place on the shipment's route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteNode {
    /// Administrative area code
    #[serde(deserialize_with = "nullable::or_default")]
    pub number: String,
    /// Human-readable area name
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
}

/// Route summary attached to newer payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteInfo {
    /// Origin
    pub from: Option<RouteNode>,
    /// Current position
    pub cur: Option<RouteNode>,
    /// Destination
    pub to: Option<RouteNode>,
}

/// Full tracking state of one shipment
///
/// This is the `lastResult` object of a push callback and also the whole body
/// of a real-time query. Text fields the provider sends as `null` decode as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kuaidi100Snapshot {
    /// Provider message, `"ok"` on success
    #[serde(deserialize_with = "nullable::or_default")]
    pub message: String,
    /// Tracking number
    #[serde(deserialize_with = "nullable::or_default")]
    pub nu: String,
    /// `"1"` once delivered and confirmed, otherwise `"0"`
    #[serde(deserialize_with = "nullable::or_default")]
    pub ischeck: String,
    /// Carrier code
    #[serde(deserialize_with = "nullable::or_default")]
    pub com: String,
    /// HTTP-like status, `"200"` on success
    #[serde(deserialize_with = "nullable::or_default")]
    pub status: String,
    /// Kuaidi100 state code
    #[serde(deserialize_with = "nullable::or_default")]
    pub state: String,
    /// Internal condition code
    #[serde(deserialize_with = "nullable::or_default")]
    pub condition: String,
    /// Milestones, newest first
    #[serde(deserialize_with = "nullable::or_default")]
    pub data: Vec<Kuaidi100Trace>,
    /// Route summary
    #[serde(rename = "routeInfo")]
    pub route_info: Option<RouteInfo>,
    /// Whether the shipment is looping between sites
    #[serde(rename = "isLoop", deserialize_with = "nullable::or_default")]
    pub is_loop: bool,
}

impl Kuaidi100Snapshot {
    /// Delivered-and-confirmed flag
    ///
    /// # Errors
    ///
    /// Returns `TraceError::CallbackDecode` if `ischeck` is neither `"0"` nor `"1"`
    pub fn is_signed(&self) -> TraceResult<bool> {
        match self.ischeck.trim() {
            ISCHECK_SIGNED => Ok(true),
            ISCHECK_UNSIGNED => Ok(false),
            other => Err(TraceError::callback_decode(
                PROVIDER_NAME,
                format!("ischeck must be 0 or 1, got {other:?}"),
            )),
        }
    }

    /// Canonical status, `None` for unmapped state codes
    #[must_use]
    pub fn canonical_status(&self) -> Option<CanonicalStatus> {
        state_code(&self.state)
    }

    /// Milestones in canonical form, newest first
    #[must_use]
    pub fn events(&self) -> Vec<TrackEvent> {
        self.data
            .iter()
            .map(|trace| TrackEvent::new(trace.time, trace.context.clone()))
            .collect()
    }

    /// Carrier code and its directory name
    ///
    /// An unknown code keeps the code and leaves the name empty.
    #[must_use]
    pub fn carrier(&self) -> CarrierInfo {
        CarrierInfo::named(self.com.clone(), company_name(&self.com).unwrap_or_default())
    }

    /// Convert into the canonical tracking result for `order_id`
    ///
    /// # Errors
    ///
    /// Returns `TraceError::CallbackDecode` if the signed flag is malformed
    pub fn into_tracking_result(self, order_id: i64) -> TraceResult<TrackingResult> {
        let signed = self.is_signed()?;
        let status = self.canonical_status();
        let carrier = self.carrier();
        let events = self.events();
        Ok(TrackingResult::new(order_id, self.nu, events)
            .with_signed(signed)
            .with_status(status)
            .with_carrier(carrier))
    }
}
