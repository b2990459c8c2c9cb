// ABOUTME: Canonical tracking result produced by every provider callback handler
// ABOUTME: Derives latest-event fields from the newest-first event list so the two never disagree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::status::{empty_if_none, CanonicalStatus};
use crate::constants::{SIGNED, UNSIGNED};
use crate::local_time;

/// One tracking milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEvent {
    /// When the milestone happened, if the provider reported it
    #[serde(default, with = "local_time::option")]
    pub time: Option<NaiveDateTime>,
    /// Free-text milestone description
    #[serde(default)]
    pub info: String,
}

impl TrackEvent {
    /// Create an event
    #[must_use]
    pub fn new(time: Option<NaiveDateTime>, info: impl Into<String>) -> Self {
        Self {
            time,
            info: info.into(),
        }
    }
}

/// Carrier metadata attached to a tracking result
///
/// Every field may be empty; an empty name means "unknown carrier".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierInfo {
    /// Display name
    #[serde(default, rename = "companyName")]
    pub name: String,
    /// Provider carrier code
    #[serde(default, rename = "companyCode")]
    pub code: String,
    /// Carrier website
    #[serde(default, rename = "companySite")]
    pub website: String,
    /// Carrier phone number
    #[serde(default, rename = "companyPhone")]
    pub phone: String,
    /// Carrier logo URL
    #[serde(default, rename = "companyLogo")]
    pub logo_url: String,
}

impl CarrierInfo {
    /// Carrier known only by code and display name
    #[must_use]
    pub fn named(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }
}

/// Canonical tracking state decoded from a push callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResult {
    /// Correlator supplied when subscribing
    #[serde(rename = "orderId", with = "super::order_id_string")]
    pub order_id: i64,
    /// Tracking number reported by the provider
    pub number: String,
    /// 1 when delivered and confirmed, otherwise 0
    #[serde(rename = "signed")]
    pub signed_flag: u8,
    /// Canonical status, `None` when the provider code is unmapped
    #[serde(default, with = "empty_if_none")]
    pub status: Option<CanonicalStatus>,
    /// Description of the newest event, empty if there are no events
    #[serde(rename = "lastTraceInfo")]
    pub latest_event_summary: String,
    /// Time of the newest event
    #[serde(rename = "lastTraceTime", default, with = "local_time::option")]
    pub latest_event_time: Option<NaiveDateTime>,
    /// Every event, newest first, in provider order
    #[serde(rename = "traces")]
    pub events: Vec<TrackEvent>,
    /// Carrier metadata
    #[serde(flatten)]
    pub carrier: CarrierInfo,
}

impl TrackingResult {
    /// Build a result from a newest-first event list
    ///
    /// The latest-event fields are taken from the first event; an empty list
    /// leaves them empty.
    #[must_use]
    pub fn new(order_id: i64, number: impl Into<String>, events: Vec<TrackEvent>) -> Self {
        let (latest_event_summary, latest_event_time) = events
            .first()
            .map(|event| (event.info.clone(), event.time))
            .unwrap_or_default();

        Self {
            order_id,
            number: number.into(),
            signed_flag: UNSIGNED,
            status: None,
            latest_event_summary,
            latest_event_time,
            events,
            carrier: CarrierInfo::default(),
        }
    }

    /// Set the signed flag from a delivered-and-confirmed indicator
    #[must_use]
    pub const fn with_signed(mut self, signed: bool) -> Self {
        self.signed_flag = if signed { SIGNED } else { UNSIGNED };
        self
    }

    /// Set the canonical status
    #[must_use]
    pub const fn with_status(mut self, status: Option<CanonicalStatus>) -> Self {
        self.status = status;
        self
    }

    /// Attach carrier metadata
    #[must_use]
    pub fn with_carrier(mut self, carrier: CarrierInfo) -> Self {
        self.carrier = carrier;
        self
    }

    /// Whether the shipment is delivered and confirmed
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signed_flag == SIGNED
    }

    /// Canonical status wire name, `""` when unmapped
    #[must_use]
    pub const fn status_name(&self) -> &'static str {
        CanonicalStatus::name_or_empty(self.status)
    }
}
