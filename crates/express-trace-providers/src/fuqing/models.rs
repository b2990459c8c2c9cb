// ABOUTME: Fuqing response DTOs for subscribe, push callbacks and real-time queries
// ABOUTME: Callbacks carry full carrier metadata, so no directory lookup is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::constants::{delivery_status_code, state_code, ISSIGN_SIGNED, STATE_DELIVERED};
use crate::local_time;
use crate::nullable;
use crate::models::{CanonicalStatus, CarrierInfo, TrackEvent, TrackingResult};

/// Subscribe response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct SubscribeEnvelope {
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub status: bool,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub code: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub message: String,
}

/// Real-time query response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct QueryEnvelope {
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub msg: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub result: FuqingSnapshot,
}

/// One push callback milestone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CallbackTrace {
    #[serde(with = "local_time::option")]
    pub time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub content: String,
}

/// Decoded `data` field of a push callback
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CallbackPayload {
    #[serde(deserialize_with = "nullable::or_default")]
    pub code: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub no: String,
    #[serde(rename = "type", deserialize_with = "nullable::or_default")]
    pub carrier_code: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub state: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub site: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub phone: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub logo: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub list: Vec<CallbackTrace>,
}

impl CallbackPayload {
    /// Canonical result for `order_id`
    ///
    /// Signed means the push state is exactly `"3"`.
    #[must_use]
    pub fn into_tracking_result(self, order_id: i64) -> TrackingResult {
        let signed = self.state == STATE_DELIVERED;
        let status = state_code(&self.state);
        let events = self
            .list
            .into_iter()
            .map(|trace| TrackEvent::new(trace.time, trace.content))
            .collect();

        TrackingResult::new(order_id, self.no, events)
            .with_signed(signed)
            .with_status(status)
            .with_carrier(CarrierInfo {
                name: self.name,
                code: self.carrier_code,
                website: self.site,
                phone: self.phone,
                logo_url: self.logo,
            })
    }
}

/// One real-time query milestone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuqingTrace {
    /// Milestone time
    #[serde(with = "local_time::option")]
    pub time: Option<NaiveDateTime>,
    /// Milestone description
    #[serde(deserialize_with = "nullable::or_default")]
    pub status: String,
}

/// Current tracking state returned by a real-time query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuqingSnapshot {
    /// Tracking number
    #[serde(deserialize_with = "nullable::or_default")]
    pub number: String,
    /// Carrier code
    #[serde(rename = "type", deserialize_with = "nullable::or_default")]
    pub carrier_code: String,
    /// Delivery status code
    #[serde(deserialize_with = "nullable::or_default")]
    pub deliverystatus: String,
    /// `"1"` once signed for
    #[serde(deserialize_with = "nullable::or_default")]
    pub issign: String,
    /// Carrier name
    #[serde(rename = "expName", deserialize_with = "nullable::or_default")]
    pub exp_name: String,
    /// Carrier website
    #[serde(rename = "expSite", deserialize_with = "nullable::or_default")]
    pub exp_site: String,
    /// Carrier phone number
    #[serde(rename = "expPhone", deserialize_with = "nullable::or_default")]
    pub exp_phone: String,
    /// Carrier logo URL
    #[serde(deserialize_with = "nullable::or_default")]
    pub logo: String,
    /// Courier name
    #[serde(deserialize_with = "nullable::or_default")]
    pub courier: String,
    /// Courier phone number
    #[serde(rename = "courierPhone", deserialize_with = "nullable::or_default")]
    pub courier_phone: String,
    /// Time of the newest milestone
    #[serde(rename = "updateTime", with = "local_time::option")]
    pub update_time: Option<NaiveDateTime>,
    /// Elapsed time from pickup to delivery, free text
    #[serde(rename = "takeTime", deserialize_with = "nullable::or_default")]
    pub take_time: String,
    /// Milestones, newest first
    #[serde(deserialize_with = "nullable::or_default")]
    pub list: Vec<FuqingTrace>,
}

impl FuqingSnapshot {
    /// Whether the shipment is signed for
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.issign == ISSIGN_SIGNED
    }

    /// Canonical status, `None` for unmapped delivery codes
    #[must_use]
    pub fn canonical_status(&self) -> Option<CanonicalStatus> {
        delivery_status_code(&self.deliverystatus)
    }

    /// Milestones in canonical form, newest first
    #[must_use]
    pub fn events(&self) -> Vec<TrackEvent> {
        self.list
            .iter()
            .map(|trace| TrackEvent::new(trace.time, trace.status.clone()))
            .collect()
    }

    /// Carrier metadata
    #[must_use]
    pub fn carrier(&self) -> CarrierInfo {
        CarrierInfo {
            name: self.exp_name.clone(),
            code: self.carrier_code.clone(),
            website: self.exp_site.clone(),
            phone: self.exp_phone.clone(),
            logo_url: self.logo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_scenario() {
        let payload: CallbackPayload = serde_json::from_str(
            r#"{"state":"3","no":"X1","list":[{"time":"2022-06-30 10:34:52","content":"signed"}]}"#,
        )
        .unwrap();
        let result = payload.into_tracking_result(33_334);

        assert_eq!(result.order_id, 33_334);
        assert_eq!(result.number, "X1");
        assert!(result.is_signed());
        assert_eq!(result.status, Some(CanonicalStatus::Delivered));
        assert_eq!(result.latest_event_summary, "signed");
        assert_eq!(
            result.latest_event_time,
            local_time::parse("2022-06-30 10:34:52").unwrap()
        );
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_unmapped_state_is_unsigned_and_statusless() {
        let payload: CallbackPayload =
            serde_json::from_str(r#"{"state":"9","no":"X2","list":[]}"#).unwrap();
        let result = payload.into_tracking_result(1);
        assert!(!result.is_signed());
        assert_eq!(result.status, None);
        assert!(result.latest_event_summary.is_empty());
        assert!(result.latest_event_time.is_none());
    }

    #[test]
    fn test_snapshot_accessors() {
        let snapshot: FuqingSnapshot = serde_json::from_value(serde_json::json!({
            "number": "780098068058",
            "type": "ZTO",
            "deliverystatus": "3",
            "issign": "1",
            "expName": "中通快递",
            "expSite": "www.zto.com",
            "expPhone": "95311",
            "updateTime": "2018-02-28 17:24:27",
            "takeTime": "2天20小时14分",
            "list": [
                {"time": "2018-02-28 17:24:27", "status": "已签收"},
                {"time": "2018-02-28 07:33:37", "status": "派件中"}
            ]
        }))
        .unwrap();

        assert!(snapshot.is_signed());
        assert_eq!(snapshot.canonical_status(), Some(CanonicalStatus::Delivered));
        assert_eq!(snapshot.events()[0].info, "已签收");
        assert_eq!(snapshot.carrier().name, "中通快递");
        assert_eq!(snapshot.carrier().code, "ZTO");
    }
}
