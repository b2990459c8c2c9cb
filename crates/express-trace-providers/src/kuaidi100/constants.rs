// ABOUTME: Constants for the Kuaidi100 poll API and its state code vocabulary
// ABOUTME: Maps Kuaidi100 state codes onto canonical statuses; unmapped codes yield None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Kuaidi100 API constants

use crate::models::CanonicalStatus;

/// Provider name used in logs and errors
pub const PROVIDER_NAME: &str = "kuaidi100";

// =============================================================================
// API URLs
// =============================================================================

/// Base URL of the Kuaidi100 poll API
pub const KUAIDI100_API_BASE_URL: &str = "https://poll.kuaidi100.com";

/// Subscribe endpoint, relative to the base URL
pub const SUBSCRIBE_PATH: &str = "/poll";

/// Real-time query endpoint, relative to the base URL
pub const QUERY_PATH: &str = "/poll/query.do";

/// Content type announced on subscribe even though parameters travel in the query string
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Response schema requested on subscribe
pub const SUBSCRIBE_SCHEMA: &str = "json";

// =============================================================================
// Request and callback fields
// =============================================================================

/// Callback form field carrying the JSON payload
pub const PARAM_FIELD: &str = "param";

/// Callback form field carrying the payload signature
pub const SIGN_FIELD: &str = "sign";

/// Let Kuaidi100 detect the carrier from the tracking number
pub const AUTO_DETECT_CARRIER: &str = "1";

/// Request the basic (non-`resultv2`) payload shape
pub const RESULT_V2_DISABLED: &str = "0";

/// `status` value of a successful real-time query
pub const QUERY_SUCCESS_STATUS: &str = "200";

/// `ischeck` value of a delivered and confirmed shipment
pub const ISCHECK_SIGNED: &str = "1";

/// `ischeck` value of a shipment not yet confirmed
pub const ISCHECK_UNSIGNED: &str = "0";

// =============================================================================
// State codes
// Reference: Kuaidi100 push documentation, `lastResult.state`
// =============================================================================

/// In transit
pub const STATE_IN_TRANSIT: &str = "0";
/// Picked up
pub const STATE_ACCEPTED: &str = "1";
/// Problem shipment
pub const STATE_EXCEPTION: &str = "2";
/// Signed for
pub const STATE_DELIVERED: &str = "3";
/// Canceled
pub const STATE_CANCELED: &str = "4";
/// Out for delivery
pub const STATE_IN_PROGRESS: &str = "5";
/// Returned to sender
pub const STATE_RETURNED: &str = "6";
/// Handed to another carrier
pub const STATE_TRANSFER: &str = "7";
/// Customs clearance
pub const STATE_CLEARANCE: &str = "8";
/// Refused by the recipient
pub const STATE_REFUSED: &str = "14";

/// Canonical status for a Kuaidi100 state code
///
/// Sub-states such as `"304"` are not mapped and yield `None`.
#[must_use]
pub fn state_code(code: &str) -> Option<CanonicalStatus> {
    match code {
        STATE_IN_TRANSIT => Some(CanonicalStatus::InTransit),
        STATE_ACCEPTED => Some(CanonicalStatus::Accepted),
        STATE_EXCEPTION => Some(CanonicalStatus::Exception),
        STATE_DELIVERED => Some(CanonicalStatus::Delivered),
        STATE_CANCELED => Some(CanonicalStatus::Canceled),
        STATE_IN_PROGRESS => Some(CanonicalStatus::InProgress),
        STATE_RETURNED => Some(CanonicalStatus::Returned),
        STATE_TRANSFER => Some(CanonicalStatus::Transfer),
        STATE_CLEARANCE => Some(CanonicalStatus::Clearance),
        STATE_REFUSED => Some(CanonicalStatus::Refused),
        _ => None,
    }
}
