// ABOUTME: Constants for the Fuqing express push and query APIs and their status vocabularies
// ABOUTME: Push callbacks and real-time queries use different status numbering, so each has a table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Fuqing API constants

use crate::models::CanonicalStatus;

/// Provider name used in logs and errors
pub const PROVIDER_NAME: &str = "fuqing";

// =============================================================================
// API URLs
// =============================================================================

/// Base URL of the push subscription API
pub const FUQING_PUSH_BASE_URL: &str = "http://expfeeds.market.alicloudapi.com";

/// Base URL of the real-time query API
pub const FUQING_QUERY_BASE_URL: &str = "http://wuliu.market.alicloudapi.com";

/// Subscribe endpoint, relative to the push base URL
pub const SUBSCRIBE_PATH: &str = "/expresspush";

/// Supported carrier list, relative to the push base URL
pub const COMPANIES_PATH: &str = "/pushExpressLists";

/// Real-time query endpoint, relative to the query base URL
pub const QUERY_PATH: &str = "/kdi";

/// Scheme prefix of the `Authorization` header value
pub const APPCODE_SCHEME: &str = "APPCODE";

/// Callback form field carrying the JSON payload
pub const DATA_FIELD: &str = "data";

/// `status` value of a successful real-time query
pub const QUERY_SUCCESS_STATUS: &str = "0";

/// `issign` value of a signed-for shipment in query results
pub const ISSIGN_SIGNED: &str = "1";

// =============================================================================
// Push callback states (`state`)
// =============================================================================

/// Wrong tracking number or carrier code
pub const STATE_WRONG: &str = "-1";
/// No tracking information yet
pub const STATE_NONE_YET: &str = "0";
/// Picked up
pub const STATE_ACCEPTED: &str = "1";
/// In transit
pub const STATE_IN_TRANSIT: &str = "2";
/// Signed for
pub const STATE_DELIVERED: &str = "3";
/// Problem shipment
pub const STATE_QUESTION: &str = "4";
/// Delivery exception
pub const STATE_EXCEPTION: &str = "5";
/// Returned to sender
pub const STATE_RETURNED: &str = "6";

// =============================================================================
// Real-time query delivery states (`deliverystatus`)
// =============================================================================

/// Picked up
pub const DELIVERY_ACCEPTED: &str = "0";
/// In transit
pub const DELIVERY_IN_TRANSIT: &str = "1";
/// Out for delivery
pub const DELIVERY_IN_PROGRESS: &str = "2";
/// Signed for
pub const DELIVERY_DELIVERED: &str = "3";
/// Delivery failed
pub const DELIVERY_FAILED: &str = "4";
/// Problem shipment
pub const DELIVERY_QUESTION: &str = "5";
/// Returned to sender
pub const DELIVERY_RETURNED: &str = "6";

/// Canonical status for a push callback `state`
#[must_use]
pub fn state_code(code: &str) -> Option<CanonicalStatus> {
    match code {
        STATE_WRONG => Some(CanonicalStatus::None),
        STATE_NONE_YET => Some(CanonicalStatus::NoneYet),
        STATE_ACCEPTED => Some(CanonicalStatus::Accepted),
        STATE_IN_TRANSIT => Some(CanonicalStatus::InTransit),
        STATE_DELIVERED => Some(CanonicalStatus::Delivered),
        STATE_QUESTION => Some(CanonicalStatus::Question),
        STATE_EXCEPTION => Some(CanonicalStatus::Exception),
        STATE_RETURNED => Some(CanonicalStatus::Returned),
        _ => None,
    }
}

/// Canonical status for a real-time query `deliverystatus`
#[must_use]
pub fn delivery_status_code(code: &str) -> Option<CanonicalStatus> {
    match code {
        DELIVERY_ACCEPTED => Some(CanonicalStatus::Accepted),
        DELIVERY_IN_TRANSIT => Some(CanonicalStatus::InTransit),
        DELIVERY_IN_PROGRESS => Some(CanonicalStatus::InProgress),
        DELIVERY_DELIVERED => Some(CanonicalStatus::Delivered),
        DELIVERY_FAILED => Some(CanonicalStatus::Exception),
        DELIVERY_QUESTION => Some(CanonicalStatus::Question),
        DELIVERY_RETURNED => Some(CanonicalStatus::Returned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_state_table() {
        let expected = [
            ("-1", CanonicalStatus::None),
            ("0", CanonicalStatus::NoneYet),
            ("1", CanonicalStatus::Accepted),
            ("2", CanonicalStatus::InTransit),
            ("3", CanonicalStatus::Delivered),
            ("4", CanonicalStatus::Question),
            ("5", CanonicalStatus::Exception),
            ("6", CanonicalStatus::Returned),
        ];
        for (code, status) in expected {
            assert_eq!(state_code(code), Some(status), "state {code}");
        }
        assert_eq!(state_code("7"), None);
        assert_eq!(state_code(""), None);
    }

    #[test]
    fn test_delivery_status_table() {
        assert_eq!(delivery_status_code("0"), Some(CanonicalStatus::Accepted));
        assert_eq!(delivery_status_code("2"), Some(CanonicalStatus::InProgress));
        assert_eq!(delivery_status_code("3"), Some(CanonicalStatus::Delivered));
        assert_eq!(delivery_status_code("4"), Some(CanonicalStatus::Exception));
        assert_eq!(delivery_status_code("-1"), None);
    }

    #[test]
    fn test_tables_disagree_where_numbering_differs() {
        // "1" is accepted in callbacks but in transit in queries
        assert_ne!(state_code("1"), delivery_status_code("1"));
    }
}
