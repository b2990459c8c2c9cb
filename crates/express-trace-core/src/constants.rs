// ABOUTME: Shared constants for callback field names, canonical messages and time formats
// ABOUTME: Keeps wire-level names that every provider adapter must agree on in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

/// Correlator parameter appended to every registered callback URL
pub const ORDER_ID_FIELD: &str = "orderId";

/// Message used when a provider rejects a request without saying why ("request failed")
pub const GENERIC_REJECTION_MESSAGE: &str = "请求失败";

/// Timestamp layout used by every supported provider
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `signed` flag value for a shipment that is delivered and confirmed
pub const SIGNED: u8 = 1;

/// `signed` flag value for a shipment that is not yet confirmed delivered
pub const UNSIGNED: u8 = 0;
