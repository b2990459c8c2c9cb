// ABOUTME: Required-field checks shared by every push callback handler
// ABOUTME: Reports the first missing field by name, correlator first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use crate::constants::ORDER_ID_FIELD;
use crate::core::CallbackFields;
use crate::errors::{TraceError, TraceResult};

/// Reject a zero correlator
///
/// # Errors
///
/// Returns `TraceError::CallbackParam` naming `orderId` when `order_id` is zero
pub fn require_order_id(order_id: i64) -> TraceResult<i64> {
    if order_id == 0 {
        return Err(TraceError::callback_param(ORDER_ID_FIELD));
    }
    Ok(order_id)
}

/// Fetch a required non-empty callback field
///
/// # Errors
///
/// Returns `TraceError::CallbackParam` naming `field` when it is absent or empty
pub fn require_field<'a>(fields: &'a CallbackFields, field: &'static str) -> TraceResult<&'a str> {
    fields
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| TraceError::callback_param(field))
}

/// Fetch an optional callback field, treating empty as absent
#[must_use]
pub fn optional_field<'a>(fields: &'a CallbackFields, field: &str) -> Option<&'a str> {
    fields
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> CallbackFields {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn test_zero_order_id() {
        let error = require_order_id(0).unwrap_err();
        assert!(matches!(error, TraceError::CallbackParam { field: "orderId" }));
        assert_eq!(require_order_id(33_334).unwrap(), 33_334);
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let fields = fields(&[("data", ""), ("param", "{}")]);
        assert!(matches!(
            require_field(&fields, "data"),
            Err(TraceError::CallbackParam { field: "data" })
        ));
        assert!(matches!(
            require_field(&fields, "sign"),
            Err(TraceError::CallbackParam { field: "sign" })
        ));
        assert_eq!(require_field(&fields, "param").unwrap(), "{}");
        assert_eq!(optional_field(&fields, "data"), None);
    }
}
