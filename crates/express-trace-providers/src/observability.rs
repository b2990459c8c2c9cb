// ABOUTME: One structured log record per provider operation, success or failure
// ABOUTME: Captures tracking number, raw provider body or callback payload, and the resulting error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Per-call observability record
//!
//! Each public adapter operation creates a `CallLog`, lets the operation body
//! record the raw wire text it saw, and passes the body's `Result` through
//! [`CallLog::finish`]. Because the body is a separate function, every early
//! return (validation, transport, decode, rejection) ends up in `finish`, so
//! every exit path emits exactly one record.

use tracing::{info, warn};

use crate::errors::TraceResult;

/// Accumulates the fields of one operation's log record
#[derive(Debug)]
#[must_use = "a CallLog only emits its record when finished"]
pub struct CallLog {
    provider: &'static str,
    operation: &'static str,
    order_id: Option<i64>,
    number: String,
    response: String,
}

impl CallLog {
    /// Start recording an operation
    pub fn start(provider: &'static str, operation: &'static str, number: &str) -> Self {
        Self {
            provider,
            operation,
            order_id: None,
            number: number.to_owned(),
            response: String::new(),
        }
    }

    /// Attach the caller's correlator
    pub const fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Set the tracking number once it is known (callbacks learn it from the payload)
    pub fn set_number(&mut self, number: &str) {
        number.clone_into(&mut self.number);
    }

    /// Record the raw provider response body or callback payload
    pub fn record_response(&mut self, raw: &str) {
        raw.clone_into(&mut self.response);
    }

    /// Emit the record for `result` and hand the result back unchanged
    ///
    /// # Errors
    ///
    /// Returns `result`'s error unchanged
    pub fn finish<T>(self, result: TraceResult<T>) -> TraceResult<T> {
        match &result {
            Ok(_) => info!(
                provider = self.provider,
                operation = self.operation,
                order_id = self.order_id,
                number = %self.number,
                response = %self.response,
                "express trace call completed"
            ),
            Err(error) => warn!(
                provider = self.provider,
                operation = self.operation,
                order_id = self.order_id,
                number = %self.number,
                response = %self.response,
                error = %error,
                code = error.code().as_u16(),
                "express trace call failed"
            ),
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use super::capture::logs_of;
    use super::*;
    use crate::errors::TraceError;

    fn finished(error: Option<TraceError>) -> Vec<String> {
        logs_of(|| {
            let mut log = CallLog::start("kuaidi100", "subscribe", "X1").with_order_id(33_334);
            log.record_response(r#"{"result":false}"#);
            let result = error.map_or(Ok(()), Err);
            let _ = log.finish(result);
        })
    }

    #[test]
    fn test_finish_passes_result_through() {
        let log = CallLog::start("kuaidi100", "subscribe", "X1");
        assert_eq!(log.finish(Ok(7)).unwrap(), 7);

        let log = CallLog::start("kuaidi100", "subscribe", "X1");
        let error = log.finish::<()>(Err(TraceError::Signature)).unwrap_err();
        assert!(matches!(error, TraceError::Signature));
    }

    #[test]
    fn test_success_emits_one_info_record() {
        let lines = finished(None);
        assert_eq!(lines.len(), 1, "{lines:?}");
        let line = &lines[0];
        assert!(line.contains("INFO"));
        assert!(line.contains("order_id=33334"));
        assert!(line.contains("number=X1"));
        assert!(line.contains(r#"response={"result":false}"#));
        assert!(!line.contains("error="));
    }

    #[test]
    fn test_each_failure_emits_one_warn_record() {
        let failures = [
            (TraceError::param("number is required"), 3011),
            (
                TraceError::response(
                    "kuaidi100",
                    serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
                ),
                3013,
            ),
            (TraceError::rejected("kuaidi100", "单号错误".to_owned()), 3014),
            (TraceError::Signature, 3016),
        ];
        for (error, code) in failures {
            let message = error.to_string();
            let lines = finished(Some(error));
            assert_eq!(lines.len(), 1, "{lines:?}");
            let line = &lines[0];
            assert!(line.contains("WARN"));
            assert!(line.contains("order_id=33334"));
            assert!(line.contains("number=X1"));
            assert!(line.contains(r#"response={"result":false}"#));
            assert!(line.contains(&format!("error={message}")), "{line}");
            assert!(line.contains(&format!("code={code}")), "{line}");
        }
    }

    #[test]
    fn test_number_learned_later_is_logged() {
        let lines = logs_of(|| {
            let mut log = CallLog::start("fuqing", "callback", "").with_order_id(7);
            log.set_number("JD0076810087472");
            let _ = log.finish(Ok(()));
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("number=JD0076810087472"));
    }
}
