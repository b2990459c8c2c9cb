// ABOUTME: Shared helpers for provider integration tests
// ABOUTME: Test logging setup, callback form builders and adapters pointed at a mock server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]

use std::sync::Once;

use express_trace_providers::{
    CallbackFields, FuqingConfig, FuqingProvider, Kuaidi100Config, Kuaidi100Provider,
};

static INIT_LOGGER: Once = Once::new();

/// Callback URL base used by every test adapter
pub const SUBSCRIBE_URL: &str = "https://shop.example.com/express/notify";

/// Salt the Kuaidi100 fixture was signed with
pub const KUAIDI100_SALT: &str = "123";

/// Signature of `fixtures/kuaidi100_callback.json` under `KUAIDI100_SALT`
pub const KUAIDI100_FIXTURE_SIGN: &str = "315EDA9CDABADA878C643EBFE3DBCF1B";

/// Raw Kuaidi100 push payload
pub const KUAIDI100_FIXTURE: &str = include_str!("fixtures/kuaidi100_callback.json");

/// Raw Fuqing push payload
pub const FUQING_FIXTURE: &str = include_str!("fixtures/fuqing_callback.json");

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Build callback form fields from pairs
pub fn fields(pairs: &[(&str, &str)]) -> CallbackFields {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

/// Kuaidi100 adapter talking to `api_base_url`
pub fn kuaidi100(api_base_url: &str) -> Kuaidi100Provider {
    init_test_logging();
    let config = Kuaidi100Config::new("test-key", "test-customer", SUBSCRIBE_URL, KUAIDI100_SALT)
        .with_api_base_url(api_base_url);
    Kuaidi100Provider::new(config).unwrap()
}

/// Fuqing adapter whose query and push hosts are both `base_url`
pub fn fuqing(base_url: &str) -> FuqingProvider {
    init_test_logging();
    let config = FuqingConfig::new("test-app-key", "test-app-secret", "test-app-code", SUBSCRIBE_URL)
        .with_query_base_url(base_url)
        .with_push_base_url(base_url);
    FuqingProvider::new(config).unwrap()
}
