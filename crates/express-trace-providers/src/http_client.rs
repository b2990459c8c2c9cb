// ABOUTME: Shared HTTP client with connection pooling for courier provider API calls
// ABOUTME: Singleton pattern with configurable timeouts initialized once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, RequestBuilder};

use crate::errors::{TraceError, TraceResult};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Timeouts applied to the shared provider client
///
/// Adapters never impose timeouts of their own; a caller that needs one sets
/// it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientSettings {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientSettings {
    /// Build a client with these timeouts
    ///
    /// Falls back to an untuned client if the TLS backend cannot be configured.
    #[must_use]
    pub fn build_client(&self) -> Client {
        ClientBuilder::new()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Configured settings for the shared client
static CLIENT_SETTINGS: OnceLock<HttpClientSettings> = OnceLock::new();

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Set the shared client's timeouts
///
/// Must be called before the first adapter is constructed; later calls are
/// ignored. Without it the defaults (30s request, 10s connect) apply.
pub fn initialize_shared_client(settings: HttpClientSettings) {
    let _ = CLIENT_SETTINGS.set(settings);
}

/// Get a handle to the shared HTTP client
///
/// `reqwest::Client` is reference-counted, so the returned clone shares one
/// connection pool with every other adapter.
pub fn shared_client() -> Client {
    SHARED_CLIENT
        .get_or_init(|| {
            CLIENT_SETTINGS
                .get()
                .copied()
                .unwrap_or_default()
                .build_client()
        })
        .clone()
}

/// Send a prepared request and read the whole body as text
///
/// HTTP status codes are not inspected here; providers report failure inside
/// their JSON envelope, so the body is always handed back for decoding.
///
/// # Errors
///
/// Returns `TraceError::Transport` if the request cannot be sent or the body
/// cannot be read
pub async fn fetch_text(request: RequestBuilder, provider: &'static str) -> TraceResult<String> {
    let response = request
        .send()
        .await
        .map_err(|e| TraceError::transport(provider, e))?;
    response
        .text()
        .await
        .map_err(|e| TraceError::transport(provider, e))
}
