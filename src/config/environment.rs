// ABOUTME: Environment-based configuration for Kuaidi100, Fuqing and the shared HTTP client
// ABOUTME: Missing credentials surface when a provider is built, not when the environment is read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Environment configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `KUAIDI100_KEY`, `KUAIDI100_CUSTOMER`, `KUAIDI100_SIGN_SALT`, `KUAIDI100_SUBSCRIBE_URL` | required |
//! | `KUAIDI100_API_BASE` | `https://poll.kuaidi100.com` |
//! | `FUQING_APP_KEY`, `FUQING_APP_SECRET`, `FUQING_APP_CODE`, `FUQING_SUBSCRIBE_URL` | required |
//! | `FUQING_QUERY_BASE` | `http://wuliu.market.alicloudapi.com` |
//! | `FUQING_PUSH_BASE` | `http://expfeeds.market.alicloudapi.com` |
//! | `HTTP_CLIENT_TIMEOUT_SECS` | `30` |
//! | `HTTP_CLIENT_CONNECT_TIMEOUT_SECS` | `10` |

use std::env;

use express_trace_core::ConfigError;
use express_trace_providers::fuqing::constants::{FUQING_PUSH_BASE_URL, FUQING_QUERY_BASE_URL};
use express_trace_providers::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use express_trace_providers::kuaidi100::constants::KUAIDI100_API_BASE_URL;
use express_trace_providers::{
    initialize_shared_client, FuqingConfig, FuqingProvider, HttpClientSettings, Kuaidi100Config,
    Kuaidi100Provider, ProviderKind, TraceProvider,
};
use tracing::info;

/// Kuaidi100 account key
pub const KUAIDI100_KEY: &str = "KUAIDI100_KEY";
/// Kuaidi100 customer id
pub const KUAIDI100_CUSTOMER: &str = "KUAIDI100_CUSTOMER";
/// Kuaidi100 callback base URL
pub const KUAIDI100_SUBSCRIBE_URL: &str = "KUAIDI100_SUBSCRIBE_URL";
/// Kuaidi100 callback signing salt
pub const KUAIDI100_SIGN_SALT: &str = "KUAIDI100_SIGN_SALT";
/// Kuaidi100 API host override
pub const KUAIDI100_API_BASE: &str = "KUAIDI100_API_BASE";
/// Fuqing app key
pub const FUQING_APP_KEY: &str = "FUQING_APP_KEY";
/// Fuqing app secret
pub const FUQING_APP_SECRET: &str = "FUQING_APP_SECRET";
/// Fuqing app code
pub const FUQING_APP_CODE: &str = "FUQING_APP_CODE";
/// Fuqing callback base URL
pub const FUQING_SUBSCRIBE_URL: &str = "FUQING_SUBSCRIBE_URL";
/// Fuqing query API host override
pub const FUQING_QUERY_BASE: &str = "FUQING_QUERY_BASE";
/// Fuqing push API host override
pub const FUQING_PUSH_BASE: &str = "FUQING_PUSH_BASE";
/// Whole-request timeout for provider calls
pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
/// Connect timeout for provider calls
pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";

/// Adapter configuration for every provider plus the shared HTTP client
#[derive(Debug, Clone)]
pub struct TraceEnvConfig {
    /// Kuaidi100 credentials and endpoints
    pub kuaidi100: Kuaidi100Config,
    /// Fuqing credentials and endpoints
    pub fuqing: FuqingConfig,
    /// Shared HTTP client timeouts
    pub http: HttpClientSettings,
}

impl TraceEnvConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a timeout is not a whole number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset credentials load as empty strings; they are rejected by
    /// [`Self::build_provider`] for the provider that needs them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a timeout is not a whole number
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).unwrap_or_default();
        let value_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let kuaidi100 = Kuaidi100Config::new(
            value(KUAIDI100_KEY),
            value(KUAIDI100_CUSTOMER),
            value(KUAIDI100_SUBSCRIBE_URL),
            value(KUAIDI100_SIGN_SALT),
        )
        .with_api_base_url(value_or(KUAIDI100_API_BASE, KUAIDI100_API_BASE_URL));

        let fuqing = FuqingConfig::new(
            value(FUQING_APP_KEY),
            value(FUQING_APP_SECRET),
            value(FUQING_APP_CODE),
            value(FUQING_SUBSCRIBE_URL),
        )
        .with_query_base_url(value_or(FUQING_QUERY_BASE, FUQING_QUERY_BASE_URL))
        .with_push_base_url(value_or(FUQING_PUSH_BASE, FUQING_PUSH_BASE_URL));

        let http = HttpClientSettings {
            timeout_secs: parse_secs(
                HTTP_CLIENT_TIMEOUT_SECS,
                lookup(HTTP_CLIENT_TIMEOUT_SECS),
                DEFAULT_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_secs(
                HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                lookup(HTTP_CLIENT_CONNECT_TIMEOUT_SECS),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self {
            kuaidi100,
            fuqing,
            http,
        })
    }

    /// Install the HTTP timeouts on the shared client
    ///
    /// Call before building the first provider.
    pub fn apply_http_settings(&self) {
        initialize_shared_client(self.http);
    }

    /// Build the Kuaidi100 adapter
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first empty credential
    pub fn kuaidi100_provider(&self) -> Result<Kuaidi100Provider, ConfigError> {
        Kuaidi100Provider::new(self.kuaidi100.clone())
    }

    /// Build the Fuqing adapter
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first empty credential
    pub fn fuqing_provider(&self) -> Result<FuqingProvider, ConfigError> {
        FuqingProvider::new(self.fuqing.clone())
    }

    /// Build the adapter for `kind`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first empty credential
    /// of that provider
    pub fn build_provider(&self, kind: ProviderKind) -> Result<TraceProvider, ConfigError> {
        let provider: TraceProvider = match kind {
            ProviderKind::Kuaidi100 => self.kuaidi100_provider()?.into(),
            ProviderKind::Fuqing => self.fuqing_provider()?.into(),
        };
        info!(provider = %kind, "Express trace provider configured");
        Ok(provider)
    }
}

fn parse_secs(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|e| ConfigError::InvalidValue {
            key,
            reason: format!("{value:?} is not a whole number of seconds: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn kuaidi100_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (KUAIDI100_KEY, "key"),
            (KUAIDI100_CUSTOMER, "customer"),
            (KUAIDI100_SUBSCRIBE_URL, "https://shop.example.com/notify"),
            (KUAIDI100_SIGN_SALT, "salt"),
        ]
    }

    #[test]
    fn test_defaults_for_endpoints_and_timeouts() {
        let config = TraceEnvConfig::from_source(source(&[])).unwrap();
        assert_eq!(config.kuaidi100.api_base_url, "https://poll.kuaidi100.com");
        assert_eq!(config.fuqing.query_base_url, "http://wuliu.market.alicloudapi.com");
        assert_eq!(config.fuqing.push_base_url, "http://expfeeds.market.alicloudapi.com");
        assert_eq!(config.http, HttpClientSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config = TraceEnvConfig::from_source(source(&[
            (KUAIDI100_API_BASE, "http://127.0.0.1:8080"),
            (FUQING_PUSH_BASE, "http://127.0.0.1:8081"),
            (HTTP_CLIENT_TIMEOUT_SECS, "5"),
            (HTTP_CLIENT_CONNECT_TIMEOUT_SECS, " 2 "),
        ]))
        .unwrap();
        assert_eq!(config.kuaidi100.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.fuqing.push_base_url, "http://127.0.0.1:8081");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.connect_timeout_secs, 2);
    }

    #[test]
    fn test_invalid_timeout() {
        let error = TraceEnvConfig::from_source(source(&[(HTTP_CLIENT_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidValue {
                key: HTTP_CLIENT_TIMEOUT_SECS,
                ..
            }
        ));
    }

    #[test]
    fn test_build_provider_reports_first_missing_credential() {
        let config = TraceEnvConfig::from_source(source(&[])).unwrap();
        assert_eq!(
            config.build_provider(ProviderKind::Kuaidi100).unwrap_err(),
            ConfigError::MissingField("kuaidi100.key")
        );
        assert_eq!(
            config.build_provider(ProviderKind::Fuqing).unwrap_err(),
            ConfigError::MissingField("fuqing.appKey")
        );
    }

    #[test]
    fn test_build_configured_provider() {
        let config = TraceEnvConfig::from_source(source(&kuaidi100_env())).unwrap();
        let provider = config.build_provider(ProviderKind::Kuaidi100).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Kuaidi100);
    }
}
