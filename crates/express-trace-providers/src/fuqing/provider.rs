// ABOUTME: Fuqing provider implementing the ExpressTrace contract plus real-time query and carrier list
// ABOUTME: Every call authenticates with an APPCODE header; push callbacks are unsigned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Fuqing `ExpressTrace` implementation
//!
//! Fuqing is sold through the Aliyun API market. Subscribe is a GET carrying
//! the tracking number and our callback URL; pushes arrive as a form with a
//! single `data` field. Fuqing does not sign its pushes, so a callback's
//! authenticity rests on the secrecy of the callback URL.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::constants::{
    APPCODE_SCHEME, COMPANIES_PATH, DATA_FIELD, FUQING_PUSH_BASE_URL, FUQING_QUERY_BASE_URL,
    PROVIDER_NAME, QUERY_PATH, QUERY_SUCCESS_STATUS, SUBSCRIBE_PATH,
};
use super::models::{CallbackPayload, FuqingSnapshot, QueryEnvelope, SubscribeEnvelope};
use crate::callback::{require_field, require_order_id};
use crate::constants::ORDER_ID_FIELD;
use crate::core::{CallbackFields, ExpressTrace};
use crate::errors::{ConfigError, TraceError, TraceResult};
use crate::http_client::{fetch_text, shared_client};
use crate::models::{SubscribeRequest, TrackingResult};
use crate::observability::CallLog;

/// Fuqing credentials and endpoints
#[derive(Clone)]
pub struct FuqingConfig {
    /// Aliyun market app key
    pub app_key: String,
    /// Aliyun market app secret
    pub app_secret: String,
    /// Aliyun market app code, sent as `Authorization: APPCODE <code>`
    pub app_code: String,
    /// Base callback URL; `?orderId=<id>` is appended per subscription
    pub subscribe_url: String,
    /// Real-time query API base URL
    pub query_base_url: String,
    /// Push subscription API base URL
    pub push_base_url: String,
}

impl FuqingConfig {
    /// Config against the production APIs
    #[must_use]
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        app_code: impl Into<String>,
        subscribe_url: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            app_code: app_code.into(),
            subscribe_url: subscribe_url.into(),
            query_base_url: FUQING_QUERY_BASE_URL.to_owned(),
            push_base_url: FUQING_PUSH_BASE_URL.to_owned(),
        }
    }

    /// Point real-time queries at another host
    #[must_use]
    pub fn with_query_base_url(mut self, url: impl Into<String>) -> Self {
        self.query_base_url = url.into();
        self
    }

    /// Point subscribe and carrier list calls at another host
    #[must_use]
    pub fn with_push_base_url(mut self, url: impl Into<String>) -> Self {
        self.push_base_url = url.into();
        self
    }

    /// Check that every required value is present
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first empty value, in the
    /// order app key, app secret, app code, subscribe URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require("fuqing.appKey", &self.app_key)?;
        ConfigError::require("fuqing.appSecret", &self.app_secret)?;
        ConfigError::require("fuqing.appCode", &self.app_code)?;
        ConfigError::require("fuqing.subscribeUrl", &self.subscribe_url)?;
        ConfigError::require("fuqing.queryBaseUrl", &self.query_base_url)?;
        ConfigError::require("fuqing.pushBaseUrl", &self.push_base_url)
    }
}

impl fmt::Debug for FuqingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuqingConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .field("app_code", &"<redacted>")
            .field("subscribe_url", &self.subscribe_url)
            .field("query_base_url", &self.query_base_url)
            .field("push_base_url", &self.push_base_url)
            .finish()
    }
}

/// Fuqing courier query provider
#[derive(Debug, Clone)]
pub struct FuqingProvider {
    config: FuqingConfig,
    client: Client,
}

impl FuqingProvider {
    /// Create an adapter using the shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if any required value is empty
    pub fn new(config: FuqingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            client: shared_client(),
        })
    }

    /// Use a dedicated HTTP client instead of the shared one
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Adapter configuration
    #[must_use]
    pub const fn config(&self) -> &FuqingConfig {
        &self.config
    }

    /// Callback URL registered for `order_id`
    #[must_use]
    pub fn callback_url(&self, order_id: i64) -> String {
        format!("{}?{ORDER_ID_FIELD}={order_id}", self.config.subscribe_url)
    }

    fn authorized_get(&self, base: &str, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", base.trim_end_matches('/')))
            .header(AUTHORIZATION, format!("{APPCODE_SCHEME} {}", self.config.app_code))
    }

    /// Fetch the current tracking state of `number` without subscribing
    ///
    /// `company` may be empty to let Fuqing detect the carrier.
    ///
    /// # Errors
    ///
    /// - `TraceError::Param` if `number` is empty
    /// - `TraceError::Transport` if the HTTP call cannot complete
    /// - `TraceError::Response` if the body is not the query envelope
    /// - `TraceError::ProviderRejected` if the envelope status is not `"0"`
    #[instrument(skip(self), fields(provider = PROVIDER_NAME, api_call = "query"))]
    pub async fn query(&self, number: &str, company: &str) -> TraceResult<FuqingSnapshot> {
        let mut log = CallLog::start(PROVIDER_NAME, "query", number);
        let result = self.send_query(number, company, &mut log).await;
        log.finish(result)
    }

    /// List the carriers Fuqing can push updates for
    ///
    /// The body is returned as Fuqing sends it, without interpretation.
    ///
    /// # Errors
    ///
    /// - `TraceError::Transport` if the HTTP call cannot complete
    /// - `TraceError::Response` if the body is not a JSON object
    #[instrument(skip(self), fields(provider = PROVIDER_NAME, api_call = "companies"))]
    pub async fn companies(&self) -> TraceResult<Map<String, Value>> {
        let mut log = CallLog::start(PROVIDER_NAME, "companies", "");
        let result = self.fetch_companies(&mut log).await;
        log.finish(result)
    }

    async fn send_subscribe(&self, request: &SubscribeRequest, log: &mut CallLog) -> TraceResult<()> {
        request.validate()?;

        let callback_url = self.callback_url(request.order_id);
        let mut params = vec![("no", request.number.as_str()), ("url", callback_url.as_str())];
        if let Some(carrier) = request.carrier() {
            params.push(("type", carrier));
        }

        debug!(number = %request.number, callback_url = %callback_url, "Subscribing to Fuqing push");

        let http_request = self
            .authorized_get(&self.config.push_base_url, SUBSCRIBE_PATH)
            .query(&params);
        let body = fetch_text(http_request, PROVIDER_NAME).await?;
        log.record_response(&body);

        let envelope: SubscribeEnvelope =
            serde_json::from_str(&body).map_err(|e| TraceError::response(PROVIDER_NAME, e))?;
        if !envelope.status {
            debug!(code = %envelope.code, "Fuqing rejected subscription");
            return Err(TraceError::rejected(PROVIDER_NAME, envelope.message));
        }
        Ok(())
    }

    fn decode_callback(
        order_id: i64,
        fields: &CallbackFields,
        log: &mut CallLog,
    ) -> TraceResult<TrackingResult> {
        let order_id = require_order_id(order_id)?;
        let data = require_field(fields, DATA_FIELD)?;
        log.record_response(data);

        let payload: CallbackPayload = serde_json::from_str(data)
            .map_err(|e| TraceError::callback_decode(PROVIDER_NAME, e))?;
        debug!(code = %payload.code, state = %payload.state, "Decoded Fuqing callback");

        log.set_number(&payload.no);
        Ok(payload.into_tracking_result(order_id))
    }

    async fn send_query(
        &self,
        number: &str,
        company: &str,
        log: &mut CallLog,
    ) -> TraceResult<FuqingSnapshot> {
        if number.trim().is_empty() {
            return Err(TraceError::param("number is required"));
        }

        let mut params = vec![("no", number)];
        if !company.is_empty() {
            params.push(("type", company));
        }

        let http_request = self
            .authorized_get(&self.config.query_base_url, QUERY_PATH)
            .query(&params);
        let body = fetch_text(http_request, PROVIDER_NAME).await?;
        log.record_response(&body);

        let envelope: QueryEnvelope =
            serde_json::from_str(&body).map_err(|e| TraceError::response(PROVIDER_NAME, e))?;
        if envelope.status != QUERY_SUCCESS_STATUS {
            return Err(TraceError::rejected(PROVIDER_NAME, envelope.msg));
        }
        Ok(envelope.result)
    }

    async fn fetch_companies(&self, log: &mut CallLog) -> TraceResult<Map<String, Value>> {
        let http_request = self.authorized_get(&self.config.push_base_url, COMPANIES_PATH);
        let body = fetch_text(http_request, PROVIDER_NAME).await?;
        log.record_response(&body);

        serde_json::from_str(&body).map_err(|e| TraceError::response(PROVIDER_NAME, e))
    }
}

#[async_trait]
impl ExpressTrace for FuqingProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(
        skip(self, request),
        fields(provider = PROVIDER_NAME, api_call = "subscribe", order_id = request.order_id)
    )]
    async fn subscribe(&self, request: &SubscribeRequest) -> TraceResult<()> {
        let mut log = CallLog::start(PROVIDER_NAME, "subscribe", &request.number)
            .with_order_id(request.order_id);
        let result = self.send_subscribe(request, &mut log).await;
        log.finish(result)
    }

    #[instrument(
        skip(self, fields),
        fields(provider = PROVIDER_NAME, api_call = "callback")
    )]
    fn handle_callback(
        &self,
        order_id: i64,
        fields: &CallbackFields,
    ) -> TraceResult<TrackingResult> {
        let mut log = CallLog::start(PROVIDER_NAME, "callback", "").with_order_id(order_id);
        let result = Self::decode_callback(order_id, fields, &mut log);
        log.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::capture::logs_of;

    fn config() -> FuqingConfig {
        FuqingConfig::new("app-key", "app-secret", "app-code", "https://example.com/fuqing")
    }

    #[test]
    fn test_required_values_in_order() {
        let cases = [
            (FuqingConfig::new("", "", "", ""), "fuqing.appKey"),
            (FuqingConfig::new("k", "", "", ""), "fuqing.appSecret"),
            (FuqingConfig::new("k", "s", "", ""), "fuqing.appCode"),
            (FuqingConfig::new("k", "s", "c", ""), "fuqing.subscribeUrl"),
        ];
        for (config, field) in cases {
            assert_eq!(
                FuqingProvider::new(config).unwrap_err(),
                ConfigError::MissingField(field)
            );
        }
        assert!(FuqingProvider::new(config()).is_ok());
    }

    #[test]
    fn test_callback_url_carries_order_id() {
        let provider = FuqingProvider::new(config()).unwrap();
        assert_eq!(
            provider.callback_url(7),
            "https://example.com/fuqing?orderId=7"
        );
    }

    #[test]
    fn test_callback_requires_order_id_before_data() {
        let provider = FuqingProvider::new(config()).unwrap();
        let error = provider.handle_callback(0, &CallbackFields::new()).unwrap_err();
        assert!(matches!(error, TraceError::CallbackParam { field: "orderId" }));

        let error = provider.handle_callback(1, &CallbackFields::new()).unwrap_err();
        assert!(matches!(error, TraceError::CallbackParam { field: "data" }));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("app-secret"));
        assert!(!rendered.contains("app-code"));
    }

    #[test]
    fn test_missing_data_logs_order_id_once() {
        let provider = FuqingProvider::new(config()).unwrap();
        let lines = logs_of(|| {
            let error = provider
                .handle_callback(33_334, &CallbackFields::new())
                .unwrap_err();
            assert!(matches!(error, TraceError::CallbackParam { field: "data" }));
        });
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("order_id=33334"));
        assert!(lines[0].contains("code=3015"));
    }
}
