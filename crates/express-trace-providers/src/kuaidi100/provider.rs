// ABOUTME: Kuaidi100 provider implementing the ExpressTrace contract plus a real-time query
// ABOUTME: Subscribes via the poll API and verifies salted MD5 signatures before decoding callbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Kuaidi100 `ExpressTrace` implementation
//!
//! Subscribe posts a JSON `param` in the query string of `/poll`. Kuaidi100
//! later pushes a form with `param` (the tracking JSON) and `sign`
//! (`MD5(param + salt)`, uppercase hex) to the callback URL registered at
//! subscribe time, which carries our `orderId` correlator.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, instrument};

use super::constants::{
    AUTO_DETECT_CARRIER, FORM_CONTENT_TYPE, KUAIDI100_API_BASE_URL, PARAM_FIELD, PROVIDER_NAME,
    QUERY_PATH, QUERY_SUCCESS_STATUS, RESULT_V2_DISABLED, SIGN_FIELD, SUBSCRIBE_PATH,
    SUBSCRIBE_SCHEMA,
};
use super::models::{
    CallbackPayload, Kuaidi100Snapshot, QueryParam, SubscribeEnvelope, SubscribeOptions,
    SubscribeParam,
};
use crate::callback::{optional_field, require_field, require_order_id};
use crate::constants::ORDER_ID_FIELD;
use crate::core::{CallbackFields, ExpressTrace};
use crate::errors::{ConfigError, TraceError, TraceResult};
use crate::http_client::{fetch_text, shared_client};
use crate::models::{SubscribeRequest, TrackingResult};
use crate::observability::CallLog;
use crate::signature::{md5_upper_hex, SignatureVerifier};

/// Kuaidi100 credentials and endpoints
#[derive(Clone)]
pub struct Kuaidi100Config {
    /// Account key, sent with subscribe and used to sign queries
    pub key: String,
    /// Customer id, used by real-time queries
    pub customer: String,
    /// Base callback URL; `?orderId=<id>` is appended per subscription
    pub subscribe_url: String,
    /// Shared salt Kuaidi100 signs callbacks with
    pub sign_salt: String,
    /// Poll API base URL
    pub api_base_url: String,
}

impl Kuaidi100Config {
    /// Config against the production API
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        customer: impl Into<String>,
        subscribe_url: impl Into<String>,
        sign_salt: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            customer: customer.into(),
            subscribe_url: subscribe_url.into(),
            sign_salt: sign_salt.into(),
            api_base_url: KUAIDI100_API_BASE_URL.to_owned(),
        }
    }

    /// Point the adapter at another API host
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Check that every required value is present
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first empty value, in the
    /// order key, customer, sign salt, subscribe URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require("kuaidi100.key", &self.key)?;
        ConfigError::require("kuaidi100.customer", &self.customer)?;
        ConfigError::require("kuaidi100.signSalt", &self.sign_salt)?;
        ConfigError::require("kuaidi100.subscribeUrl", &self.subscribe_url)?;
        ConfigError::require("kuaidi100.apiBaseUrl", &self.api_base_url)
    }
}

impl fmt::Debug for Kuaidi100Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kuaidi100Config")
            .field("key", &"<redacted>")
            .field("customer", &self.customer)
            .field("subscribe_url", &self.subscribe_url)
            .field("sign_salt", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Kuaidi100 courier query provider
#[derive(Debug, Clone)]
pub struct Kuaidi100Provider {
    config: Kuaidi100Config,
    verifier: SignatureVerifier,
    client: Client,
}

impl Kuaidi100Provider {
    /// Create an adapter using the shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if any required value is empty
    pub fn new(config: Kuaidi100Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let verifier = SignatureVerifier::new(config.sign_salt.clone());
        Ok(Self {
            config,
            verifier,
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
    pub const fn config(&self) -> &Kuaidi100Config {
        &self.config
    }

    /// Callback URL registered for `order_id`
    #[must_use]
    pub fn callback_url(&self, order_id: i64) -> String {
        format!("{}?{ORDER_ID_FIELD}={order_id}", self.config.subscribe_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base_url.trim_end_matches('/'))
    }

    /// Fetch the current tracking state of `number` without subscribing
    ///
    /// Kuaidi100 requires the carrier code for real-time queries.
    ///
    /// # Errors
    ///
    /// - `TraceError::Param` if `number` or `company` is empty
    /// - `TraceError::Transport` if the HTTP call cannot complete
    /// - `TraceError::Response` if the body is not a tracking snapshot
    /// - `TraceError::ProviderRejected` if the snapshot status is not `"200"`
    #[instrument(skip(self), fields(provider = PROVIDER_NAME, api_call = "query"))]
    pub async fn query(&self, number: &str, company: &str) -> TraceResult<Kuaidi100Snapshot> {
        let mut log = CallLog::start(PROVIDER_NAME, "query", number);
        let result = self.send_query(number, company, &mut log).await;
        log.finish(result)
    }

    async fn send_subscribe(&self, request: &SubscribeRequest, log: &mut CallLog) -> TraceResult<()> {
        request.validate()?;

        let callback_url = self.callback_url(request.order_id);
        let param = serde_json::to_string(&SubscribeParam {
            company: &request.carrier_hint,
            key: &self.config.key,
            number: &request.number,
            parameters: SubscribeOptions {
                auto_com: AUTO_DETECT_CARRIER,
                callbackurl: &callback_url,
                resultv2: RESULT_V2_DISABLED,
                salt: &self.config.sign_salt,
            },
        })
        .map_err(|e| TraceError::param(format!("cannot encode subscribe parameters: {e}")))?;

        debug!(number = %request.number, callback_url = %callback_url, "Subscribing to Kuaidi100 push");

        let http_request = self
            .client
            .post(self.endpoint(SUBSCRIBE_PATH))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .query(&[("schema", SUBSCRIBE_SCHEMA), ("param", param.as_str())]);
        let body = fetch_text(http_request, PROVIDER_NAME).await?;
        log.record_response(&body);

        let envelope: SubscribeEnvelope =
            serde_json::from_str(&body).map_err(|e| TraceError::response(PROVIDER_NAME, e))?;
        if !envelope.result {
            debug!(return_code = %envelope.return_code, "Kuaidi100 rejected subscription");
            return Err(TraceError::rejected(PROVIDER_NAME, envelope.message));
        }
        Ok(())
    }

    fn decode_callback(
        &self,
        order_id: i64,
        fields: &CallbackFields,
        log: &mut CallLog,
    ) -> TraceResult<TrackingResult> {
        let order_id = require_order_id(order_id)?;
        let param = require_field(fields, PARAM_FIELD)?;
        log.record_response(param);

        let validation = self.verifier.validate(optional_field(fields, SIGN_FIELD), param);
        if !validation.is_valid() {
            debug!(?validation, "Kuaidi100 callback signature rejected");
            return Err(TraceError::Signature);
        }

        let payload: CallbackPayload = serde_json::from_str(param)
            .map_err(|e| TraceError::callback_decode(PROVIDER_NAME, e))?;
        debug!(status = %payload.status, message = %payload.message, "Decoded Kuaidi100 callback");

        let snapshot = payload.last_result;
        log.set_number(&snapshot.nu);
        snapshot.into_tracking_result(order_id)
    }

    async fn send_query(
        &self,
        number: &str,
        company: &str,
        log: &mut CallLog,
    ) -> TraceResult<Kuaidi100Snapshot> {
        if number.trim().is_empty() {
            return Err(TraceError::param("number is required"));
        }
        if company.trim().is_empty() {
            return Err(TraceError::param("company is required"));
        }

        let param = serde_json::to_string(&QueryParam {
            com: company,
            num: number,
            resultv2: RESULT_V2_DISABLED,
        })
        .map_err(|e| TraceError::param(format!("cannot encode query parameters: {e}")))?;
        let sign = md5_upper_hex(&[
            param.as_str(),
            self.config.key.as_str(),
            self.config.customer.as_str(),
        ]);

        let http_request = self.client.post(self.endpoint(QUERY_PATH)).form(&[
            ("customer", self.config.customer.as_str()),
            ("sign", sign.as_str()),
            ("param", param.as_str()),
        ]);
        let body = fetch_text(http_request, PROVIDER_NAME).await?;
        log.record_response(&body);

        let snapshot: Kuaidi100Snapshot =
            serde_json::from_str(&body).map_err(|e| TraceError::response(PROVIDER_NAME, e))?;
        if snapshot.status != QUERY_SUCCESS_STATUS {
            return Err(TraceError::rejected(PROVIDER_NAME, snapshot.message));
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl ExpressTrace for Kuaidi100Provider {
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
        let result = self.decode_callback(order_id, fields, &mut log);
        log.finish(result)
    }
}
