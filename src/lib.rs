// ABOUTME: Main library entry point for Express Trace shipment tracking
// ABOUTME: Re-exports the canonical model and provider adapters, plus environment config and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

#![deny(unsafe_code)]

//! # Express Trace
//!
//! Unified shipment tracking across third-party courier query providers.
//! Callers subscribe a tracking number with a caller-assigned `orderId`
//! correlator; the provider later pushes tracking updates to a callback URL
//! carrying that correlator, and the adapter turns the push into a canonical
//! [`TrackingResult`].
//!
//! ## Supported providers
//!
//! - **Kuaidi100**: signed pushes (`MD5(param + salt)`), carrier directory
//!   lookup, real-time query
//! - **Fuqing**: APPCODE-authenticated Aliyun market API, unsigned pushes,
//!   real-time query, carrier list
//!
//! ## Example
//!
//! ```rust,no_run
//! use express_trace::config::TraceEnvConfig;
//! use express_trace::{ExpressTrace, ProviderKind, SubscribeRequest};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TraceEnvConfig::from_env()?;
//! let provider = config.build_provider(ProviderKind::Kuaidi100)?;
//! provider
//!     .subscribe(&SubscribeRequest::new(33_334, "JD0076810060555"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Environment-driven adapter configuration
pub mod config;

/// Structured logging setup
pub mod logging;

pub use express_trace_core::{
    CanonicalStatus, CarrierInfo, ConfigError, ErrorCode, SubscribeRequest, TraceError,
    TraceResult, TrackEvent, TrackingResult,
};
pub use express_trace_providers::{
    fuqing, kuaidi100, CallbackFields, ExpressTrace, FuqingConfig, FuqingProvider,
    HttpClientSettings, Kuaidi100Config, Kuaidi100Provider, ProviderKind, SignatureValidation,
    SignatureVerifier, TraceProvider,
};
