// ABOUTME: Courier query provider implementations for Kuaidi100 and Fuqing
// ABOUTME: ExpressTrace contract, callback verification, per-call logging and provider registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! Courier query provider implementations and core abstractions.
//!
//! Each provider exposes a different HTTP subscribe API, push-callback payload,
//! status vocabulary and (for Kuaidi100) signature scheme. Adapters decode all
//! of that internally and hand back the canonical types from
//! `express_trace_core`.

// Re-export core modules so adapters can keep `use crate::models::*` etc.
pub use express_trace_core::constants;
pub use express_trace_core::errors;
pub use express_trace_core::local_time;
pub use express_trace_core::models;
pub use express_trace_core::nullable;

// Core provider infrastructure
/// Required-field extraction for push callback payloads
pub mod callback;
/// The `ExpressTrace` contract every provider implements
pub mod core;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// One structured log record per provider operation
pub mod observability;
/// Provider selection and enum dispatch
pub mod registry;
/// MD5 signature verification for signed push callbacks
pub mod signature;

// Provider implementations (conditionally compiled)

/// Fuqing (Aliyun market) courier query provider
#[cfg(feature = "provider-fuqing")]
pub mod fuqing;
/// Kuaidi100 courier query provider
#[cfg(feature = "provider-kuaidi100")]
pub mod kuaidi100;

// Re-export key types for convenience

pub use crate::core::{CallbackFields, ExpressTrace};
pub use express_trace_core::errors::{ConfigError, ErrorCode, TraceError, TraceResult};
#[cfg(feature = "provider-fuqing")]
pub use fuqing::{FuqingConfig, FuqingProvider};
pub use http_client::{initialize_shared_client, shared_client, HttpClientSettings};
#[cfg(feature = "provider-kuaidi100")]
pub use kuaidi100::{Kuaidi100Config, Kuaidi100Provider};
pub use observability::CallLog;
pub use registry::{ProviderKind, TraceProvider};
pub use signature::{SignatureValidation, SignatureVerifier};
