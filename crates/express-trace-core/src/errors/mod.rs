// ABOUTME: Unified error handling for courier query providers
// ABOUTME: Re-exports the trace error taxonomy and construction-time configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

//! # Error Types
//!
//! - `TraceError` - failures of subscribe, query and callback operations
//! - `ErrorCode` - stable numeric codes reported alongside every `TraceError`
//! - `ConfigError` - fatal problems detected while constructing an adapter

/// Construction-time configuration errors
pub mod config;
/// Operation errors and their stable codes
pub mod trace;

pub use config::ConfigError;
pub use trace::{ErrorCode, TraceError, TraceResult};
