// ABOUTME: Fuqing (Aliyun market) courier query provider module
// ABOUTME: APPCODE-authenticated subscribe, unsigned push callbacks, real-time query and carrier list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

/// API URLs, header values and status code tables
pub mod constants;
/// Fuqing wire DTOs
pub mod models;
/// `ExpressTrace` implementation
pub mod provider;

pub use constants::{delivery_status_code, state_code};
pub use models::{FuqingSnapshot, FuqingTrace};
pub use provider::{FuqingConfig, FuqingProvider};
