// ABOUTME: Configuration module for express trace adapters
// ABOUTME: Loads provider credentials, endpoints and HTTP timeouts from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

/// Environment variable loading and provider construction
pub mod environment;

pub use environment::TraceEnvConfig;
