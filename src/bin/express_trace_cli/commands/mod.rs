// ABOUTME: Command modules for express-trace-cli
// ABOUTME: Provider operations and offline signature computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

pub mod sign;
pub mod trace;
