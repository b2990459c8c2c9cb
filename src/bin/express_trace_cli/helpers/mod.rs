// ABOUTME: Helper modules for express-trace-cli
// ABOUTME: Argument parsing and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

pub mod args;
pub mod display;
