// ABOUTME: Output formatting helpers for express-trace-cli
// ABOUTME: Pretty-prints results as JSON on stdout and labels provider errors with their code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use anyhow::Result;
use express_trace::TraceError;
use serde::Serialize;

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Wrap a provider error with its code and description for the terminal
pub fn describe(error: TraceError) -> anyhow::Error {
    let code = error.code();
    anyhow::Error::new(error).context(format!("{} (code {code})", code.description()))
}
