// ABOUTME: Argument value parsers for express-trace-cli
// ABOUTME: Splits repeatable key=value callback fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

/// Parse `key=value`; the value may itself contain `=`
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty field name in {raw:?}"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
