// ABOUTME: Offline callback signature computation for express-trace-cli
// ABOUTME: Prints the uppercase hex MD5 of payload plus salt, as Kuaidi100 signs pushes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use express_trace::SignatureVerifier;

/// Print the signature a provider would attach to `payload`
pub fn run(payload: &str, salt: String) {
    println!("{}", SignatureVerifier::new(salt).sign(payload));
}
