// ABOUTME: Kuaidi100 courier query provider module
// ABOUTME: Subscribe, signed push callback decoding, point-in-time query and carrier directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

/// Carrier code to display name directory
pub mod companies;
/// API URLs, form fields and the state code table
pub mod constants;
/// Kuaidi100 wire DTOs
pub mod models;
/// `ExpressTrace` implementation
pub mod provider;

pub use companies::company_name;
pub use constants::state_code;
pub use models::{Kuaidi100Snapshot, Kuaidi100Trace};
pub use provider::{Kuaidi100Config, Kuaidi100Provider};
