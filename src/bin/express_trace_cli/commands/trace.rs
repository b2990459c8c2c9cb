// ABOUTME: Provider operation commands for express-trace-cli
// ABOUTME: Subscribe, callback decoding, real-time query and carrier listing against the chosen provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use std::collections::BTreeMap;

use anyhow::Result;
use express_trace::config::TraceEnvConfig;
use express_trace::kuaidi100::companies::companies as kuaidi100_companies;
use express_trace::{CallbackFields, ExpressTrace, ProviderKind, SubscribeRequest};

use crate::helpers::display::{describe, print_json};

/// Subscribe `number` for push updates correlated by `order_id`
pub async fn subscribe(
    config: &TraceEnvConfig,
    kind: ProviderKind,
    order_id: i64,
    number: String,
    company: Option<String>,
) -> Result<()> {
    let provider = config.build_provider(kind)?;
    let mut request = SubscribeRequest::new(order_id, number);
    if let Some(company) = company {
        request = request.with_carrier_hint(company);
    }

    provider.subscribe(&request).await.map_err(describe)?;
    println!(
        "Subscribed {} with {kind}; callbacks will carry orderId={order_id}",
        request.number
    );
    Ok(())
}

/// Decode captured callback fields and print the canonical result
pub fn callback(
    config: &TraceEnvConfig,
    kind: ProviderKind,
    order_id: i64,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let provider = config.build_provider(kind)?;
    let fields: CallbackFields = fields.into_iter().collect();
    let result = provider
        .handle_callback(order_id, &fields)
        .map_err(describe)?;
    print_json(&result)
}

/// Fetch and print the provider's current tracking snapshot
pub async fn query(
    config: &TraceEnvConfig,
    kind: ProviderKind,
    number: &str,
    company: Option<&str>,
) -> Result<()> {
    let company = company.unwrap_or_default();
    match kind {
        ProviderKind::Kuaidi100 => {
            let snapshot = config
                .kuaidi100_provider()?
                .query(number, company)
                .await
                .map_err(describe)?;
            print_json(&snapshot)
        }
        ProviderKind::Fuqing => {
            let snapshot = config
                .fuqing_provider()?
                .query(number, company)
                .await
                .map_err(describe)?;
            print_json(&snapshot)
        }
    }
}

/// Print the provider's carrier list
///
/// Kuaidi100's list is the built-in directory and needs no credentials.
pub async fn companies(config: &TraceEnvConfig, kind: ProviderKind) -> Result<()> {
    match kind {
        ProviderKind::Kuaidi100 => {
            let directory: BTreeMap<&str, &str> = kuaidi100_companies().collect();
            print_json(&directory)
        }
        ProviderKind::Fuqing => {
            let list = config
                .fuqing_provider()?
                .companies()
                .await
                .map_err(describe)?;
            print_json(&list)
        }
    }
}
