// ABOUTME: Express Trace CLI - subscribe, replay callbacks and query courier providers from a shell
// ABOUTME: Reads provider credentials from the environment and prints canonical results as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors
//!
//! Usage:
//! ```bash
//! # Subscribe a tracking number for push updates
//! express-trace-cli subscribe --order-id 33334 --number JD0076810060555
//!
//! # Decode a captured push callback
//! express-trace-cli --provider fuqing callback --order-id 33334 --field 'data={"state":"3",...}'
//!
//! # Fetch current tracking state without subscribing
//! express-trace-cli query --number YT0000000001 --company yuantong
//!
//! # List supported carriers
//! express-trace-cli --provider fuqing companies
//!
//! # Compute a callback signature for testing
//! express-trace-cli sign --payload '{"state":"3"}' --salt abc
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use express_trace::config::TraceEnvConfig;
use express_trace::logging::LoggingConfig;
use express_trace::ProviderKind;

use helpers::args::parse_field;

#[derive(Parser)]
#[command(
    name = "express-trace-cli",
    about = "Express Trace courier tracking CLI",
    long_about = "Subscribe tracking numbers, decode push callbacks and query Kuaidi100 or Fuqing. Credentials are read from KUAIDI100_* and FUQING_* environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Courier query provider (kuaidi100, fuqing)
    #[arg(long, short = 'p', global = true, default_value = "kuaidi100")]
    provider: ProviderKind,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Register a tracking number for push updates
    Subscribe {
        /// Correlator echoed back in the callback URL
        #[arg(long)]
        order_id: i64,

        /// Tracking number
        #[arg(long)]
        number: String,

        /// Provider carrier code (omit to let the provider detect it)
        #[arg(long)]
        company: Option<String>,
    },

    /// Decode a push callback into a canonical tracking result
    Callback {
        /// Correlator taken from the callback URL
        #[arg(long)]
        order_id: i64,

        /// Callback form field as key=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Fetch the current tracking state without subscribing
    Query {
        /// Tracking number
        #[arg(long)]
        number: String,

        /// Provider carrier code (required by Kuaidi100)
        #[arg(long)]
        company: Option<String>,
    },

    /// List the carriers a provider supports
    Companies,

    /// Compute the uppercase MD5 signature of a callback payload
    Sign {
        /// Raw callback payload
        #[arg(long)]
        payload: String,

        /// Shared signing salt
        #[arg(long)]
        salt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let kind = cli.provider;
    match cli.command {
        Command::Sign { payload, salt } => {
            commands::sign::run(&payload, salt);
            Ok(())
        }
        Command::Subscribe {
            order_id,
            number,
            company,
        } => commands::trace::subscribe(&load_config()?, kind, order_id, number, company).await,
        Command::Callback { order_id, fields } => {
            commands::trace::callback(&load_config()?, kind, order_id, fields)
        }
        Command::Query { number, company } => {
            commands::trace::query(&load_config()?, kind, &number, company.as_deref()).await
        }
        Command::Companies => commands::trace::companies(&load_config()?, kind).await,
    }
}

/// Read provider configuration and install HTTP timeouts
fn load_config() -> Result<TraceEnvConfig> {
    let config = TraceEnvConfig::from_env()?;
    config.apply_http_settings();
    Ok(config)
}
