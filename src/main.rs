// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cml - Commit Message Linter
//!
//! Entry point: parse arguments, run the lint pipeline, map the outcome
//! to a process exit code.

use clap::Parser;
use cml::cli::{run, Cli};
use cml::config::ExitCodes;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.debug);

    // The exit-code table is resolved once; every failure site maps
    // through it.
    let codes = ExitCodes::from_env();

    if let Err(e) = run(&cli).await {
        if !e.is_reported() {
            eprintln!("{}   {}", style("⚠").yellow().bold(), e);
        }
        std::process::exit(codes.for_error(&e));
    }
}

/// Set up logging/tracing.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("cml=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
