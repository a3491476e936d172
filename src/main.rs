//! docvault server: document management over GraphQL with file upload and
//! download endpoints.
//!
//! Main entry point that parses the command line, loads configuration,
//! initializes logging and dispatches to the selected command.

mod cli;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use docvault_core::config::LoggingConfig;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(config).await {
        tracing::error!(error = %e, "docvault exited with an error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
