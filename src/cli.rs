//! Command-line definitions and dispatch.

use clap::{Args, Parser, Subcommand};

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_database::DatabasePool;
use docvault_database::migration::run_migrations;

/// docvault: document management backend
#[derive(Debug, Parser)]
#[command(name = "docvault", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (`{config_dir}/{env}.toml`)
    #[arg(long, env = "DOCVAULT_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server and the audit worker
    Serve(ServeArgs),
    /// Apply pending database migrations and exit
    Migrate,
}

/// Arguments for the serve command
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Load configuration from the configured directory.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config_dir, &self.env)
    }

    /// Execute the selected command.
    pub async fn execute(self, mut config: AppConfig) -> Result<(), AppError> {
        match self.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
            Commands::Serve(args) => {
                if let Some(host) = args.host {
                    config.server.host = host;
                }
                if let Some(port) = args.port {
                    config.server.port = port;
                }
                serve(config).await
            }
            Commands::Migrate => {
                let db = DatabasePool::connect(&config.database).await?;
                tracing::info!("Running database migrations...");
                run_migrations(db.pool()).await?;
                tracing::info!("All migrations applied successfully");
                db.close().await;
                Ok(())
            }
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting docvault"
    );

    let db = DatabasePool::connect(&config.database).await?;

    if config.database.auto_migrate {
        tracing::info!("Running database migrations...");
        run_migrations(db.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    let result = docvault_api::run_server(config, db.pool().clone()).await;
    db.close().await;
    result
}
