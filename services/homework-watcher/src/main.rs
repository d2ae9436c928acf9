//! Homework watcher CLI
//!
//! Command-line interface for the homework review status notifier.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use homework_watcher::{load_config, Config, WatcherBuilder, WatcherError};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watcher")]
#[command(about = "Watches homework review status and reports changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (truncated on start) instead of stdout
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(args.log_level)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(args.log_level)
                .init();
        }
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_file={:?}, log_level={:?}",
        args.config,
        args.log_file,
        args.log_level
    );

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    tracing::info!("Starting homework watcher");
    tracing::debug!(
        "Endpoint: {}, retry interval: {:?}",
        config.api.endpoint,
        config.retry_interval
    );

    let watcher = match WatcherBuilder::new(config).build() {
        Ok(watcher) => watcher,
        Err(e @ WatcherError::MissingCredentials(_)) => {
            tracing::error!("{}. Refusing to start.", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    watcher.start().await?;

    Ok(())
}
