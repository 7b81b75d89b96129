//! wim-submit - Women in Mathematics dataset submission
//!
//! Reads `dataset.json` and `texts.json` written by `wim-prepare` and POSTs
//! them to the Storywrangler API: metadata first, then one ingest request
//! per biography text.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{error, info};
use wim_common::config::load_toml_config;
use wim_common::DatasetStore;
use wim_submit::cli::Args;
use wim_submit::{SubmitMode, Submitter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_toml_config(args.config.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Starting wim-submit v{}", env!("CARGO_PKG_VERSION"));

    let paths = config.resolve_paths(&args.path_overrides());
    let api_url = config.resolve_api_url(args.api_url.as_deref());
    let mode = SubmitMode::from_flags(args.metadata_only, args.texts_only);

    info!("Output folder: {}", paths.output_dir.display());
    info!("API: {}", api_url);

    let submitter = Submitter::new(
        DatasetStore::new(&paths.output_dir),
        api_url,
        Duration::from_secs(config.submit.timeout_secs),
    )
    .context("Failed to create HTTP client")?;

    // Console-only reporting; the exit status stays 0
    if let Err(e) = submitter.run(mode).await {
        error!("❌ Submission stopped: {}", e);
    }

    Ok(())
}
