//! wim-prepare - Women in Mathematics dataset preparation
//!
//! Matches personal records to extracted biography texts, resolves each
//! person to a Wikidata or local identifier, and writes `dataset.json` and
//! `texts.json` for submission with `wim-submit`.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use wim_common::config::load_toml_config;
use wim_prepare::cli::Args;
use wim_prepare::services::{EntityResolver, NamespacedIdValidator, WikidataClient};

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

    info!("Starting wim-prepare v{}", env!("CARGO_PKG_VERSION"));

    let paths = config.resolve_paths(&args.path_overrides());
    info!("📁 Paths:");
    info!("  Data: {}", paths.data_dir.display());
    info!("  Text: {}", paths.text_dir.display());
    info!("  Output: {}", paths.output_dir.display());

    let search = WikidataClient::new(&config.wikidata).context("Failed to create Wikidata client")?;
    let resolver = EntityResolver::new(Arc::new(search), Arc::new(NamespacedIdValidator::new()))
        .with_search_limit(config.wikidata.search_limit);

    let outcome = wim_prepare::prepare_and_save(&paths, resolver).await?;

    info!("{}", outcome.prepared.stats.display_string());

    Ok(())
}
