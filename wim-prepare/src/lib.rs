//! wim-prepare library interface
//!
//! Builds `dataset.json` and `texts.json` for the Women in Mathematics
//! Storywrangler dataset from the join/extract stage outputs.

pub mod cli;
pub mod services;

use crate::services::person_reader::PERSONAL_CSV;
use crate::services::{read_persons, DatasetBuilder, EntityResolver, PreparedDataset, TextIndex};
use tracing::{error, info, warn};
use wim_common::config::AdapterPaths;
use wim_common::{DatasetStore, Error, Result, SavedPaths};

/// Result of a complete prepare run
#[derive(Debug, Clone)]
pub struct PrepareOutcome {
    pub prepared: PreparedDataset,
    pub saved: SavedPaths,
    /// CSV rows rejected before matching
    pub rows_skipped: usize,
}

/// Run the full prepare pipeline and write both documents
///
/// Missing data or text folders are reported as [`Error::NotFound`] before
/// any work starts.
pub async fn prepare_and_save(paths: &AdapterPaths, resolver: EntityResolver) -> Result<PrepareOutcome> {
    if !paths.data_dir.is_dir() {
        error!("❌ Data directory not found: {}", paths.data_dir.display());
        return Err(Error::NotFound(paths.data_dir.display().to_string()));
    }
    if !paths.text_dir.is_dir() {
        error!("❌ Text directory not found: {}", paths.text_dir.display());
        return Err(Error::NotFound(paths.text_dir.display().to_string()));
    }

    let load = read_persons(&paths.data_dir.join(PERSONAL_CSV))?;
    if load.skipped > 0 {
        warn!("⚠️  Skipped {} unreadable rows in {}", load.skipped, PERSONAL_CSV);
    }

    let text_index = TextIndex::build(
        load.records.iter().map(|p| p.full_name.as_str()),
        &paths.text_dir,
    )?;

    let builder = DatasetBuilder::new(resolver, text_index);
    let prepared = builder.prepare(&load.records).await;

    let store = DatasetStore::new(&paths.output_dir);
    let saved = store.save(&prepared.dataset, &prepared.texts)?;

    log_summary(&prepared, &saved);

    Ok(PrepareOutcome {
        prepared,
        saved,
        rows_skipped: load.skipped,
    })
}

fn log_summary(prepared: &PreparedDataset, saved: &SavedPaths) {
    let stats = &prepared.stats;

    info!("✅ Prepared {} authors", prepared.dataset.authors.len());
    info!("✅ Found text for {} authors", prepared.texts.texts.len());
    if stats.failed > 0 {
        warn!("⚠️  {} people skipped after errors", stats.failed);
    }
    if stats.duplicate_entity_ids > 0 {
        warn!(
            "⚠️  {} authors share an entity_id with an earlier author",
            stats.duplicate_entity_ids
        );
    }

    info!("📁 Output:");
    info!("  - Metadata: {}", saved.dataset.display());
    info!("  - Texts: {}", saved.texts.display());

    info!("📊 Entity Mapping:");
    info!("  - Wikidata: {}", prepared.dataset.wikidata_count());
    info!("  - Local: {}", prepared.dataset.local_count());

    info!("🚀 Next Steps:");
    info!("  1. Submit to API:");
    if let Some(output_dir) = saved.dataset.parent() {
        info!("     wim-submit --output-dir {}", output_dir.display());
    }
}
