//! Dataset assembly
//!
//! Walks the personal records in input order, resolves each one to entity
//! identifiers, and collects author metadata plus any matched biography
//! text. A record that fails resolution is logged, counted, and left out of
//! both documents; the run continues with the next record.

use crate::services::entity_resolver::{EntityMapping, EntityResolver};
use crate::services::name_matcher::TextIndex;
use crate::services::person_reader::PersonRecord;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{error, info, warn};
use wim_common::models::{
    AuthorRecord, BiographicalData, DatasetDocument, TextDocument, TextItem, ENTITY_TYPE_PERSON,
    FIELD_MATHEMATICS,
};

/// Counters for one prepare run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrepareStats {
    /// Records seen
    pub total: usize,
    /// Records that produced an author
    pub processed: usize,
    /// Records skipped because resolution failed
    pub failed: usize,
    /// Authors with non-empty biography text
    pub texts_found: usize,
    /// Authors resolved to a Wikidata item
    pub wikidata: usize,
    /// Authors with a local-only identifier
    pub local: usize,
    /// Authors whose entity_id was already used by an earlier author
    pub duplicate_entity_ids: usize,
}

impl PrepareStats {
    pub fn display_string(&self) -> String {
        format!(
            "{} of {} people prepared ({} failed), {} with text, {} Wikidata / {} local",
            self.processed, self.total, self.failed, self.texts_found, self.wikidata, self.local
        )
    }
}

/// Output of [`DatasetBuilder::prepare`]
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub dataset: DatasetDocument,
    pub texts: TextDocument,
    pub stats: PrepareStats,
}

/// Builds the dataset and text documents from personal records
pub struct DatasetBuilder {
    resolver: EntityResolver,
    text_index: TextIndex,
}

impl DatasetBuilder {
    pub fn new(resolver: EntityResolver, text_index: TextIndex) -> Self {
        Self {
            resolver,
            text_index,
        }
    }

    /// Prepare both documents from `persons`, strictly in order
    pub async fn prepare(&self, persons: &[PersonRecord]) -> PreparedDataset {
        info!("🔧 Preparing Women in Mathematics dataset");

        let total = persons.len();
        let mut stats = PrepareStats {
            total,
            ..Default::default()
        };
        let mut authors = Vec::with_capacity(total);
        let mut texts = Vec::new();
        let mut seen_ids = HashSet::new();

        for (idx, person) in persons.iter().enumerate() {
            let name = person.full_name.as_str();
            info!("[{}/{}] {}", idx + 1, total, name);

            let mapping = match self.resolver.resolve(name).await {
                Ok(mapping) => mapping,
                Err(e) => {
                    error!("  ❌ Error: {}", e);
                    stats.failed += 1;
                    continue;
                }
            };

            if !seen_ids.insert(mapping.entity_id.clone()) {
                warn!(entity_id = %mapping.entity_id, "  ⚠️  Duplicate entity_id");
                stats.duplicate_entity_ids += 1;
            }

            if mapping.entity_id.starts_with("wikidata:") {
                stats.wikidata += 1;
            } else {
                stats.local += 1;
            }

            let entity_id = mapping.entity_id.clone();
            authors.push(author_record(person, mapping));
            stats.processed += 1;

            match self.text_index.read_text(name) {
                Some(text) if !text.is_empty() => {
                    info!("  ✓ Text: {} chars", text.chars().count());
                    texts.push(TextItem { entity_id, text });
                    stats.texts_found += 1;
                }
                _ => {}
            }
        }

        PreparedDataset {
            dataset: DatasetDocument::new(authors),
            texts: TextDocument { texts },
            stats,
        }
    }
}

/// Combine a person and its resolved identifiers into an author entry
pub fn author_record(person: &PersonRecord, mapping: EntityMapping) -> AuthorRecord {
    AuthorRecord {
        entity_id: mapping.entity_id,
        entity_ids: mapping.entity_ids,
        entity_type: ENTITY_TYPE_PERSON.to_string(),
        confidence: mapping.confidence,
        name: person.full_name.clone(),
        biographical_data: BiographicalData {
            birth_year: person.birth_year,
            death_year: person.death_year,
            birthplace: person.birthplace.clone(),
            field: FIELD_MATHEMATICS.to_string(),
        },
    }
}
