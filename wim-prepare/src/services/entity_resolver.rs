//! Person to entity identifier resolution
//!
//! Looks the name up in the knowledge base; the first hit described as a
//! mathematician becomes the primary `wikidata:` identifier (confidence 0.8)
//! with the local identifier kept as an alternate. Without such a hit the
//! local identifier is primary (confidence 0.5). Search failures never
//! surface to the caller; only identifier validation can fail a resolution.

use crate::services::entity_validator::IdentifierValidator;
use crate::services::wikidata_client::EntitySearch;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Namespace prefix for identifiers minted by this dataset
pub const LOCAL_NAMESPACE: &str = "local:women-in-math";
/// Confidence for a knowledge base match
pub const WIKIDATA_CONFIDENCE: f64 = 0.8;
/// Confidence for a local-only identifier
pub const LOCAL_CONFIDENCE: f64 = 0.5;
/// Default number of search hits considered
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

const DESCRIPTION_KEYWORD: &str = "mathematician";

/// Resolution errors
#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("Invalid entity_id: {0}")]
    InvalidEntityId(String),

    #[error("Invalid alternate entity_id: {0}")]
    InvalidAlternateId(String),
}

/// Outcome of a knowledge base lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A mathematician item was found (item id, e.g. `Q7259`)
    Found(String),
    /// Search succeeded but nothing qualified
    NotFound,
    /// Search failed; treated like [`Lookup::NotFound`]
    TransientError(String),
}

/// Resolved identifiers for one person
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMapping {
    pub entity_id: String,
    pub entity_ids: Option<Vec<String>>,
    pub confidence: f64,
}

/// Normalize a name into a local identifier fragment
///
/// Lowercases, turns spaces into underscores, and drops `.` `,` `(` `)`.
/// Applying it twice gives the same result as applying it once.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .replace(&['.', ',', '(', ')'][..], "")
}

/// Local fallback identifier for a name
pub fn local_entity_id(name: &str) -> String {
    format!("{}:{}", LOCAL_NAMESPACE, slugify(name))
}

/// Entity resolver with injected search and validation collaborators
pub struct EntityResolver {
    search: Arc<dyn EntitySearch>,
    validator: Arc<dyn IdentifierValidator>,
    search_limit: usize,
}

impl EntityResolver {
    pub fn new(search: Arc<dyn EntitySearch>, validator: Arc<dyn IdentifierValidator>) -> Self {
        Self {
            search,
            validator,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit;
        self
    }

    /// Search the knowledge base for a mathematician named `name`
    pub async fn lookup(&self, name: &str) -> Lookup {
        let hits = match self.search.search(name, self.search_limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("  ⚠️  {}", e);
                return Lookup::TransientError(e.to_string());
            }
        };

        let qid = hits.into_iter().find_map(|hit| {
            let description = hit.description.as_deref().unwrap_or_default();
            description
                .to_lowercase()
                .contains(DESCRIPTION_KEYWORD)
                .then_some(hit.id)
        });

        match qid {
            Some(qid) => {
                info!("  ✓ {}", qid);
                Lookup::Found(qid)
            }
            None => Lookup::NotFound,
        }
    }

    /// Resolve a person's name to validated identifiers
    pub async fn resolve(&self, name: &str) -> Result<EntityMapping, ResolveError> {
        let local_id = local_entity_id(name);

        let mapping = match self.lookup(name).await {
            Lookup::Found(qid) => EntityMapping {
                entity_id: format!("wikidata:{}", qid),
                entity_ids: Some(vec![local_id]),
                confidence: WIKIDATA_CONFIDENCE,
            },
            Lookup::NotFound | Lookup::TransientError(_) => EntityMapping {
                entity_id: local_id,
                entity_ids: None,
                confidence: LOCAL_CONFIDENCE,
            },
        };

        if !self.validator.validate(&mapping.entity_id) {
            return Err(ResolveError::InvalidEntityId(mapping.entity_id));
        }

        for alternate in mapping.entity_ids.iter().flatten() {
            if !self.validator.validate(alternate) {
                return Err(ResolveError::InvalidAlternateId(alternate.clone()));
            }
        }

        Ok(mapping)
    }
}
