//! Dataset document models
//!
//! These are the two documents written by `wim-prepare` and read back by
//! `wim-submit`. Field names are the Storywrangler wire format; optional
//! fields serialize as `null` rather than being omitted.

use serde::{Deserialize, Serialize};

/// Dataset identifier used in API paths (`/api/{dataset_id}`)
pub const DATASET_ID: &str = "women-in-math";
/// Human readable dataset name
pub const DATASET_NAME: &str = "Women in Mathematics";
/// Storywrangler specification version the payload conforms to
pub const SPECIFICATION_VERSION: &str = "0.0.1";
/// Dataset description sent with the metadata
pub const DATASET_DESCRIPTION: &str = "Biographical data of women mathematicians from 1800s-1900s";

/// Entity type for every author in this dataset
pub const ENTITY_TYPE_PERSON: &str = "person";
/// Field of study tag (Wikidata item for "mathematics")
pub const FIELD_MATHEMATICS: &str = "wikidata:Q395";

/// Dataset metadata document (`dataset.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    pub dataset_id: String,
    pub name: String,
    pub specification_version: String,
    pub description: String,
    pub authors: Vec<AuthorRecord>,
}

impl DatasetDocument {
    /// Create the dataset document with its fixed identity fields
    pub fn new(authors: Vec<AuthorRecord>) -> Self {
        Self {
            dataset_id: DATASET_ID.to_string(),
            name: DATASET_NAME.to_string(),
            specification_version: SPECIFICATION_VERSION.to_string(),
            description: DATASET_DESCRIPTION.to_string(),
            authors,
        }
    }

    /// Number of authors whose primary identifier is a Wikidata item
    pub fn wikidata_count(&self) -> usize {
        self.authors
            .iter()
            .filter(|a| a.entity_id.starts_with("wikidata:"))
            .count()
    }

    /// Number of authors resolved only to a local identifier
    pub fn local_count(&self) -> usize {
        self.authors
            .iter()
            .filter(|a| a.entity_id.starts_with("local:"))
            .count()
    }
}

/// One author entry in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Primary namespaced identifier (`wikidata:Q…` or `local:women-in-math:…`)
    pub entity_id: String,
    /// Alternate identifiers, `null` when resolution was local-only
    pub entity_ids: Option<Vec<String>>,
    pub entity_type: String,
    pub confidence: f64,
    pub name: String,
    pub biographical_data: BiographicalData,
}

/// Biographical fields attached to an author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiographicalData {
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub birthplace: Option<String>,
    pub field: String,
}

/// Text corpus document (`texts.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextDocument {
    #[serde(default)]
    pub texts: Vec<TextItem>,
}

/// Biography text for one entity, also the body of an ingest request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub entity_id: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(entity_id: &str) -> AuthorRecord {
        AuthorRecord {
            entity_id: entity_id.to_string(),
            entity_ids: None,
            entity_type: ENTITY_TYPE_PERSON.to_string(),
            confidence: 0.5,
            name: "Ada".to_string(),
            biographical_data: BiographicalData {
                birth_year: None,
                death_year: None,
                birthplace: None,
                field: FIELD_MATHEMATICS.to_string(),
            },
        }
    }

    #[test]
    fn test_dataset_identity_fields() {
        let doc = DatasetDocument::new(vec![]);
        assert_eq!(doc.dataset_id, "women-in-math");
        assert_eq!(doc.specification_version, "0.0.1");
        assert!(doc.authors.is_empty());
    }

    #[test]
    fn test_missing_optionals_serialize_as_null() {
        let json = serde_json::to_value(author("local:women-in-math:ada")).unwrap();
        assert!(json["entity_ids"].is_null());
        assert!(json["biographical_data"]["birth_year"].is_null());
        assert!(json["biographical_data"]["birthplace"].is_null());
        assert_eq!(json["biographical_data"]["field"], "wikidata:Q395");
    }

    #[test]
    fn test_namespace_counts() {
        let doc = DatasetDocument::new(vec![
            author("wikidata:Q7259"),
            author("local:women-in-math:a"),
            author("local:women-in-math:b"),
        ]);
        assert_eq!(doc.wikidata_count(), 1);
        assert_eq!(doc.local_count(), 2);
    }

    #[test]
    fn test_text_document_tolerates_missing_list() {
        let doc: TextDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.texts.is_empty());
    }
}
