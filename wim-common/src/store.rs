//! JSON document store for prepared output
//!
//! Writes `dataset.json` and `texts.json` into the output folder and reads
//! them back for submission. Every save overwrites; nothing is merged.

use crate::models::{DatasetDocument, TextDocument};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DATASET_FILE: &str = "dataset.json";
const TEXTS_FILE: &str = "texts.json";

/// Paths written by [`DatasetStore::save`]
#[derive(Debug, Clone)]
pub struct SavedPaths {
    pub dataset: PathBuf,
    pub texts: PathBuf,
}

/// Flat-file store rooted at the adapter output folder
#[derive(Debug, Clone)]
pub struct DatasetStore {
    output_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(DATASET_FILE)
    }

    pub fn texts_path(&self) -> PathBuf {
        self.output_dir.join(TEXTS_FILE)
    }

    /// Write both documents, creating the output folder if missing
    pub fn save(&self, dataset: &DatasetDocument, texts: &TextDocument) -> Result<SavedPaths> {
        fs::create_dir_all(&self.output_dir)?;

        let paths = SavedPaths {
            dataset: self.dataset_path(),
            texts: self.texts_path(),
        };

        write_json(&paths.dataset, dataset)?;
        write_json(&paths.texts, texts)?;

        Ok(paths)
    }

    /// Load the dataset metadata document
    ///
    /// Returns [`Error::NotFound`] when `dataset.json` has not been prepared yet.
    pub fn load_dataset(&self) -> Result<DatasetDocument> {
        let path = self.dataset_path();
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        read_json(&path)
    }

    /// Load the text corpus, `None` when `texts.json` is absent
    pub fn load_texts(&self) -> Result<Option<TextDocument>> {
        let path = self.texts_path();
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "Wrote JSON document");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorRecord, BiographicalData, TextItem};
    use tempfile::TempDir;

    fn sample_dataset() -> DatasetDocument {
        DatasetDocument::new(vec![AuthorRecord {
            entity_id: "wikidata:Q7259".to_string(),
            entity_ids: Some(vec!["local:women-in-math:ada_lovelace".to_string()]),
            entity_type: "person".to_string(),
            confidence: 0.8,
            name: "Ada Lovelace".to_string(),
            biographical_data: BiographicalData {
                birth_year: Some(1815),
                death_year: Some(1852),
                birthplace: Some("London".to_string()),
                field: "wikidata:Q395".to_string(),
            },
        }])
    }

    fn sample_texts() -> TextDocument {
        TextDocument {
            texts: vec![TextItem {
                entity_id: "wikidata:Q7259".to_string(),
                text: "Augusta Ada King, Countess of Lovelace…".to_string(),
            }],
        }
    }

    #[test]
    fn test_save_creates_output_dir() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path().join("adapter").join("output"));

        let paths = store.save(&sample_dataset(), &sample_texts()).unwrap();

        assert!(paths.dataset.exists());
        assert!(paths.texts.exists());
    }

    #[test]
    fn test_round_trip_preserves_documents() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path());
        let dataset = sample_dataset();
        let texts = sample_texts();

        store.save(&dataset, &texts).unwrap();

        assert_eq!(store.load_dataset().unwrap(), dataset);
        assert_eq!(store.load_texts().unwrap(), Some(texts));

        // Re-serializing what was read gives the bytes on disk
        let on_disk = fs::read_to_string(store.dataset_path()).unwrap();
        let reserialized = serde_json::to_string_pretty(&store.load_dataset().unwrap()).unwrap();
        assert_eq!(on_disk, reserialized);
    }

    #[test]
    fn test_save_overwrites_previous_output() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path());

        store.save(&sample_dataset(), &sample_texts()).unwrap();
        store
            .save(&DatasetDocument::new(vec![]), &TextDocument::default())
            .unwrap();

        assert!(store.load_dataset().unwrap().authors.is_empty());
        assert!(store.load_texts().unwrap().unwrap().texts.is_empty());
    }

    #[test]
    fn test_missing_dataset_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path());

        let err = store.load_dataset().unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_missing_texts_is_none() {
        let temp = TempDir::new().unwrap();
        let store = DatasetStore::new(temp.path());

        assert!(store.load_texts().unwrap().is_none());
    }
}
