//! Storywrangler submission client
//!
//! Pushes prepared documents in two phases:
//! 1. `POST /api/{dataset_id}` with the full dataset metadata
//! 2. `POST /api/{dataset_id}/ingest` once per biography text
//!
//! Requests go out one at a time, in document order. A failed text item is
//! counted and the next one is attempted; a failed metadata submission stops
//! the run before any text is sent.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use wim_common::models::{TextItem, DATASET_ID};
use wim_common::DatasetStore;

const ENTITY_ID_DISPLAY_CHARS: usize = 50;

/// Submission errors
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Dataset file not found: {0}")]
    DatasetNotFound(String),

    #[error("Could not connect to {0}")]
    Connection(String),

    #[error("API error {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Store error: {0}")]
    Store(#[from] wim_common::Error),
}

/// Which submission phases to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    All,
    MetadataOnly,
    TextsOnly,
}

impl SubmitMode {
    /// Map CLI flags to a mode; `metadata_only` wins when both are set
    pub fn from_flags(metadata_only: bool, texts_only: bool) -> Self {
        if metadata_only {
            if texts_only {
                warn!("--metadata-only and --texts-only both given; submitting metadata only");
            }
            SubmitMode::MetadataOnly
        } else if texts_only {
            SubmitMode::TextsOnly
        } else {
            SubmitMode::All
        }
    }
}

/// Tallies for the text ingestion phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Sum of `ngrams_extracted` over successful items
    pub ngrams_extracted: u64,
}

/// Outcome of a single ingest request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Ingested { ngrams: u64 },
    Failed(String),
}

/// Result of [`Submitter::submit_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    /// Author count acknowledged by the metadata endpoint
    pub authors: u64,
    pub ingest: IngestSummary,
}

/// Read a count field from a JSON response body
///
/// The count is informational; a missing, `null` or non-integer value reads
/// as 0 and integral floats (`12.0`) are accepted.
fn count_field(body: &Value, key: &str) -> u64 {
    match body.get(key) {
        Some(v) => v
            .as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .unwrap_or(0),
        None => 0,
    }
}

/// Two-phase Storywrangler submitter
pub struct Submitter {
    http_client: reqwest::Client,
    store: DatasetStore,
    api_url: String,
    dataset_id: String,
}

impl Submitter {
    pub fn new(store: DatasetStore, api_url: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            store,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            dataset_id: DATASET_ID.to_string(),
        })
    }

    fn dataset_url(&self) -> String {
        format!("{}/api/{}", self.api_url, self.dataset_id)
    }

    fn ingest_url(&self) -> String {
        format!("{}/ingest", self.dataset_url())
    }

    /// Submit dataset metadata; returns the author count reported by the API
    pub async fn submit_metadata(&self) -> Result<u64, SubmitError> {
        let dataset = match self.store.load_dataset() {
            Ok(dataset) => dataset,
            Err(wim_common::Error::NotFound(path)) => {
                error!("❌ Dataset file not found: {}", path);
                error!("   Run wim-prepare first!");
                return Err(SubmitError::DatasetNotFound(path));
            }
            Err(e) => {
                error!("❌ Error: {}", e);
                return Err(e.into());
            }
        };

        let url = self.dataset_url();
        info!("📤 Submitting metadata to {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&dataset)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Failed: {}", status.as_u16());
            error!("   {}", body);
            return Err(SubmitError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("❌ Error: {}", e);
                return Err(SubmitError::Parse(e.to_string()));
            }
        };

        let authors = count_field(&body, "authors");
        info!("✅ Success! {} authors submitted", authors);
        Ok(authors)
    }

    /// Submit every prepared text for ingestion
    ///
    /// A missing or empty `texts.json` is a warning, not an error, and
    /// yields an empty summary.
    pub async fn submit_texts(&self) -> Result<IngestSummary, SubmitError> {
        let loaded = match self.store.load_texts() {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("❌ Error: {}", e);
                return Err(e.into());
            }
        };

        let texts = match loaded {
            Some(doc) => doc.texts,
            None => {
                warn!("⚠️  No texts file found: {}", self.store.texts_path().display());
                return Ok(IngestSummary::default());
            }
        };

        if texts.is_empty() {
            warn!("⚠️  No texts to ingest");
            return Ok(IngestSummary::default());
        }

        let total = texts.len();
        info!("📤 Ingesting {} texts to {}", total, self.ingest_url());

        let mut summary = IngestSummary::default();

        for (idx, item) in texts.iter().enumerate() {
            let label = truncate_chars(&item.entity_id, ENTITY_ID_DISPLAY_CHARS);
            summary.attempted += 1;

            match self.ingest_one(item).await {
                IngestOutcome::Ingested { ngrams } => {
                    info!("[{}/{}] {}... ✅ ({} n-grams)", idx + 1, total, label, ngrams);
                    summary.succeeded += 1;
                    summary.ngrams_extracted += ngrams;
                }
                IngestOutcome::Failed(reason) => {
                    warn!("[{}/{}] {}... ❌ {}", idx + 1, total, label, reason);
                    summary.failed += 1;
                }
            }
        }

        info!("✅ Ingested: {}/{}", summary.succeeded, total);
        if summary.failed > 0 {
            warn!("⚠️  Failed: {}", summary.failed);
        }

        Ok(summary)
    }

    /// POST one text item; never fails the batch
    pub async fn ingest_one(&self, item: &TextItem) -> IngestOutcome {
        debug!(url = %self.ingest_url(), entity_id = %item.entity_id, "POST ingest");

        let response = match self.http_client.post(self.ingest_url()).json(item).send().await {
            Ok(response) => response,
            Err(e) => return IngestOutcome::Failed(e.to_string()),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return IngestOutcome::Failed(status.as_u16().to_string());
        }

        match response.json::<Value>().await {
            Ok(body) => IngestOutcome::Ingested {
                ngrams: count_field(&body, "ngrams_extracted"),
            },
            Err(e) => IngestOutcome::Failed(e.to_string()),
        }
    }

    /// Submit metadata, then texts; texts are skipped if metadata fails
    pub async fn submit_all(&self) -> Result<SubmitReport, SubmitError> {
        info!("🚀 Submitting Women in Mathematics dataset to Storywrangler");

        let authors = match self.submit_metadata().await {
            Ok(authors) => authors,
            Err(e) => {
                error!("❌ Metadata submission failed. Aborting.");
                return Err(e);
            }
        };

        let ingest = self.submit_texts().await?;

        let dataset_url = self.dataset_url();
        info!("✅ Submission complete!");
        info!("🔍 View your data:");
        info!("  - Dataset: {}", dataset_url);
        info!("  - Authors: {}/authors", dataset_url);
        info!("  - N-grams: {}/ngrams", dataset_url);

        Ok(SubmitReport { authors, ingest })
    }

    /// Run the phases selected by `mode`
    pub async fn run(&self, mode: SubmitMode) -> Result<SubmitReport, SubmitError> {
        match mode {
            SubmitMode::All => self.submit_all().await,
            SubmitMode::MetadataOnly => Ok(SubmitReport {
                authors: self.submit_metadata().await?,
                ingest: IngestSummary::default(),
            }),
            SubmitMode::TextsOnly => Ok(SubmitReport {
                authors: 0,
                ingest: self.submit_texts().await?,
            }),
        }
    }

    fn request_error(&self, e: reqwest::Error) -> SubmitError {
        if e.is_connect() {
            error!("❌ Could not connect to {}", self.api_url);
            error!("   Is the API running?");
            SubmitError::Connection(self.api_url.clone())
        } else {
            error!("❌ Error: {}", e);
            SubmitError::Network(e.to_string())
        }
    }
}

/// First `max` characters of `s`
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(SubmitMode::from_flags(false, false), SubmitMode::All);
        assert_eq!(SubmitMode::from_flags(true, false), SubmitMode::MetadataOnly);
        assert_eq!(SubmitMode::from_flags(false, true), SubmitMode::TextsOnly);
        assert_eq!(SubmitMode::from_flags(true, true), SubmitMode::MetadataOnly);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("wikidata:Q7259", 50), "wikidata:Q7259");
        assert_eq!(truncate_chars("local:women-in-math:x", 5), "local");
        assert_eq!(truncate_chars("émilie", 2), "ém");
    }

    #[test]
    fn test_count_field_is_lenient() {
        let body = serde_json::json!({ "a": 7, "b": null, "c": 12.0, "d": 1.5, "e": "3", "f": -2 });
        assert_eq!(count_field(&body, "a"), 7);
        assert_eq!(count_field(&body, "b"), 0);
        assert_eq!(count_field(&body, "c"), 12);
        assert_eq!(count_field(&body, "d"), 0);
        assert_eq!(count_field(&body, "e"), 0);
        assert_eq!(count_field(&body, "f"), 0);
        assert_eq!(count_field(&body, "missing"), 0);
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let temp = tempfile::TempDir::new().unwrap();
        let submitter = Submitter::new(
            DatasetStore::new(temp.path()),
            "http://localhost:8000/",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(submitter.dataset_url(), "http://localhost:8000/api/women-in-math");
        assert_eq!(
            submitter.ingest_url(),
            "http://localhost:8000/api/women-in-math/ingest"
        );
    }
}
