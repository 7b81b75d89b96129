//! Wikidata entity search client
//!
//! Uses the `wbsearchentities` action of the MediaWiki API to find candidate
//! items for a person's name. Callers treat every failure here as "no match",
//! so errors carry just enough detail for a log line.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use wim_common::config::WikidataConfig;

/// Entity search errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}")]
    ApiError(u16),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// One search hit, in the order the knowledge base ranked it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    /// Item identifier (e.g. `Q7259`)
    pub id: String,
    /// Short description (e.g. "English mathematician and writer")
    #[serde(default)]
    pub description: Option<String>,
}

/// Knowledge base search collaborator
#[async_trait]
pub trait EntitySearch: Send + Sync {
    /// Search for up to `limit` items matching `name`
    async fn search(&self, name: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
}

/// Wikidata API client
pub struct WikidataClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl WikidataClient {
    pub fn new(config: &WikidataConfig) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl EntitySearch for WikidataClient {
    async fn search(&self, name: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let limit = limit.to_string();
        let params = [
            ("action", "wbsearchentities"),
            ("format", "json"),
            ("language", "en"),
            ("type", "item"),
            ("search", name),
            ("limit", limit.as_str()),
        ];

        tracing::debug!(name = %name, endpoint = %self.endpoint, "Querying Wikidata search");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SearchError::ApiError(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        tracing::debug!(name = %name, hits = body.search.len(), "Wikidata search complete");

        Ok(body.search)
    }
}
