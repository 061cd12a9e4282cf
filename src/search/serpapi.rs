//! SerpAPI Client
//!
//! Fetches Google organic results through SerpAPI. The raw JSON page is
//! returned untouched; interpreting `error` and `organic_results` is left to
//! the [`ResultFetcher`](super::fetcher::ResultFetcher), which decides when
//! pagination stops.

use async_trait::async_trait;
use serde_json::Value;
use serpapi_search_rust::serp_api_search::SerpApiSearch;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("SerpAPI key not configured")]
    NoApiKey,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// One search-API page request.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a search with the given query parameters and return the JSON body.
    async fn search(&self, params: &HashMap<String, String>) -> Result<Value, SearchError>;
}

/// SerpAPI-backed [`SearchBackend`] for the Google engine
pub struct SerpApiBackend {
    api_key: String,
}

impl SerpApiBackend {
    /// Create a new SerpAPI backend
    pub fn new(api_key: String) -> Result<Self, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::NoApiKey);
        }
        Ok(Self { api_key })
    }

    /// Configure backend from config
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::new(config.serpapi_key.clone())
    }
}

#[async_trait]
impl SearchBackend for SerpApiBackend {
    async fn search(&self, params: &HashMap<String, String>) -> Result<Value, SearchError> {
        debug!(
            q = params.get("q").map(String::as_str).unwrap_or_default(),
            start = params.get("start").map(String::as_str).unwrap_or_default(),
            "Calling SerpAPI"
        );

        let search = SerpApiSearch::google(params.clone(), self.api_key.clone());

        let results = search
            .json()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        if !results.is_object() {
            return Err(SearchError::ParseError(
                "Expected a JSON object at the top level".to_string(),
            ));
        }

        Ok(results)
    }
}
