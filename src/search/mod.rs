//! Map Search Collaborator
//!
//! Finds businesses near a location. The public entry point never fails:
//! transport or provider errors are logged and become an empty result set.

use crate::types::RawRecord;
use async_trait::async_trait;
use thiserror::Error;

mod serpapi;

pub use serpapi::SerpApiClient;

/// Search client errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search API key not configured")]
    MissingApiKey,
    /// URL stripped: it carries the API key as a query parameter
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("search API returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("invalid search response: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Http(e.without_url())
    }
}

/// Source of business records for an area
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Up to `result_limit` records for `query`; empty on any failure.
    async fn search(&self, query: &str, result_limit: usize) -> Vec<RawRecord>;
}

/// Query text sent to the provider, e.g. `"Laundry di Tebet, Jakarta"`.
pub fn build_query(business_type: &str, connector: &str, location: &str) -> String {
    format!("{} {} {}", business_type.trim(), connector.trim(), location.trim())
}
