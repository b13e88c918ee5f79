//! SerpApi Google Maps client

use super::{SearchError, SearchProvider};
use crate::config::SearchConfig;
use crate::types::RawRecord;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct MapsResponse {
    #[serde(default)]
    local_results: Vec<RawRecord>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the SerpApi `google_maps` engine
#[derive(Clone)]
pub struct SerpApiClient {
    http: reqwest::Client,
    endpoint: String,
    engine: String,
    language: String,
    api_key: String,
}

impl SerpApiClient {
    /// Create a new client. A blank `api_key` is accepted; searches then
    /// return nothing without touching the network.
    pub fn new(config: &SearchConfig, api_key: &str) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            engine: config.engine.clone(),
            language: config.language.clone(),
            api_key: api_key.trim().to_string(),
        })
    }

    fn query_params<'a>(&'a self, query: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("engine", self.engine.as_str()),
            ("q", query),
            ("type", "search"),
            ("hl", self.language.as_str()),
            ("api_key", self.api_key.as_str()),
        ]
    }

    /// Fallible search; [`SearchProvider::search`] wraps this.
    pub async fn try_search(
        &self,
        query: &str,
        result_limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        debug!(query = %query, engine = %self.engine, "Sending map search request");

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::ServerError(status));
        }

        let body = resp.bytes().await?;
        let parsed = parse_maps_response(&body)?;
        Ok(parsed.into_iter().take(result_limit).collect())
    }
}

fn parse_maps_response(body: &[u8]) -> Result<Vec<RawRecord>, SearchError> {
    let parsed: MapsResponse = serde_json::from_slice(body)?;
    if let Some(err) = parsed.error {
        // SerpApi reports "no results" and quota problems in-band with 200
        warn!(error = %err, "Map search provider reported an error");
    }
    Ok(parsed.local_results)
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str, result_limit: usize) -> Vec<RawRecord> {
        match self.try_search(query, result_limit).await {
            Ok(records) => {
                info!(query = %query, results = records.len(), "Map search complete");
                records
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Map search failed, returning no results");
                Vec::new()
            }
        }
    }
}
