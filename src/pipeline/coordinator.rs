//! Prospecting Coordinator
//!
//! Wires the search collaborator and the batch classifier to a session:
//! scan an area, then render the current page as lead cards.

use super::classifier::BatchClassifier;
use super::session::SessionContext;
use crate::config::{AppConfig, Secrets};
use crate::llm::{GeminiBackend, LlmError, ModelInvoker};
use crate::search::{build_query, SearchError, SearchProvider, SerpApiClient};
use crate::types::LeadCard;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Why a scan left the session untouched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("no location given")]
    EmptyLocation,
    #[error("no results for '{query}'")]
    NoResults { query: String },
}

/// Failure to build the HTTP collaborators
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("model client: {0}")]
    Llm(#[from] LlmError),
    #[error("search client: {0}")]
    Search(#[from] SearchError),
}

/// Search + classify orchestration over a [`SessionContext`]
pub struct ProspectingCoordinator {
    search: Arc<dyn SearchProvider>,
    classifier: BatchClassifier,
    business_type: String,
    connector: String,
    result_limit: usize,
}

impl ProspectingCoordinator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        classifier: BatchClassifier,
        config: &AppConfig,
    ) -> Self {
        Self {
            search,
            classifier,
            business_type: config.search.business_type.clone(),
            connector: config.search.connector.clone(),
            result_limit: config.search.result_limit,
        }
    }

    /// Build with the SerpApi and Gemini HTTP clients.
    pub fn from_config(config: &AppConfig, secrets: &Secrets) -> Result<Self, SetupError> {
        let search = SerpApiClient::new(&config.search, &secrets.serpapi_key)?;
        let backend = GeminiBackend::new(&config.llm, &secrets.gemini_api_key)?;
        let invoker = ModelInvoker::new(
            Arc::new(backend),
            config.llm.candidates.clone(),
            Duration::from_secs(config.llm.timeout_secs),
        );

        Ok(Self::new(
            Arc::new(search),
            BatchClassifier::new(invoker),
            config,
        ))
    }

    /// Search `location` and, if anything came back, replace the session's results.
    ///
    /// Returns the number of records found.
    pub async fn scan(
        &self,
        session: &mut SessionContext,
        location: &str,
    ) -> Result<usize, ScanError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ScanError::EmptyLocation);
        }

        let query = build_query(&self.business_type, &self.connector, location);
        let records = self.search.search(&query, self.result_limit).await;
        if records.is_empty() {
            warn!(query = %query, "Scan found nothing, keeping previous results");
            return Err(ScanError::NoResults { query });
        }

        let count = records.len();
        session.load_results(location, records);
        info!(location = %location, results = count, "Scan complete");
        Ok(count)
    }

    /// Classify (or fetch from cache) the current page and gate it by tier.
    pub async fn current_cards(&self, session: &mut SessionContext) -> Vec<LeadCard> {
        match session.analyse_current_page(&self.classifier).await {
            Some(analysis) => session.cards(&analysis),
            None => Vec::new(),
        }
    }
}
