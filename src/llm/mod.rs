//! LLM Backend Module
//!
//! Provides a unified interface for text-generation backends plus the
//! candidate-fallback invoker used by the classification pipeline.
//!
//! ## Architecture
//!
//! - **LlmBackend**: one provider, any of its models, addressed by model id
//! - **GeminiBackend**: Google Generative Language HTTP API
//! - **ModelInvoker**: walks an ordered candidate list until one model returns text

use async_trait::async_trait;
use thiserror::Error;

mod gemini;
pub mod invoker;

pub use gemini::GeminiBackend;
pub use invoker::{CandidateAttempt, CandidateOutcome, Invocation, ModelInvoker};

// ============================================================================
// Error Types
// ============================================================================

/// Errors from a single model call
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key configured for the provider
    #[error("API key not configured")]
    MissingApiKey,

    /// Transport failure. The URL is stripped before wrapping.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Provider answered with a non-success status (quota, unknown model, ...)
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body was not the expected JSON
    #[error("Invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Call succeeded but produced no text
    #[error("Model returned no text")]
    EmptyReply,

    /// Call did not finish in time
    #[error("Model call timed out after {0} seconds")]
    Timeout(u64),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Http(e.without_url())
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Unified trait for LLM backends
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response from `model_id` given a prompt
    async fn generate(&self, model_id: &str, prompt: &str) -> Result<String, LlmError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &'static str;
}
