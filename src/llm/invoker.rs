//! Model Invoker - ordered candidate fallback
//!
//! Tries each candidate model in priority order and stops at the first one
//! that returns non-empty text. Every attempt is recorded and logged; no
//! failure is ever returned to the caller. When all candidates fail the
//! invocation simply carries no text.

use super::{LlmBackend, LlmError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of one candidate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    Succeeded,
    /// Call returned, but with blank text
    Empty,
    Failed(String),
}

/// Record of one candidate call
#[derive(Debug, Clone)]
pub struct CandidateAttempt {
    pub model_id: String,
    pub outcome: CandidateOutcome,
    pub elapsed: Duration,
}

/// Result of walking the candidate list
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// First non-empty reply, if any candidate produced one
    pub text: Option<String>,
    pub attempts: Vec<CandidateAttempt>,
}

impl Invocation {
    /// Model that produced `text`.
    pub fn model_used(&self) -> Option<&str> {
        self.attempts
            .iter()
            .find(|a| a.outcome == CandidateOutcome::Succeeded)
            .map(|a| a.model_id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }
}

/// Candidate-fallback caller over a single backend
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn LlmBackend>,
    candidates: Vec<String>,
    timeout: Duration,
}

impl ModelInvoker {
    /// `candidates` are ordered most to least preferred. `timeout` bounds
    /// each candidate call separately.
    pub fn new(backend: Arc<dyn LlmBackend>, candidates: Vec<String>, timeout: Duration) -> Self {
        Self {
            backend,
            candidates,
            timeout,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    async fn try_candidate(&self, model_id: &str, prompt: &str) -> Result<String, LlmError> {
        tokio::time::timeout(self.timeout, self.backend.generate(model_id, prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
    }

    /// Call candidates in order until one returns text.
    pub async fn invoke(&self, prompt: &str) -> Invocation {
        let mut invocation = Invocation::default();

        for model_id in &self.candidates {
            let start = Instant::now();
            let result = self.try_candidate(model_id, prompt).await;
            let elapsed = start.elapsed();

            let outcome = match result {
                Ok(text) if !text.trim().is_empty() => {
                    info!(
                        backend = self.backend.backend_name(),
                        model = %model_id,
                        latency_ms = elapsed.as_millis(),
                        "Model candidate answered"
                    );
                    invocation.text = Some(text);
                    CandidateOutcome::Succeeded
                }
                Ok(_) | Err(LlmError::EmptyReply) => {
                    warn!(model = %model_id, "Model candidate returned empty text, trying next");
                    CandidateOutcome::Empty
                }
                Err(e) => {
                    warn!(model = %model_id, error = %e, "Model candidate failed, trying next");
                    CandidateOutcome::Failed(e.to_string())
                }
            };

            invocation.attempts.push(CandidateAttempt {
                model_id: model_id.clone(),
                outcome,
                elapsed,
            });

            if invocation.text.is_some() {
                return invocation;
            }
        }

        debug!(
            attempts = invocation.attempts.len(),
            "All model candidates exhausted without text"
        );
        invocation
    }
}
