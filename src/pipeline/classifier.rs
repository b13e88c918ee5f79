//! Prompt → model → parse chain for one batch

use super::batch::Batch;
use crate::llm::ModelInvoker;
use crate::protocol::{build_prompt, parse_reply};
use crate::types::AnalysisMap;
use tracing::info;

/// Runs a batch through the model and parses the reply.
#[derive(Clone)]
pub struct BatchClassifier {
    invoker: ModelInvoker,
}

impl BatchClassifier {
    pub fn new(invoker: ModelInvoker) -> Self {
        Self { invoker }
    }

    /// Classify every record of `batch`.
    ///
    /// `None` means no model produced text; `Some` may still be an empty map
    /// if the reply held no usable lines.
    pub async fn classify(&self, batch: &Batch<'_>) -> Option<AnalysisMap> {
        let prompt = build_prompt(batch.records());
        let invocation = self.invoker.invoke(&prompt).await;
        let text = invocation.text.as_deref()?;

        let map = parse_reply(text);
        info!(
            model = invocation.model_used().unwrap_or("?"),
            batch_len = batch.len(),
            classified = map.len(),
            alleys = map.alley_count(),
            "Batch classified"
        );
        Some(map)
    }
}
