//! Classification output: street category, per-record result, and the
//! index-keyed map a whole batch reply parses into.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Street type of a business location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Main road.
    Street,
    /// Small street, alley or residential block. These are the promising leads.
    Alley,
}

impl Category {
    pub fn is_alley(self) -> bool {
        self == Category::Alley
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Street => write!(f, "Street"),
            Category::Alley => write!(f, "Alley"),
        }
    }
}

/// Model verdict for one record of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// One-sentence outreach draft as written by the model.
    pub message: String,
}

// ============================================================================
// Analysis Map
// ============================================================================

/// Batch-local index → classification.
///
/// Indices the model did not answer for are simply absent; callers supply
/// their own fallback. Out-of-range indices are kept as the model sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMap(BTreeMap<usize, ClassificationResult>);

impl AnalysisMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result. A later line for the same index replaces an earlier one.
    pub fn insert(&mut self, index: usize, result: ClassificationResult) {
        self.0.insert(index, result);
    }

    pub fn get(&self, index: usize) -> Option<&ClassificationResult> {
        self.0.get(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ClassificationResult)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Number of entries classified as alley.
    pub fn alley_count(&self) -> usize {
        self.0.values().filter(|r| r.category.is_alley()).count()
    }
}

impl FromIterator<(usize, ClassificationResult)> for AnalysisMap {
    fn from_iter<I: IntoIterator<Item = (usize, ClassificationResult)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
