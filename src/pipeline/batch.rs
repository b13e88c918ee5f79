//! Batches and their cache keys

use crate::types::RawRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("a batch needs at least one record")]
    Empty,
}

/// One page of records classified together. Never empty.
///
/// Position within the batch is the join key to the model reply.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    records: &'a [RawRecord],
}

impl<'a> Batch<'a> {
    pub fn new(records: &'a [RawRecord]) -> Result<Self, BatchError> {
        if records.is_empty() {
            return Err(BatchError::Empty);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &'a [RawRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn first(&self) -> &'a RawRecord {
        // Non-empty by construction
        &self.records[0]
    }
}

// ============================================================================
// Cache Key
// ============================================================================

/// Identity of a batch for caching: first record's title plus batch length.
///
/// Deliberately coarse. Two different batches with the same first title and
/// the same length share a key and therefore share cached results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    first_title: Option<String>,
    len: usize,
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.first_title {
            Some(title) => write!(f, "{}-{}", title, self.len),
            None => write!(f, "<untitled>-{}", self.len),
        }
    }
}

/// Compute the cache key for a batch.
pub fn derive_key(batch: &Batch<'_>) -> CacheKey {
    CacheKey {
        first_title: batch.first().title().map(str::to_string),
        len: batch.len(),
    }
}
