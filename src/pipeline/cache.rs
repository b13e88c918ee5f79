//! Session-scoped batch cache
//!
//! Holds parsed model results per [`CacheKey`] for the lifetime of a search.
//! No eviction and no staleness check: a key hit is returned as stored.

use super::batch::{derive_key, Batch, CacheKey};
use crate::types::AnalysisMap;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BatchCache: {} entries, {} hits, {} misses",
            self.entries, self.hits, self.misses
        )
    }
}

/// Cache of classified batches
#[derive(Debug, Default)]
pub struct BatchCache {
    entries: HashMap<CacheKey, Arc<AnalysisMap>>,
    hits: u64,
    misses: u64,
}

impl BatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored map for `batch`, or run `compute` and store its result.
    ///
    /// `compute` yields `None` when no classification was available (every
    /// model candidate failed). That outcome is returned as an empty map but
    /// not stored, so a later call tries again.
    pub async fn get_or_compute<F, Fut>(&mut self, batch: &Batch<'_>, compute: F) -> Arc<AnalysisMap>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<AnalysisMap>>,
    {
        let key = derive_key(batch);

        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            debug!(key = %key, "Batch cache hit");
            return Arc::clone(hit);
        }

        self.misses += 1;
        debug!(key = %key, "Batch cache miss");

        match compute().await {
            Some(map) => {
                let map = Arc::new(map);
                self.entries.insert(key, Arc::clone(&map));
                map
            }
            None => Arc::new(AnalysisMap::new()),
        }
    }

    pub fn contains(&self, batch: &Batch<'_>) -> bool {
        self.entries.contains_key(&derive_key(batch))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
