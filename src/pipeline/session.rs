//! Session Context
//!
//! Everything that lives for one user session: the current result set, the
//! page offset, the batch cache and the subscriber tier. Passed explicitly to
//! every pipeline call. Result set, offset and cache are only ever replaced
//! or cleared together.

use super::batch::Batch;
use super::cache::{BatchCache, CacheStats};
use super::classifier::BatchClassifier;
use super::policy::apply_policy;
use crate::config::Secrets;
use crate::types::{
    AnalysisMap, FinalMessage, LeadCard, NormalizedRecord, RawRecord, SubscriberTier,
    CLASSIFICATION_UNAVAILABLE,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// What the current result set came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub location: String,
    pub result_count: usize,
    pub searched_at: DateTime<Utc>,
}

/// Per-user session state
#[derive(Debug)]
pub struct SessionContext {
    results: Vec<RawRecord>,
    offset: usize,
    page_size: usize,
    cache: BatchCache,
    tier: SubscriberTier,
    last_search: Option<SearchSummary>,
}

impl SessionContext {
    /// Empty FREE-tier session. `page_size` below 1 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            results: Vec::new(),
            offset: 0,
            page_size: page_size.max(1),
            cache: BatchCache::new(),
            tier: SubscriberTier::Free,
            last_search: None,
        }
    }

    // ------------------------------------------------------------------------
    // Result set lifecycle
    // ------------------------------------------------------------------------

    /// Replace the result set with a fresh search. Offset and cache reset with it.
    pub fn load_results(&mut self, location: &str, records: Vec<RawRecord>) {
        self.last_search = Some(SearchSummary {
            location: location.trim().to_string(),
            result_count: records.len(),
            searched_at: Utc::now(),
        });
        self.results = records;
        self.offset = 0;
        self.cache.clear();

        info!(
            location = %location.trim(),
            results = self.results.len(),
            "Session loaded new search results"
        );
    }

    /// Forget results, offset and cached classifications. Tier is kept.
    pub fn reset(&mut self) {
        self.results.clear();
        self.offset = 0;
        self.cache.clear();
        self.last_search = None;
        info!("Session reset");
    }

    pub fn results(&self) -> &[RawRecord] {
        &self.results
    }

    pub fn last_search(&self) -> Option<&SearchSummary> {
        self.last_search.as_ref()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ------------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------------

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn page_end(&self) -> usize {
        (self.offset + self.page_size).min(self.results.len())
    }

    /// Records on the current page, or `None` when there are no results.
    pub fn current_batch(&self) -> Option<Batch<'_>> {
        Batch::new(&self.results[self.offset..self.page_end()]).ok()
    }

    /// 1-based inclusive display range of the current page, e.g. `(6, 10)`.
    pub fn page_bounds(&self) -> Option<(usize, usize)> {
        if self.results.is_empty() {
            return None;
        }
        Some((self.offset + 1, self.page_end()))
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.page_size < self.results.len()
    }

    /// Move forward one page. Returns false (and stays put) on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.offset += self.page_size;
        true
    }

    /// Move back one page. Returns false (and stays put) on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.page_size);
        true
    }

    // ------------------------------------------------------------------------
    // Tier
    // ------------------------------------------------------------------------

    pub fn tier(&self) -> SubscriberTier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: SubscriberTier) {
        self.tier = tier;
    }

    /// Elevate to PRO if `input` matches the configured access code.
    pub fn unlock(&mut self, input: &str, secrets: &Secrets) -> bool {
        if secrets.access_code_matches(input) {
            self.tier = SubscriberTier::Pro;
            info!("Access code accepted, session elevated to PRO");
            true
        } else {
            info!("Access code rejected");
            false
        }
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    /// Classification of the current page, computed at most once per cache key.
    ///
    /// `None` when there are no results to classify.
    pub async fn analyse_current_page(
        &mut self,
        classifier: &BatchClassifier,
    ) -> Option<Arc<AnalysisMap>> {
        let end = self.page_end();
        let batch = Batch::new(&self.results[self.offset..end]).ok()?;
        let map = self
            .cache
            .get_or_compute(&batch, || classifier.classify(&batch))
            .await;
        Some(map)
    }

    /// Lead cards for the current page under the current tier.
    pub fn cards(&self, analysis: &AnalysisMap) -> Vec<LeadCard> {
        let end = self.page_end();
        self.results[self.offset..end]
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let (category, message) = match analysis.get(i) {
                    Some(result) => (Some(result.category), apply_policy(result, self.tier)),
                    None => (
                        None,
                        FinalMessage::Revealed(CLASSIFICATION_UNAVAILABLE.to_string()),
                    ),
                };
                LeadCard {
                    position: self.offset + i + 1,
                    record: NormalizedRecord::for_display(raw),
                    category,
                    message,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ClassificationResult};

    fn records(n: usize) -> Vec<RawRecord> {
        (0..n)
            .map(|i| RawRecord::new(Some(&format!("Laundry {i}")), Some("Jl. Test"), None))
            .collect()
    }

    #[test]
    fn pages_through_results() {
        let mut session = SessionContext::new(5);
        session.load_results("Tebet", records(12));

        assert_eq!(session.page_bounds(), Some((1, 5)));
        assert!(!session.has_prev());
        assert!(session.next_page());
        assert_eq!(session.page_bounds(), Some((6, 10)));
        assert!(session.next_page());
        assert_eq!(session.page_bounds(), Some((11, 12)));
        assert_eq!(session.current_batch().unwrap().len(), 2);
        assert!(!session.next_page());
        assert_eq!(session.offset(), 10);

        assert!(session.prev_page());
        assert!(session.prev_page());
        assert!(!session.prev_page());
        assert_eq!(session.offset(), 0);
    }

    #[test]
    fn empty_session_has_no_batch() {
        let session = SessionContext::new(5);
        assert!(session.current_batch().is_none());
        assert!(session.page_bounds().is_none());
        assert!(!session.has_next());
    }

    #[test]
    fn new_search_resets_offset_and_cache() {
        let mut session = SessionContext::new(2);
        session.load_results("Tebet", records(6));
        session.next_page();
        let map = ClassificationResult {
            category: Category::Street,
            message: "x".to_string(),
        };
        let batch_records = session.results()[2..4].to_vec();
        let batch = Batch::new(&batch_records).unwrap();
        tokio_test::block_on(session.cache.get_or_compute(&batch, || async {
            Some(std::iter::once((0, map)).collect())
        }));
        assert_eq!(session.cache_stats().entries, 1);

        session.load_results("Depok", records(3));
        assert_eq!(session.offset(), 0);
        assert_eq!(session.cache_stats().entries, 0);
        assert_eq!(session.last_search().unwrap().location, "Depok");
    }

    #[test]
    fn reset_clears_everything_but_tier() {
        let mut session = SessionContext::new(5);
        session.set_tier(SubscriberTier::Pro);
        session.load_results("Tebet", records(7));
        session.next_page();

        session.reset();
        assert!(session.results().is_empty());
        assert_eq!(session.offset(), 0);
        assert!(session.last_search().is_none());
        assert_eq!(session.tier(), SubscriberTier::Pro);
    }

    #[test]
    fn unlock_requires_matching_code() {
        let secrets = Secrets {
            access_code: "CUCI".to_string(),
            ..Default::default()
        };
        let mut session = SessionContext::new(5);

        assert!(!session.unlock("wrong", &secrets));
        assert_eq!(session.tier(), SubscriberTier::Free);
        assert!(session.unlock("CUCI", &secrets));
        assert_eq!(session.tier(), SubscriberTier::Pro);
    }

    #[test]
    fn cards_apply_policy_and_fallback() {
        let mut session = SessionContext::new(5);
        session.load_results("Tebet", records(3));

        let analysis: AnalysisMap = vec![
            (
                0,
                ClassificationResult {
                    category: Category::Alley,
                    message: "Halo".to_string(),
                },
            ),
            (
                1,
                ClassificationResult {
                    category: Category::Street,
                    message: "Hai".to_string(),
                },
            ),
        ]
        .into_iter()
        .collect();

        let cards = session.cards(&analysis);
        assert_eq!(cards.len(), 3);
        assert!(cards[0].message.is_withheld());
        assert_eq!(cards[1].message.text(), Some("Hai"));
        assert_eq!(cards[2].category, None);
        assert_eq!(cards[2].message.text(), Some(CLASSIFICATION_UNAVAILABLE));
        assert_eq!(cards[2].position, 3);

        session.set_tier(SubscriberTier::Pro);
        assert_eq!(session.cards(&analysis)[0].message.text(), Some("Halo"));
    }
}
