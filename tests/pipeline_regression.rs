//! Pipeline Regression Tests
//!
//! Exercises scan → classify → cache → policy through the public API with
//! scripted search and model collaborators. No network access.

use async_trait::async_trait;
use laundry_canvass::config::{AppConfig, LlmConfig, Secrets};
use laundry_canvass::llm::{
    CandidateOutcome, GeminiBackend, LlmBackend, LlmError, ModelInvoker,
};
use laundry_canvass::pipeline::{
    apply_policy, Batch, BatchCache, BatchClassifier, ProspectingCoordinator, ScanError,
    SessionContext,
};
use laundry_canvass::search::SearchProvider;
use laundry_canvass::types::{
    Category, FinalMessage, RawRecord, SubscriberTier, CLASSIFICATION_UNAVAILABLE,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Test Doubles
// ============================================================================

/// Model backend answering from a per-model script and counting calls.
struct ScriptedBackend {
    replies: HashMap<String, Result<String, u16>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(replies: Vec<(&str, Result<&str, u16>)>) -> Arc<Self> {
        Arc::new(Self {
            replies: replies
                .into_iter()
                .map(|(m, r)| (m.to_string(), r.map(str::to_string)))
                .collect(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn generate(&self, model_id: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.get(model_id) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(status)) => Err(LlmError::Api {
                status: *status,
                body: "scripted failure".to_string(),
            }),
            None => Err(LlmError::Api {
                status: 404,
                body: "unknown model".to_string(),
            }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

/// Search provider returning canned records per query.
struct FixedSearch {
    results: HashMap<String, Vec<RawRecord>>,
    queries: Mutex<Vec<String>>,
}

impl FixedSearch {
    fn new(results: Vec<(&str, Vec<RawRecord>)>) -> Arc<Self> {
        Arc::new(Self {
            results: results
                .into_iter()
                .map(|(q, r)| (q.to_string(), r))
                .collect(),
            queries: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SearchProvider for FixedSearch {
    async fn search(&self, query: &str, result_limit: usize) -> Vec<RawRecord> {
        self.queries.lock().unwrap().push(query.to_string());
        self.results
            .get(query)
            .map(|r| r.iter().take(result_limit).cloned().collect())
            .unwrap_or_default()
    }
}

fn classifier(backend: Arc<ScriptedBackend>, models: &[&str]) -> BatchClassifier {
    BatchClassifier::new(ModelInvoker::new(
        backend,
        models.iter().map(|m| (*m).to_string()).collect(),
        Duration::from_secs(5),
    ))
}

fn laundries(prefix: &str, n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            RawRecord::new(
                Some(&format!("{prefix} {i}")),
                Some(&format!("Gg. Mawar {i}")),
                Some(serde_json::json!(4.5)),
            )
        })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn single_alley_record_is_withheld_for_free_and_revealed_for_pro() {
    let backend = ScriptedBackend::new(vec![(
        "gemini-2.5-flash",
        Ok("ID_0 | GANG | Halo, mau coba sabun baru?"),
    )]);
    let classifier = classifier(backend.clone(), &["gemini-2.5-flash"]);

    let records = vec![RawRecord::new(Some("Laundry A"), Some("Gg. Mawar 3"), None)];
    let batch = Batch::new(&records).unwrap();
    let mut cache = BatchCache::new();

    let analysis = cache
        .get_or_compute(&batch, || classifier.classify(&batch))
        .await;

    assert_eq!(analysis.len(), 1);
    let result = analysis.get(0).unwrap();
    assert_eq!(result.category, Category::Alley);
    assert_eq!(result.message, "Halo, mau coba sabun baru?");

    assert_eq!(apply_policy(result, SubscriberTier::Free), FinalMessage::Withheld);
    assert_eq!(
        apply_policy(result, SubscriberTier::Pro),
        FinalMessage::Revealed("Halo, mau coba sabun baru?".to_string())
    );
}

#[tokio::test]
async fn repeat_batch_is_served_from_cache_regardless_of_tier() {
    let backend = ScriptedBackend::new(vec![(
        "m1",
        Ok("ID_0 | GANG | Halo\nID_1 | RAYA | Hai"),
    )]);
    let classifier = classifier(backend.clone(), &["m1"]);
    let records = laundries("Clean Laundry", 2);
    let batch = Batch::new(&records).unwrap();
    let mut cache = BatchCache::new();

    let first = cache
        .get_or_compute(&batch, || classifier.classify(&batch))
        .await;
    let second = cache
        .get_or_compute(&batch, || classifier.classify(&batch))
        .await;

    assert_eq!(backend.calls(), 1);
    assert_eq!(*first, *second);

    let alley = first.get(0).unwrap();
    assert_ne!(
        apply_policy(alley, SubscriberTier::Free),
        apply_policy(alley, SubscriberTier::Pro)
    );
}

#[tokio::test]
async fn all_candidates_failing_gives_fallback_cards_and_retries_later() {
    let backend = ScriptedBackend::new(vec![("m1", Err(429)), ("m2", Err(500))]);
    let search = FixedSearch::new(vec![("Laundry di Tebet", laundries("Kilat", 3))]);
    let coordinator = ProspectingCoordinator::new(
        search,
        classifier(backend.clone(), &["m1", "m2"]),
        &AppConfig::default(),
    );
    let mut session = SessionContext::new(5);

    coordinator.scan(&mut session, "Tebet").await.unwrap();
    let cards = coordinator.current_cards(&mut session).await;

    assert_eq!(cards.len(), 3);
    for card in &cards {
        assert_eq!(card.category, None);
        assert_eq!(card.message.text(), Some(CLASSIFICATION_UNAVAILABLE));
    }
    assert_eq!(backend.calls(), 2);

    // Nothing cached, so the next render asks the models again
    coordinator.current_cards(&mut session).await;
    assert_eq!(backend.calls(), 4);
}

#[tokio::test]
async fn fallback_reaches_later_candidate() {
    let backend = ScriptedBackend::new(vec![
        ("gemini-2.5-flash", Err(404)),
        ("gemini-1.5-flash", Ok("")),
        ("gemini-pro", Ok("ID_0 | RAYA | Selamat pagi kak")),
    ]);
    let classifier = classifier(
        backend.clone(),
        &["gemini-2.5-flash", "gemini-1.5-flash", "gemini-pro"],
    );
    let records = laundries("Wash", 1);
    let batch = Batch::new(&records).unwrap();

    let analysis = classifier.classify(&batch).await.unwrap();
    assert_eq!(analysis.get(0).unwrap().category, Category::Street);
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn paging_classifies_each_page_once_and_tier_upgrade_reveals() {
    let backend = ScriptedBackend::new(vec![(
        "m1",
        Ok("ID_0 | GANG | Halo\nID_1 | RAYA | Hai\nID_2 | GANG | Permisi\nID_3 | RAYA | Pagi\nID_4 | GANG | Sore"),
    )]);
    let search = FixedSearch::new(vec![("Laundry di Depok", laundries("Depok Wash", 7))]);
    let coordinator = ProspectingCoordinator::new(
        search,
        classifier(backend.clone(), &["m1"]),
        &AppConfig::default(),
    );
    let mut session = SessionContext::new(5);

    assert_eq!(coordinator.scan(&mut session, "Depok").await, Ok(7));

    let page1 = coordinator.current_cards(&mut session).await;
    assert_eq!(page1.len(), 5);
    assert!(page1[0].message.is_withheld());
    assert_eq!(page1[1].message.text(), Some("Hai"));

    assert!(session.next_page());
    let page2 = coordinator.current_cards(&mut session).await;
    assert_eq!(page2.len(), 2);
    assert_eq!(page2[0].position, 6);

    assert!(session.prev_page());
    coordinator.current_cards(&mut session).await;
    assert_eq!(backend.calls(), 2, "back navigation must hit the cache");

    let secrets = Secrets {
        access_code: "CUCI2024".to_string(),
        ..Default::default()
    };
    assert!(session.unlock("CUCI2024", &secrets));
    let upgraded = coordinator.current_cards(&mut session).await;
    assert_eq!(upgraded[0].message.text(), Some("Halo"));
    assert_eq!(backend.calls(), 2, "tier change must not re-run the model");
}

#[tokio::test]
async fn new_scan_clears_cached_batches() {
    let backend = ScriptedBackend::new(vec![("m1", Ok("ID_0 | RAYA | Hai"))]);
    // Same first title and length in both areas: the cache key would collide
    let search = FixedSearch::new(vec![
        ("Laundry di Tebet", laundries("Clean Laundry", 1)),
        ("Laundry di Bogor", laundries("Clean Laundry", 1)),
    ]);
    let coordinator = ProspectingCoordinator::new(
        search,
        classifier(backend.clone(), &["m1"]),
        &AppConfig::default(),
    );
    let mut session = SessionContext::new(5);

    coordinator.scan(&mut session, "Tebet").await.unwrap();
    coordinator.current_cards(&mut session).await;
    coordinator.scan(&mut session, "Bogor").await.unwrap();
    coordinator.current_cards(&mut session).await;

    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn failed_scan_keeps_previous_results() {
    let backend = ScriptedBackend::new(vec![]);
    let search = FixedSearch::new(vec![("Laundry di Tebet", laundries("Kilat", 2))]);
    let coordinator = ProspectingCoordinator::new(
        search.clone(),
        classifier(backend, &["m1"]),
        &AppConfig::default(),
    );
    let mut session = SessionContext::new(5);

    coordinator.scan(&mut session, "Tebet").await.unwrap();
    assert_eq!(
        coordinator.scan(&mut session, "Nowhere").await,
        Err(ScanError::NoResults {
            query: "Laundry di Nowhere".to_string()
        })
    );
    assert_eq!(
        coordinator.scan(&mut session, "   ").await,
        Err(ScanError::EmptyLocation)
    );

    assert_eq!(session.results().len(), 2);
    assert_eq!(session.last_search().unwrap().location, "Tebet");
    assert_eq!(search.queries.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn prompt_sent_to_model_lists_current_page_only() {
    let backend = ScriptedBackend::new(vec![("m1", Ok("ID_0 | RAYA | Hai"))]);
    let search = FixedSearch::new(vec![("Laundry di Tebet", laundries("Kilat", 7))]);
    let coordinator = ProspectingCoordinator::new(
        search,
        classifier(backend.clone(), &["m1"]),
        &AppConfig::default(),
    );
    let mut session = SessionContext::new(5);

    coordinator.scan(&mut session, "Tebet").await.unwrap();
    session.next_page();
    coordinator.current_cards(&mut session).await;

    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("ID_0: Kilat 5 | Gg. Mawar 5"));
    assert!(prompts[0].contains("ID_1: Kilat 6 | Gg. Mawar 6"));
    assert!(!prompts[0].contains("ID_2:"));
}

#[tokio::test]
async fn failed_attempt_reasons_never_carry_the_api_key() {
    let config = LlmConfig {
        endpoint: "http://127.0.0.1:1/v1beta/models".to_string(),
        timeout_secs: 5,
        ..LlmConfig::default()
    };
    let backend = GeminiBackend::new(&config, "SUPERSECRETKEY").unwrap();
    let invoker = ModelInvoker::new(
        Arc::new(backend),
        vec!["m1".to_string(), "m2".to_string()],
        Duration::from_secs(5),
    );

    let invocation = invoker.invoke("prompt").await;
    assert!(invocation.is_empty());
    for attempt in &invocation.attempts {
        let CandidateOutcome::Failed(reason) = &attempt.outcome else {
            panic!("expected failure, got {:?}", attempt.outcome);
        };
        assert!(!reason.contains("SUPERSECRETKEY"), "{reason}");
    }
}
