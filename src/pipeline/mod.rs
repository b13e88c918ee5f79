//! Classification Pipeline
//!
//! ```text
//! batch ──► derive_key ──► BatchCache ──hit──────────────────────────┐
//!                              │ miss                                  │
//!                              ▼                                       ▼
//!            build_prompt ─► ModelInvoker ─► parse_reply ─► store ─► AnalysisMap
//!                                                                      │
//!                                           apply_policy(tier) ◄──────┘
//! ```
//!
//! The model call is cached per session; the tier policy is re-evaluated on
//! every render.

mod batch;
mod cache;
mod classifier;
mod coordinator;
mod policy;
mod session;

pub use batch::{derive_key, Batch, BatchError, CacheKey};
pub use cache::{BatchCache, CacheStats};
pub use classifier::BatchClassifier;
pub use coordinator::{ProspectingCoordinator, ScanError, SetupError};
pub use policy::apply_policy;
pub use session::{SearchSummary, SessionContext};
