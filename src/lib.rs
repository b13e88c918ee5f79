//! LaundryCanvass: AI-assisted sales prospecting
//!
//! Finds laundry businesses in an area, asks a language model which ones sit
//! on small streets or residential alleys, drafts a one-line outreach message
//! for each, and gates the most promising drafts behind a PRO access code.
//!
//! ## Architecture
//!
//! - **Search**: map-search collaborator returning raw business records
//! - **Protocol**: prompt format and reply parser for batch classification
//! - **LLM**: model backends and ordered candidate fallback
//! - **Pipeline**: batch cache, access policy, session state, coordinator

pub mod config;
pub mod types;
pub mod protocol;
pub mod llm;
pub mod search;
pub mod pipeline;

// Re-export configuration
pub use config::{AppConfig, Secrets};

// Re-export commonly used types
pub use types::{
    AnalysisMap, Category, ClassificationResult, FinalMessage, LeadCard, NormalizedRecord,
    RawRecord, SubscriberTier,
};

// Re-export pipeline entry points
pub use pipeline::{
    apply_policy, derive_key, Batch, BatchCache, BatchClassifier, ProspectingCoordinator,
    SessionContext,
};
