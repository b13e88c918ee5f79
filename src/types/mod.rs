//! Shared data structures for the prospecting pipeline
//!
//! - Search output: `RawRecord` (provider payload), `NormalizedRecord`
//! - Model output: `Category`, `ClassificationResult`, `AnalysisMap`
//! - Access gating: `SubscriberTier`, `FinalMessage`
//! - Presentation: `LeadCard`

mod record;
mod classification;
mod tier;
mod lead;

pub use record::*;
pub use classification::*;
pub use tier::*;
pub use lead::*;
