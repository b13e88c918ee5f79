//! Access policy gate
//!
//! Free-tier users see that an alley lead exists but not its outreach draft.
//! Evaluated on every render and never cached, so a tier upgrade reveals
//! drafts from already-classified batches without another model call.

use crate::types::{Category, ClassificationResult, FinalMessage, SubscriberTier};

/// Message the given tier is allowed to see for `result`.
pub fn apply_policy(result: &ClassificationResult, tier: SubscriberTier) -> FinalMessage {
    match (tier, result.category) {
        (SubscriberTier::Free, Category::Alley) => FinalMessage::Withheld,
        _ => FinalMessage::Revealed(result.message.clone()),
    }
}
