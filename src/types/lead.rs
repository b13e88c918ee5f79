//! Lead cards handed to the presentation layer

use super::{Category, FinalMessage, NormalizedRecord};
use serde::{Deserialize, Serialize};

/// Text shown when the model returned nothing for a record.
pub const CLASSIFICATION_UNAVAILABLE: &str = "Analysis unavailable.";

/// One rendered lead: display fields plus the gated classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCard {
    /// 1-based position in the full result set.
    pub position: usize,
    pub record: NormalizedRecord,
    /// `None` when the model did not answer for this record.
    pub category: Option<Category>,
    pub message: FinalMessage,
}

impl LeadCard {
    pub fn is_alley(&self) -> bool {
        self.category == Some(Category::Alley)
    }

    /// Copy-ready block for pasting into a chat app. `None` while withheld.
    pub fn copy_text(&self) -> Option<String> {
        let text = self.message.text()?;
        Some(format!(
            "*{}*\n{}\n\nOutreach draft:\n{}",
            self.record.name, self.record.address, text
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(message: FinalMessage) -> LeadCard {
        LeadCard {
            position: 1,
            record: NormalizedRecord {
                name: "Laundry A".to_string(),
                address: "Gg. Mawar 3".to_string(),
                rating: "4.5".to_string(),
            },
            category: Some(Category::Alley),
            message,
        }
    }

    #[test]
    fn copy_text_contains_name_address_and_draft() {
        let text = card(FinalMessage::Revealed("Halo!".to_string()))
            .copy_text()
            .unwrap();
        assert!(text.contains("*Laundry A*"));
        assert!(text.contains("Gg. Mawar 3"));
        assert!(text.ends_with("Halo!"));
    }

    #[test]
    fn withheld_card_has_nothing_to_copy() {
        assert!(card(FinalMessage::Withheld).copy_text().is_none());
    }
}
