//! Subscriber tiers and the gated message they produce

use serde::{Deserialize, Serialize};

/// Access level of the person using the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubscriberTier {
    #[default]
    Free,
    Pro,
}

impl SubscriberTier {
    pub fn short_code(&self) -> &'static str {
        match self {
            SubscriberTier::Free => "FREE",
            SubscriberTier::Pro => "PRO",
        }
    }
}

impl std::fmt::Display for SubscriberTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_code())
    }
}

impl std::str::FromStr for SubscriberTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FREE" => Ok(SubscriberTier::Free),
            "PRO" => Ok(SubscriberTier::Pro),
            other => Err(format!("unknown tier '{other}' (expected FREE or PRO)")),
        }
    }
}

/// Outreach message after the access policy has been applied.
///
/// `Withheld` is a separate variant rather than a magic string, so no model
/// output can ever be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum FinalMessage {
    Revealed(String),
    Withheld,
}

impl FinalMessage {
    pub fn is_withheld(&self) -> bool {
        matches!(self, FinalMessage::Withheld)
    }

    /// Text if revealed.
    pub fn text(&self) -> Option<&str> {
        match self {
            FinalMessage::Revealed(t) => Some(t),
            FinalMessage::Withheld => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tier_case_insensitively() {
        assert_eq!("pro".parse::<SubscriberTier>(), Ok(SubscriberTier::Pro));
        assert_eq!(" Free ".parse::<SubscriberTier>(), Ok(SubscriberTier::Free));
        assert!("gold".parse::<SubscriberTier>().is_err());
    }

    #[test]
    fn withheld_serializes_without_text() {
        let json = serde_json::to_value(FinalMessage::Withheld).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "withheld" }));
    }
}
