//! Business records: the opaque map-search payload and its normalized view

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name used in the model prompt when a record has no title.
pub const PROMPT_NAME_DEFAULT: &str = "No Name";

/// Name shown on a lead card when a record has no title.
pub const DISPLAY_NAME_DEFAULT: &str = "Laundry";

/// Address placeholder for records without an address.
pub const ADDRESS_DEFAULT: &str = "-";

// ============================================================================
// Raw Record
// ============================================================================

/// One business as returned by the map-search provider.
///
/// The provider payload is kept verbatim; only `title`, `address` and
/// `rating` are ever read from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap a provider object as-is.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build a record from the three consumed fields (absent fields are left out).
    pub fn new(title: Option<&str>, address: Option<&str>, rating: Option<Value>) -> Self {
        let mut map = Map::new();
        if let Some(t) = title {
            map.insert("title".to_string(), Value::String(t.to_string()));
        }
        if let Some(a) = address {
            map.insert("address".to_string(), Value::String(a.to_string()));
        }
        if let Some(r) = rating {
            map.insert("rating".to_string(), r);
        }
        Self(map)
    }

    /// Raw title, if the provider supplied one as a string.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Raw address, if present.
    pub fn address(&self) -> Option<&str> {
        self.0.get("address").and_then(Value::as_str)
    }

    /// Rating rendered as text. Providers send either a number or a string.
    pub fn rating(&self) -> Option<String> {
        match self.0.get("rating")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Access to the untouched provider payload.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

// ============================================================================
// Normalized Record
// ============================================================================

/// Fields the pipeline needs from a [`RawRecord`], with defaults applied.
///
/// Recomputed on every render; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: String,
    pub address: String,
    /// Empty when the provider gave no rating.
    pub rating: String,
}

impl NormalizedRecord {
    /// Normalize for the model prompt (`"No Name"` default).
    pub fn for_prompt(raw: &RawRecord) -> Self {
        Self::with_name_default(raw, PROMPT_NAME_DEFAULT)
    }

    /// Normalize for display (`"Laundry"` default).
    pub fn for_display(raw: &RawRecord) -> Self {
        Self::with_name_default(raw, DISPLAY_NAME_DEFAULT)
    }

    fn with_name_default(raw: &RawRecord, name_default: &str) -> Self {
        Self {
            name: raw.title().unwrap_or(name_default).to_string(),
            address: raw.address().unwrap_or(ADDRESS_DEFAULT).to_string(),
            rating: raw.rating().unwrap_or_default(),
        }
    }
}
