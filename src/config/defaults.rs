//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Map Search
// ============================================================================

/// SerpApi search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";

/// SerpApi engine for map listings.
pub const SEARCH_ENGINE: &str = "google_maps";

/// Business type prefixed to every location query.
pub const BUSINESS_TYPE: &str = "Laundry";

/// Word joining business type and location ("Laundry di Tebet").
pub const QUERY_CONNECTOR: &str = "di";

/// Result language passed to the provider.
pub const SEARCH_LANGUAGE: &str = "id";

/// Maximum records kept from one search.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// HTTP timeout for map search (seconds).
pub const SEARCH_TIMEOUT_SECS: u64 = 20;

// ============================================================================
// LLM
// ============================================================================

/// Gemini model endpoint prefix.
pub const LLM_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Candidate models, most to least preferred.
pub const LLM_CANDIDATES: [&str; 3] = ["gemini-2.5-flash", "gemini-1.5-flash", "gemini-pro"];

/// Maximum time a single candidate may take before the next one is tried (seconds).
pub const LLM_CANDIDATE_TIMEOUT_SECS: u64 = 60;

pub const LLM_TEMPERATURE: f32 = 0.4;

/// Five one-sentence lines fit comfortably.
pub const LLM_MAX_OUTPUT_TOKENS: u32 = 1024;

// ============================================================================
// Paging
// ============================================================================

/// Records per page, and therefore per model batch.
pub const PAGE_SIZE: usize = 5;

/// Upper bound accepted for `paging.page_size`.
pub const MAX_PAGE_SIZE: usize = 20;

// ============================================================================
// Environment
// ============================================================================

/// Path to a TOML config file.
pub const CONFIG_ENV_VAR: &str = "CANVASS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "canvass.toml";

pub const GEMINI_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const SERPAPI_KEY_ENV_VAR: &str = "SERPAPI_KEY";
pub const ACCESS_CODE_ENV_VAR: &str = "CANVASS_ACCESS_CODE";
