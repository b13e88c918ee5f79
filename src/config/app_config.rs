//! Application configuration - search, model and paging settings as TOML
//!
//! Each struct implements `Default` with the values in [`super::defaults`],
//! so a missing file or a partial file behaves exactly like the defaults.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$CANVASS_CONFIG` env var
/// 2. `./canvass.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Map search provider
    #[serde(default)]
    pub search: SearchConfig,

    /// Language model provider and candidate list
    #[serde(default)]
    pub llm: LlmConfig,

    /// Result paging
    #[serde(default)]
    pub paging: PagingConfig,
}

impl AppConfig {
    /// Load the first usable config file, or the built-in defaults.
    ///
    /// A file that exists but fails to load is logged and skipped; the
    /// prospecting session still starts.
    pub fn load() -> Self {
        let env_path = std::env::var(defaults::CONFIG_ENV_VAR).ok();

        for source in config_sources(env_path.as_deref()) {
            if !source.path.exists() {
                if source.explicit {
                    warn!(
                        path = %source.path.display(),
                        "{} names a missing file, ignoring it",
                        defaults::CONFIG_ENV_VAR
                    );
                }
                continue;
            }
            match Self::load_from_file(&source.path) {
                Ok(config) => {
                    info!(
                        path = %source.path.display(),
                        candidates = config.llm.candidates.len(),
                        page_size = config.paging.page_size,
                        "Canvass settings loaded"
                    );
                    return config;
                }
                Err(e) => warn!(error = %e, "Skipping unusable canvass settings"),
            }
        }

        info!("No canvass settings file, running on built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Collects every problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let page_size = self.paging.page_size;
        if page_size == 0 || page_size > defaults::MAX_PAGE_SIZE {
            errors.push(format!(
                "paging.page_size: must be within 1..={} (got {page_size})",
                defaults::MAX_PAGE_SIZE
            ));
        }

        if self.llm.candidates.is_empty() {
            errors.push("llm.candidates: at least one model is required".to_string());
        }
        if self.llm.candidates.iter().any(|c| c.trim().is_empty()) {
            errors.push("llm.candidates: model names must not be blank".to_string());
        }
        if self.llm.timeout_secs == 0 {
            errors.push("llm.timeout_secs: must be > 0".to_string());
        }
        let t = self.llm.temperature;
        if !t.is_finite() || !(0.0..=2.0).contains(&t) {
            errors.push(format!("llm.temperature: must be within 0.0..=2.0 (got {t})"));
        }

        if self.search.timeout_secs == 0 {
            errors.push("search.timeout_secs: must be > 0".to_string());
        }
        if self.search.business_type.trim().is_empty() {
            errors.push("search.business_type: must not be blank".to_string());
        }
        if self.search.result_limit == 0 {
            errors.push("search.result_limit: must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// One place a settings file may live
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfigSource {
    path: PathBuf,
    /// Named by the user through the env var rather than found by convention
    explicit: bool,
}

/// Lookup order: the env var path (if set), then the working-directory file.
fn config_sources(env_path: Option<&str>) -> Vec<ConfigSource> {
    let mut sources = Vec::with_capacity(2);
    if let Some(path) = env_path.map(str::trim).filter(|p| !p.is_empty()) {
        sources.push(ConfigSource {
            path: PathBuf::from(path),
            explicit: true,
        });
    }
    sources.push(ConfigSource {
        path: PathBuf::from(defaults::LOCAL_CONFIG_FILE),
        explicit: false,
    });
    sources
}

// ============================================================================
// Sections
// ============================================================================

/// Map search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub engine: String,
    /// Business type searched for, e.g. "Laundry"
    pub business_type: String,
    /// Word between business type and location
    pub connector: String,
    pub language: String,
    pub result_limit: usize,
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::SEARCH_ENDPOINT.to_string(),
            engine: defaults::SEARCH_ENGINE.to_string(),
            business_type: defaults::BUSINESS_TYPE.to_string(),
            connector: defaults::QUERY_CONNECTOR.to_string(),
            language: defaults::SEARCH_LANGUAGE.to_string(),
            result_limit: defaults::SEARCH_RESULT_LIMIT,
            timeout_secs: defaults::SEARCH_TIMEOUT_SECS,
        }
    }
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    /// Models tried in order until one answers
    pub candidates: Vec<String>,
    /// Per-candidate timeout
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::LLM_ENDPOINT.to_string(),
            candidates: defaults::LLM_CANDIDATES.iter().map(|m| (*m).to_string()).collect(),
            timeout_secs: defaults::LLM_CANDIDATE_TIMEOUT_SECS,
            temperature: defaults::LLM_TEMPERATURE,
            max_output_tokens: defaults::LLM_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Paging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::PAGE_SIZE,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {e}", path.display()),
            ConfigError::Parse(path, e) => write!(f, "{} is not valid canvass TOML: {e}", path.display()),
            ConfigError::Validation(problems) => {
                write!(f, "{} invalid setting(s): {}", problems.len(), problems.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}
