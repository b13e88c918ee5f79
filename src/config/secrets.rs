//! Provider keys and the access code, read from the environment
//!
//! An optional `.env` in the working directory is loaded first; real
//! environment variables win over it.

use super::defaults;
use tracing::{debug, warn};

/// Secrets needed at runtime. Never logged.
#[derive(Clone, Default)]
pub struct Secrets {
    pub gemini_api_key: String,
    pub serpapi_key: String,
    /// Code that elevates a session from FREE to PRO. Empty means nothing unlocks.
    pub access_code: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("serpapi_key", &redact(&self.serpapi_key))
            .field("access_code", &redact(&self.access_code))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "***"
    }
}

impl Secrets {
    /// Read secrets from `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "Failed to read .env, continuing with process environment"),
        }

        let secrets = Self {
            gemini_api_key: env_or_empty(defaults::GEMINI_KEY_ENV_VAR),
            serpapi_key: env_or_empty(defaults::SERPAPI_KEY_ENV_VAR),
            access_code: env_or_empty(defaults::ACCESS_CODE_ENV_VAR),
        };
        secrets.warn_missing();
        secrets
    }

    fn warn_missing(&self) {
        if self.gemini_api_key.is_empty() {
            warn!("{} not set: leads will not be classified", defaults::GEMINI_KEY_ENV_VAR);
        }
        if self.serpapi_key.is_empty() {
            warn!("{} not set: searches will return nothing", defaults::SERPAPI_KEY_ENV_VAR);
        }
        if self.access_code.is_empty() {
            warn!("{} not set: PRO tier cannot be unlocked", defaults::ACCESS_CODE_ENV_VAR);
        }
    }

    /// Whether `input` matches the configured access code.
    ///
    /// Input is trimmed; an unset access code never matches.
    pub fn access_code_matches(&self, input: &str) -> bool {
        !self.access_code.is_empty() && input.trim() == self.access_code
    }
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}
