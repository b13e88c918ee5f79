//! Configuration Module
//!
//! Tunable settings come from TOML; secrets come from the environment.
//!
//! ## Loading Order
//!
//! 1. `CANVASS_CONFIG` environment variable (path to TOML file)
//! 2. `canvass.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! Secrets (`GEMINI_API_KEY`, `SERPAPI_KEY`, `CANVASS_ACCESS_CODE`) are read
//! by [`Secrets::from_env`], after an optional `.env` file.

mod app_config;
mod secrets;
pub mod defaults;

pub use app_config::*;
pub use secrets::Secrets;
