//! # stacks-config
//!
//! Layered configuration loading for Stacks clients using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STACKS_*` prefix, `__` as separator)
//! 2. Project-level `.stacks/config.toml`
//! 3. User-level `~/.config/stacks/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STACKS_API__BASE_URL` -> `api.base_url`,
//! `STACKS_API__TIMEOUT_SECS` -> `api.timeout_secs`. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use stacks_config::StacksConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = StacksConfig::load_with_dotenv().expect("config");
//! println!("API base: {}", config.api.base_url);
//! ```

mod api;
mod error;

pub use api::ApiConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StacksConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl StacksConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`StacksConfig::load_with_dotenv`] if
    /// you need `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`STACKS_*` prefix)
    /// 2. `.stacks/config.toml` (project-local)
    /// 3. `~/.config/stacks/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if any source fails to parse or merge.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for binaries and
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if any source fails to parse or merge.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".stacks/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("STACKS_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stacks").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = StacksConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn figment_builds_without_error() {
        let figment = StacksConfig::figment();
        let config: StacksConfig = figment.extract().expect("extract");
        assert!(!config.api.base_url.is_empty());
    }
}
