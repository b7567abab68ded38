//! # rmk-config
//!
//! Layered configuration loading for Rowmark using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROWMARK_*` prefix, `__` as separator)
//! 2. Project-level `.rowmark/config.toml`
//! 3. User-level `~/.config/rowmark/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROWMARK_REMOTE__BUCKET` -> `remote.bucket`,
//! `ROWMARK_AUTH__EMAIL` -> `auth.email`, etc. The `__` (double underscore)
//! separates nested config sections.

mod auth;
mod error;
mod labeling;
mod remote;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use labeling::LabelingConfig;
pub use remote::RemoteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RowmarkConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub labeling: LabelingConfig,
}

impl RowmarkConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when extraction fails (e.g. a value
    /// of the wrong type in a TOML file or env var).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI and
    /// tests.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
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
        let local_path = PathBuf::from(".rowmark/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("ROWMARK_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rowmark").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> rowmark/)
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

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = RowmarkConfig::default();
        assert!(!config.remote.is_configured());
        assert!(!config.auth.is_configured());
        assert_eq!(config.labeling.unsure_budget, 20);
        assert_eq!(config.labeling.label_column, "RA_AI_Labels");
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROWMARK_REMOTE__ROOT", "/tmp/datasets");
            jail.set_env("ROWMARK_LABELING__UNSURE_BUDGET", "5");

            let config: RowmarkConfig = RowmarkConfig::figment().extract()?;
            assert_eq!(config.remote.root, "/tmp/datasets");
            assert!(config.remote.is_configured());
            assert_eq!(config.labeling.unsure_budget, 5);
            Ok(())
        });
    }

    #[test]
    fn project_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".rowmark")?;
            jail.create_file(
                ".rowmark/config.toml",
                r#"
                    [labeling]
                    label_column = "team_labels"
                "#,
            )?;

            let config: RowmarkConfig = RowmarkConfig::figment().extract()?;
            assert_eq!(config.labeling.label_column, "team_labels");
            // untouched sections keep defaults
            assert_eq!(config.labeling.unsure_budget, 20);
            Ok(())
        });
    }
}
