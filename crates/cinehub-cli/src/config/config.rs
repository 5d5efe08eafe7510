//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use cinehub_playback::providers::{Provider, Registry};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured access key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Default response locale.
const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog source settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Streaming providers appended after the built-in ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
}

/// Catalog source configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Access key sent with every catalog request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Response locale.
    #[serde(default = "default_language")]
    pub language: String,
    /// Catalog API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: default_language(),
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Picks the access key: `from_env` wins over the stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source holds a non-blank key.
    pub fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .into_iter()
            .chain(self.catalog.api_key.clone())
            .find(|k| !k.trim().is_empty())
            .with_context(|| {
                format!("no API key: set {API_KEY_ENV} or run `cinehub config set-key <KEY>`")
            })
    }

    /// Built-in providers followed by the configured ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured provider reuses an existing ID.
    pub fn registry(&self) -> Result<Registry> {
        Registry::builtin()
            .with_extra(self.providers.clone())
            .context("invalid [[providers]] configuration")
    }
}

/// Hides all but the first four characters of a key.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}****")
}
