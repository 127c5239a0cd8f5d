//! Configuration management for boxfetch
//!
//! Config file location:
//! - Linux: ~/.config/boxfetch/config.toml
//! - macOS: ~/Library/Application Support/io.boxfetch.boxfetch/config.toml
//! - Windows: %APPDATA%/boxfetch/boxfetch/config/config.toml
//!
//! You can override the config location by setting `BOXFETCH_CONFIG_PATH`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hardware model resolution
    #[serde(default)]
    pub model: ModelConfig,

    /// Report appearance
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from file (or defaults) and apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// when the file does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("BOXFETCH_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("io", "boxfetch", "boxfetch")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(source) = non_empty("BOXFETCH_MODEL_SOURCE") {
            match source.trim().to_ascii_lowercase().as_str() {
                "table" => self.model.source = ModelSource::Table,
                "remote" => self.model.source = ModelSource::Remote,
                other => tracing::warn!(value = other, "ignoring unknown BOXFETCH_MODEL_SOURCE"),
            }
        }

        if let Some(url) = non_empty("BOXFETCH_LOOKUP_URL") {
            self.model.lookup_url = url.trim().to_string();
        }
    }
}

/// Where Apple hardware identifiers are translated into marketing names
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// Built-in identifier table, no network access
    #[default]
    Table,
    /// Remote device-identifier lookup service
    Remote,
}

/// Model resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub source: ModelSource,

    /// Base URL of the identifier lookup service; the identifier is appended
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// Lookup timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            source: ModelSource::default(),
            lookup_url: default_lookup_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_lookup_url() -> String {
    "https://di-api.reincubate.com/v1/apple-identifiers".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

/// Report appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show Nerd Font icons in front of each label
    #[serde(default = "default_true")]
    pub icons: bool,

    /// Per-label color overrides, e.g. `os = "bright blue"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            icons: true,
            colors: HashMap::new(),
        }
    }
}
