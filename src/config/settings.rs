//! Application configuration

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use topic_bar_core::BarSettings;

use super::migration::upgrade;
use crate::sources::SourceConfig;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Widget settings, stored verbatim in the host's panel-state layout
    #[serde(default)]
    pub panel: BarSettings,
    /// Where messages come from
    #[serde(default)]
    pub source: SourceConfig,
    /// Terminal presentation
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl AppConfig {
    /// Load configuration from disk, or defaults when no file exists yet
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.topic_bar", "topic-bar")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path.
    ///
    /// Accepts a full config file or a bare panel state as saved by the host.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        upgrade(value)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            panel: BarSettings::default(),
            source: SourceConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Terminal presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Registered displayer ID
    pub displayer: String,
    /// Bar size in character cells
    pub width: usize,
    pub height: usize,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            displayer: "text_bar".to_string(),
            width: 40,
            height: 1,
            color: true,
        }
    }
}
