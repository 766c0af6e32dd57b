//! Built-in message sources
//!
//! A message source stands in for the host's delivery mechanism: it produces
//! one batch of decoded messages per frame for the subscribed channel.

mod replay;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use topic_bar_core::{global_registry, register_source, BoxedMessageSource};

pub use replay::{ReplaySource, ReplaySourceConfig};
pub use test::{TestMode, TestSource, TestSourceConfig};

/// Type-safe enum for all source configurations.
/// Uses serde tag for JSON serialization: {"source_type": "replay", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source_type")]
pub enum SourceConfig {
    #[serde(rename = "replay")]
    Replay(ReplaySourceConfig),

    #[serde(rename = "test")]
    Test(TestSourceConfig),
}

impl SourceConfig {
    /// Get the source type ID string
    pub fn source_type(&self) -> &'static str {
        match self {
            SourceConfig::Replay(_) => "replay",
            SourceConfig::Test(_) => "test",
        }
    }

    /// Delay between frames in milliseconds
    pub fn update_interval_ms(&self) -> u64 {
        match self {
            SourceConfig::Replay(cfg) => cfg.update_interval_ms,
            SourceConfig::Test(cfg) => cfg.update_interval_ms,
        }
    }

    /// Source-specific settings, as handed to `MessageSource::configure`
    pub fn to_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            SourceConfig::Replay(cfg) => serde_json::to_value(cfg)?,
            SourceConfig::Test(cfg) => serde_json::to_value(cfg)?,
        };
        Ok(value)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Test(TestSourceConfig::default())
    }
}

/// Register all built-in sources with the global registry
pub fn register_all() {
    register_source!("replay", ReplaySource);
    register_source!("test", TestSource);
}

/// Create and configure the source described by `config`
pub fn create_source(config: &SourceConfig) -> Result<BoxedMessageSource> {
    let mut source = global_registry()
        .read()
        .map_err(|_| anyhow::anyhow!("Registry lock poisoned"))?
        .create_source(config.source_type())?;

    source
        .configure(&config.to_value()?)
        .with_context(|| format!("Failed to configure {} source", config.source_type()))?;
    Ok(source)
}
