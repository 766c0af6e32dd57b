//! Upgrading older config layouts

use anyhow::{bail, Context, Result};
use log::info;
use serde_json::Value;
use topic_bar_core::BarSettings;

use super::settings::{AppConfig, CONFIG_VERSION};

/// Keys that only appear in a bare panel state saved by the host
const PANEL_STATE_KEYS: [&str; 5] = ["topicField", "minValue", "maxValue", "barColor", "orientation"];

/// Turn a parsed config file into the current [`AppConfig`].
///
/// A bare panel state (`{"topicField": ..., "minValue": ...}`) is wrapped into a
/// default config. Files from a newer format version are rejected.
pub fn upgrade(value: Value) -> Result<AppConfig> {
    let Value::Object(map) = &value else {
        bail!("Config must be a JSON object");
    };

    let is_panel_state = !map.contains_key("panel")
        && !map.contains_key("version")
        && map.keys().any(|key| PANEL_STATE_KEYS.contains(&key.as_str()));

    if is_panel_state {
        info!("Importing bare panel state into a new config");
        let panel: BarSettings =
            serde_json::from_value(value).context("Invalid panel state")?;
        return Ok(AppConfig {
            panel,
            ..AppConfig::default()
        });
    }

    let config: AppConfig = serde_json::from_value(value).context("Invalid config")?;
    if config.version > CONFIG_VERSION {
        bail!(
            "Config version {} is newer than supported version {}",
            config.version,
            CONFIG_VERSION
        );
    }
    Ok(config)
}
