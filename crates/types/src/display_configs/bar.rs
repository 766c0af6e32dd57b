//! Bar widget settings as persisted by the host

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Default bar color when none is configured
pub const DEFAULT_BAR_COLOR: &str = "#00ff00";

/// Bar orientation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BarOrientation {
    #[serde(rename = "horizontal")]
    #[default]
    Horizontal,
    #[serde(rename = "vertical")]
    Vertical,
}

impl BarOrientation {
    /// Settings-tree value for this orientation
    pub fn as_str(&self) -> &'static str {
        match self {
            BarOrientation::Horizontal => "horizontal",
            BarOrientation::Vertical => "vertical",
        }
    }

    /// Parse a settings-tree value, `None` for anything unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "horizontal" => Some(BarOrientation::Horizontal),
            "vertical" => Some(BarOrientation::Vertical),
            _ => None,
        }
    }
}

/// Configured normalization range. `min` may be greater than or equal to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Signed width of the range (`max - min`)
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Bar widget settings.
///
/// Field names follow the host's persisted panel state (`topicField`, `minValue`, ...).
/// Fields missing from a partial state fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarSettings {
    /// Selector in `channel` or `channel.field.path` form
    pub topic_field: String,
    pub min_value: f64,
    pub max_value: f64,
    /// Hex color, passed through to presentation
    pub bar_color: String,
    /// Passed through to presentation
    pub orientation: BarOrientation,
}

impl BarSettings {
    /// Resolved selector for the current `topic_field`
    pub fn selector(&self) -> Selector {
        Selector::resolve(Some(&self.topic_field))
    }

    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.min_value, self.max_value)
    }
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            topic_field: String::new(),
            min_value: 0.0,
            max_value: 100.0,
            bar_color: DEFAULT_BAR_COLOR.to_string(),
            orientation: BarOrientation::Horizontal,
        }
    }
}
