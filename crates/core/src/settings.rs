//! Typed settings updates coming from the host settings editor

use serde_json::Value;
use topic_bar_types::{BarOrientation, BarSettings, Topic, ValueRange};

use crate::constants::SUGGESTED_FIELDS;
use crate::error::{BarError, BarResult};

/// One change to one recognized setting
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    TopicField(String),
    MinValue(f64),
    MaxValue(f64),
    BarColor(String),
    Orientation(BarOrientation),
}

impl SettingsUpdate {
    /// Build an update from a settings-tree action.
    ///
    /// `path` is the node path as sent by the editor, e.g. `["general", "topicField"]`;
    /// only the last element names the field.
    pub fn from_action<S: AsRef<str>>(path: &[S], value: &Value) -> BarResult<Self> {
        let field = path
            .last()
            .map(AsRef::as_ref)
            .ok_or_else(|| BarError::UnknownSetting(String::new()))?;

        match field {
            "topicField" => Ok(Self::TopicField(expect_str(field, value)?.to_string())),
            "minValue" => Ok(Self::MinValue(
                expect_number(field, value)?.unwrap_or(ValueRange::default().min),
            )),
            "maxValue" => Ok(Self::MaxValue(
                expect_number(field, value)?.unwrap_or(ValueRange::default().max),
            )),
            "barColor" => Ok(Self::BarColor(expect_str(field, value)?.to_string())),
            "orientation" => {
                let raw = expect_str(field, value)?;
                BarOrientation::parse(raw)
                    .map(Self::Orientation)
                    .ok_or_else(|| invalid(field, format!("unknown orientation {:?}", raw)))
            }
            other => Err(BarError::UnknownSetting(other.to_string())),
        }
    }

    /// Apply to `settings`
    pub fn apply(self, settings: &mut BarSettings) {
        match self {
            Self::TopicField(topic_field) => settings.topic_field = topic_field,
            Self::MinValue(min) => settings.min_value = min,
            Self::MaxValue(max) => settings.max_value = max,
            Self::BarColor(color) => settings.bar_color = color,
            Self::Orientation(orientation) => settings.orientation = orientation,
        }
    }

    /// True for updates that can change the normalized percentage
    pub fn affects_range(&self) -> bool {
        matches!(self, Self::MinValue(_) | Self::MaxValue(_))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> BarError {
    BarError::InvalidSetting {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn expect_str<'a>(field: &str, value: &'a Value) -> BarResult<&'a str> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(""),
        other => Err(invalid(field, format!("expected a string, got {}", other))),
    }
}

/// A cleared number field (`null`) is `None`; callers fall back to the default.
fn expect_number(field: &str, value: &Value) -> BarResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        other => other
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(field, format!("expected a number, got {}", other))),
    }
}

/// Selector completions for the known topics: each topic on its own, then
/// `topic.field` for the common sensor field names.
pub fn selector_suggestions(topics: &[Topic]) -> Vec<String> {
    let mut suggestions = Vec::with_capacity(topics.len() * (SUGGESTED_FIELDS.len() + 1));
    for topic in topics {
        suggestions.push(topic.name.clone());
        for field in SUGGESTED_FIELDS {
            suggestions.push(format!("{}.{}", topic.name, field));
        }
    }
    suggestions
}
