//! Dynamically shaped message payloads
//!
//! Telemetry messages have no fixed schema, so every decoded message is held as
//! a recursive [`MessagePayload`]. Records keep their keys in document order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded message: scalar, array or record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MessagePayload {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MessagePayload>),
    /// Key/value pairs in the order they were decoded
    Record(Vec<(String, MessagePayload)>),
}

impl MessagePayload {
    /// Numeric value, if this payload is a number. Booleans are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MessagePayload::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Look up a key on a record. Any other shape has no keys.
    pub fn get(&self, key: &str) -> Option<&MessagePayload> {
        match self {
            MessagePayload::Record(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Record entries in document order (empty for non-records)
    pub fn entries(&self) -> &[(String, MessagePayload)] {
        match self {
            MessagePayload::Record(entries) => entries,
            _ => &[],
        }
    }

    /// Step one level down: a key on a record, or a decimal index into an
    /// array. Scalars have no children.
    pub fn child(&self, key: &str) -> Option<&MessagePayload> {
        match self {
            MessagePayload::Record(_) => self.get(key),
            MessagePayload::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

impl From<Value> for MessagePayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MessagePayload::Null,
            Value::Bool(b) => MessagePayload::Bool(b),
            Value::Number(n) => n.as_f64().map_or(MessagePayload::Null, MessagePayload::Number),
            Value::String(s) => MessagePayload::String(s),
            Value::Array(items) => {
                MessagePayload::Array(items.into_iter().map(MessagePayload::from).collect())
            }
            Value::Object(map) => MessagePayload::Record(
                map.into_iter()
                    .map(|(key, value)| (key, MessagePayload::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<MessagePayload> for Value {
    fn from(payload: MessagePayload) -> Self {
        match payload {
            MessagePayload::Null => Value::Null,
            MessagePayload::Bool(b) => Value::Bool(b),
            MessagePayload::Number(n) => {
                serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
            }
            MessagePayload::String(s) => Value::String(s),
            MessagePayload::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            MessagePayload::Record(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<f64> for MessagePayload {
    fn from(n: f64) -> Self {
        MessagePayload::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_document_order() {
        let payload: MessagePayload =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = payload.entries().iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_numbers_become_f64() {
        let payload = MessagePayload::from(json!({"int": 3, "neg": -2, "float": 1.5}));

        assert_eq!(payload.get("int").and_then(MessagePayload::as_f64), Some(3.0));
        assert_eq!(payload.get("neg").and_then(MessagePayload::as_f64), Some(-2.0));
        assert_eq!(payload.get("float").and_then(MessagePayload::as_f64), Some(1.5));
    }

    #[test]
    fn test_non_records_have_no_keys() {
        assert!(MessagePayload::from(json!([1, 2])).get("0").is_none());
        assert!(MessagePayload::Number(7.0).get("value").is_none());
        assert!(MessagePayload::Bool(true).as_f64().is_none());
    }

    #[test]
    fn test_child_indexes_arrays() {
        let items = MessagePayload::from(json!([1.5, 2.5, 3.5]));

        assert_eq!(items.child("1"), Some(&MessagePayload::Number(2.5)));
        assert!(items.child("3").is_none());
        assert!(items.child("-1").is_none());
        assert!(items.child("first").is_none());

        let record = MessagePayload::from(json!({"0": 4}));
        assert_eq!(record.child("0"), Some(&MessagePayload::Number(4.0)));
        assert!(MessagePayload::Number(1.0).child("0").is_none());
    }
}
