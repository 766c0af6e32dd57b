//! Numeric value extraction from message payloads

use log::trace;
use topic_bar_types::{FieldPath, MessagePayload};

use crate::constants::PRIORITY_FIELDS;

/// Extract a numeric scalar from a payload.
///
/// With a non-empty `path`, each key is looked up in turn. Keys on arrays are
/// decimal indices (`data.1`). A scalar before the end of the path, a missing
/// key, a bad index or a non-numeric leaf yields `None`.
///
/// With an empty path the payload is searched heuristically:
/// - a bare number is returned as is
/// - on a record, the first numeric value among [`PRIORITY_FIELDS`]
/// - otherwise the first numeric value in the record's key order
///
/// The last rule may pick a field the user did not intend; it guarantees that
/// some value is shown whenever the message carries any number at all.
pub fn extract(payload: &MessagePayload, path: &FieldPath) -> Option<f64> {
    if path.is_empty() {
        discover(payload)
    } else {
        follow(payload, path)
    }
}

/// Walk `path` key by key and read the leaf as a number
pub fn follow(payload: &MessagePayload, path: &FieldPath) -> Option<f64> {
    let mut current = payload;
    for key in path.iter() {
        current = match current.child(key) {
            Some(next) => next,
            None => {
                trace!("Path {} has nothing at {:?}", path, key);
                return None;
            }
        };
    }
    current.as_f64()
}

/// Heuristic field discovery for messages without a configured path
pub fn discover(payload: &MessagePayload) -> Option<f64> {
    match payload {
        MessagePayload::Number(n) => Some(*n),
        MessagePayload::Record(entries) => {
            let by_priority = PRIORITY_FIELDS
                .iter()
                .find_map(|key| payload.get(key).and_then(MessagePayload::as_f64));

            by_priority.or_else(|| entries.iter().find_map(|(_, value)| value.as_f64()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> MessagePayload {
        MessagePayload::from(value)
    }

    fn path(keys: &[&str]) -> FieldPath {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_follow_nested_path() {
        let msg = payload(json!({"bar": {"baz": 42}}));
        assert_eq!(extract(&msg, &path(&["bar", "baz"])), Some(42.0));
    }

    #[test]
    fn test_non_numeric_leaf_is_absent() {
        let msg = payload(json!({"bar": {"baz": "x"}}));
        assert_eq!(extract(&msg, &path(&["bar", "baz"])), None);

        let msg = payload(json!({"bar": {"baz": true}}));
        assert_eq!(extract(&msg, &path(&["bar", "baz"])), None);

        // Path ends on a record, not a number
        let msg = payload(json!({"bar": {"baz": 1}}));
        assert_eq!(extract(&msg, &path(&["bar"])), None);
    }

    #[test]
    fn test_missing_key_or_wrong_shape_is_absent() {
        let msg = payload(json!({"bar": {"baz": 42}}));
        assert_eq!(extract(&msg, &path(&["bar", "qux"])), None);
        assert_eq!(extract(&msg, &path(&["bar", "baz", "deeper"])), None);

        assert_eq!(extract(&MessagePayload::Null, &path(&["bar"])), None);
    }

    #[test]
    fn test_path_indexes_into_arrays() {
        let msg = payload(json!({"data": [1.5, 2.5, 3.5]}));
        assert_eq!(extract(&msg, &path(&["data", "1"])), Some(2.5));
        assert_eq!(extract(&msg, &path(&["data", "3"])), None);
        assert_eq!(extract(&msg, &path(&["data", "x"])), None);
        // Array itself is not a number
        assert_eq!(extract(&msg, &path(&["data"])), None);

        let msg = payload(json!({"pose": {"covariance": [[0.1, 0.2], [0.3, 0.4]]}}));
        assert_eq!(extract(&msg, &path(&["pose", "covariance", "1", "0"])), Some(0.3));
    }

    #[test]
    fn test_bare_number_without_path() {
        assert_eq!(extract(&MessagePayload::Number(7.0), &FieldPath::default()), Some(7.0));
    }

    #[test]
    fn test_priority_field_beats_arbitrary_key() {
        let msg = payload(json!({"foo": 1, "temperature": 98.6}));
        assert_eq!(extract(&msg, &FieldPath::default()), Some(98.6));

        // Earlier priority entries win over later ones regardless of record order
        let msg = payload(json!({"pressure": 3, "velocity": 2, "value": 1}));
        assert_eq!(extract(&msg, &FieldPath::default()), Some(1.0));
    }

    #[test]
    fn test_priority_field_must_be_numeric() {
        let msg = payload(json!({"value": "n/a", "data": {"x": 1}, "y": 5}));
        assert_eq!(extract(&msg, &FieldPath::default()), Some(5.0));
    }

    #[test]
    fn test_fallback_scan_uses_record_order() {
        let msg = payload(json!({"unrelated": 3}));
        assert_eq!(extract(&msg, &FieldPath::default()), Some(3.0));

        let msg = payload(json!({"label": "imu", "zeta": 9, "alpha": 4}));
        assert_eq!(extract(&msg, &FieldPath::default()), Some(9.0));
    }

    #[test]
    fn test_nothing_numeric_is_absent() {
        let msg = payload(json!({"label": "imu", "nested": {"value": 1}}));
        assert_eq!(extract(&msg, &FieldPath::default()), None);
        assert_eq!(extract(&payload(json!("12")), &FieldPath::default()), None);
        assert_eq!(extract(&payload(json!([1, 2])), &FieldPath::default()), None);
        assert_eq!(extract(&MessagePayload::Null, &FieldPath::default()), None);
    }
}
