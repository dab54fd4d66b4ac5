//! Shallow change counts between two JSON texts.
//!
//! Only top-level keys are compared. A change anywhere below a key counts
//! as one modification of that key. This is a status-bar summary, not a
//! structural diff.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChanges {
    /// Keys only in the modified text.
    pub additions: usize,
    /// Keys only in the original text.
    pub deletions: usize,
    /// Keys in both whose values differ.
    pub modifications: usize,
}

impl KeyChanges {
    /// Compares the top-level keys of two JSON texts.
    ///
    /// Blank or unparsable input on either side yields all zeros.
    pub fn between(original: &str, modified: &str) -> Self {
        if original.trim().is_empty() || modified.trim().is_empty() {
            return Self::default();
        }

        match (
            serde_json::from_str::<Value>(original),
            serde_json::from_str::<Value>(modified),
        ) {
            (Ok(a), Ok(b)) => Self::between_values(&a, &b),
            _ => Self::default(),
        }
    }

    /// Compares the top-level keys of two values.
    ///
    /// Arrays are keyed by index; scalars have no keys.
    pub fn between_values(original: &Value, modified: &Value) -> Self {
        let before = top_level(original);
        let after = top_level(modified);

        let mut changes = Self::default();
        for (key, value) in &after {
            match before.iter().find(|(k, _)| k == key) {
                None => changes.additions += 1,
                Some((_, old)) if old != value => changes.modifications += 1,
                Some(_) => {}
            }
        }
        changes.deletions = before
            .iter()
            .filter(|(key, _)| !after.iter().any(|(k, _)| k == key))
            .count();
        changes
    }

    pub fn total(&self) -> usize {
        self.additions + self.deletions + self.modifications
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn top_level(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_top_level_keys() {
        let changes = KeyChanges::between(
            r#"{"a": 1, "b": {"x": 1}, "c": 3}"#,
            r#"{"a": 1, "b": {"x": 2}, "d": 4}"#,
        );
        assert_eq!(
            changes,
            KeyChanges {
                additions: 1,
                deletions: 1,
                modifications: 1
            }
        );
        assert_eq!(changes.total(), 3);
    }

    #[test]
    fn test_nested_change_counts_once() {
        let changes = KeyChanges::between(
            r#"{"a": {"x": 1, "y": 1, "z": 1}}"#,
            r#"{"a": {"x": 2, "y": 2, "z": 2}}"#,
        );
        assert_eq!(changes.modifications, 1);
    }

    #[test]
    fn test_key_order_is_ignored() {
        let changes = KeyChanges::between(r#"{"a": 1, "b": 2}"#, r#"{"b": 2, "a": 1}"#);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_arrays_compare_by_index() {
        let changes = KeyChanges::between("[1, 2]", "[1, 3, 4]");
        assert_eq!(changes.modifications, 1);
        assert_eq!(changes.additions, 1);
        assert_eq!(changes.deletions, 0);
    }

    #[test]
    fn test_blank_or_invalid_is_zero() {
        assert!(KeyChanges::between("", r#"{"a": 1}"#).is_empty());
        assert!(KeyChanges::between(r#"{"a": 1}"#, "{oops").is_empty());
        assert!(KeyChanges::between("1", "2").is_empty());
    }
}
