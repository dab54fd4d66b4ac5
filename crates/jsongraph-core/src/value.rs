//! Helpers for turning JSON values into display text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text shown for an object when it is flattened to a single string.
pub const OBJECT_PLACEHOLDER: &str = "[object Object]";

/// The shape of a JSON value, resolved once per visited value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Arrays and objects.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        write!(f, "{}", s)
    }
}

/// Flattens a value to a single line of text.
///
/// Strings are returned without quotes, arrays join their elements with
/// `,` (null elements render empty) and objects collapse to
/// [`OBJECT_PLACEHOLDER`].
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_PLACEHOLDER.to_string(),
    }
}

/// Pretty-printed JSON with two-space indentation.
pub fn pretty(value: &Value) -> String {
    // Serializing a Value cannot fail: map keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Keeps at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
