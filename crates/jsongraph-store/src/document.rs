//! Stored documents and what can be derived from their text.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named JSON text kept in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonDocument {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Content length in UTF-8 bytes.
    pub size: u64,
}

impl JsonDocument {
    /// Creates a document with a fresh id.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            size: content.len() as u64,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the content and bumps `updated_at`.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.size = self.content.len() as u64;
        self.updated_at = Utc::now();
    }

    /// Renames the document and bumps `updated_at`.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// True if the content has anything besides whitespace.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    pub fn stats(&self) -> ContentStats {
        ContentStats::of(&self.content)
    }

    pub fn validate(&self) -> Validation {
        Validation::of(&self.content)
    }

    /// Case-insensitive substring match against the name or the content.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }
}

/// Name for a new untitled document, from the local time: `MM-DD-YYYY_HH-MM-SS`.
pub fn generate_name() -> String {
    format_name(Local::now())
}

fn format_name<Tz: chrono::TimeZone>(at: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%m-%d-%Y_%H-%M-%S").to_string()
}

/// Line, character and byte counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Newline count plus one; zero for empty text.
    pub lines: usize,
    pub characters: usize,
    /// UTF-8 bytes.
    pub size: usize,
}

impl ContentStats {
    pub fn of(content: &str) -> Self {
        let lines = if content.is_empty() {
            0
        } else {
            content.split('\n').count()
        };
        Self {
            lines,
            characters: content.chars().count(),
            size: content.len(),
        }
    }
}

/// Outcome of parsing a document's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub is_valid: bool,
    /// Parser message when invalid, empty otherwise.
    pub error: String,
    /// The parsed value. `None` for blank or invalid text.
    pub parsed: Option<Value>,
}

impl Validation {
    /// Parses `content`. Blank text counts as valid with nothing parsed.
    pub fn of(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self {
                is_valid: true,
                error: String::new(),
                parsed: None,
            };
        }

        match serde_json::from_str::<Value>(content) {
            Ok(value) => Self {
                is_valid: true,
                error: String::new(),
                parsed: Some(value),
            },
            Err(e) => Self {
                is_valid: false,
                error: e.to_string(),
                parsed: None,
            },
        }
    }
}
