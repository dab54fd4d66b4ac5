//! Builder options, presets and file-backed settings.
//!
//! `GraphOptions` carries the traversal policy plus optional labeling
//! hooks. Every hook left unset falls back to a default at call time, so
//! a `GraphOptions::default()` is always usable as-is.

use crate::error::{GraphError, Result};
use jsongraph_core::value::{display_string, pretty, truncate_chars, ValueKind};
use jsongraph_core::{GraphNode, NodePath, NO_URL, ROOT_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Default traversal bound. Depth 0 is the root.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Characters of a value's string form kept by the default label.
pub const LABEL_MAX_CHARS: usize = 20;

/// Characters of pretty JSON kept by the default description.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Computes display text from `(key, value, path)`.
pub type TextFn = Arc<dyn Fn(&str, &Value, &NodePath) -> String + Send + Sync>;

/// Decides whether two visited nodes get a custom link.
pub type CrossLinkFn =
    Arc<dyn Fn(&GraphNode, &GraphNode, &NodePath, &NodePath) -> bool + Send + Sync>;

/// Configuration for a single graph build.
#[derive(Clone)]
pub struct GraphOptions {
    /// Node label hook. Defaults to [`default_label`].
    pub label_fn: Option<TextFn>,

    /// Node description hook. Defaults to [`default_description`].
    pub description_fn: Option<TextFn>,

    /// Node url hook. Defaults to [`default_url`].
    pub url_fn: Option<TextFn>,

    /// Values deeper than this are pruned together with their subtree.
    pub max_depth: usize,

    /// Link every parent to each of its children.
    pub create_hierarchical_links: bool,

    /// Link consecutive array elements.
    pub create_array_links: bool,

    /// Evaluated for every unordered pair of visited nodes after traversal.
    pub cross_link_fn: Option<CrossLinkFn>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            label_fn: None,
            description_fn: None,
            url_fn: None,
            max_depth: DEFAULT_MAX_DEPTH,
            create_hierarchical_links: true,
            create_array_links: false,
            cross_link_fn: None,
        }
    }
}

impl fmt::Debug for GraphOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphOptions")
            .field("label_fn", &self.label_fn.is_some())
            .field("description_fn", &self.description_fn.is_some())
            .field("url_fn", &self.url_fn.is_some())
            .field("max_depth", &self.max_depth)
            .field("create_hierarchical_links", &self.create_hierarchical_links)
            .field("create_array_links", &self.create_array_links)
            .field("cross_link_fn", &self.cross_link_fn.is_some())
            .finish()
    }
}

impl GraphOptions {
    /// Creates options with every default in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options bundled under a named preset.
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Flat => Self {
                max_depth: 1,
                create_hierarchical_links: false,
                create_array_links: true,
                ..Self::default()
            },
            Preset::Deep => Self {
                max_depth: 5,
                create_hierarchical_links: true,
                create_array_links: false,
                ..Self::default()
            },
            Preset::Api => Self {
                max_depth: 3,
                create_hierarchical_links: true,
                create_array_links: true,
                ..Self::default()
            }
            .with_label_fn(api_label),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_hierarchical_links(mut self, enabled: bool) -> Self {
        self.create_hierarchical_links = enabled;
        self
    }

    pub fn with_array_links(mut self, enabled: bool) -> Self {
        self.create_array_links = enabled;
        self
    }

    pub fn with_label_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value, &NodePath) -> String + Send + Sync + 'static,
    {
        self.label_fn = Some(Arc::new(f));
        self
    }

    pub fn with_description_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value, &NodePath) -> String + Send + Sync + 'static,
    {
        self.description_fn = Some(Arc::new(f));
        self
    }

    pub fn with_url_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value, &NodePath) -> String + Send + Sync + 'static,
    {
        self.url_fn = Some(Arc::new(f));
        self
    }

    pub fn with_cross_link_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&GraphNode, &GraphNode, &NodePath, &NodePath) -> bool + Send + Sync + 'static,
    {
        self.cross_link_fn = Some(Arc::new(f));
        self
    }

    pub(crate) fn label(&self, key: &str, value: &Value, path: &NodePath) -> String {
        match &self.label_fn {
            Some(f) => f(key, value, path),
            None => default_label(key, value, path),
        }
    }

    pub(crate) fn description(&self, key: &str, value: &Value, path: &NodePath) -> String {
        match &self.description_fn {
            Some(f) => f(key, value, path),
            None => default_description(key, value, path),
        }
    }

    pub(crate) fn url(&self, key: &str, value: &Value, path: &NodePath) -> String {
        match &self.url_fn {
            Some(f) => f(key, value, path),
            None => default_url(key, value, path),
        }
    }
}

/// The key when it is non-empty, otherwise the first
/// [`LABEL_MAX_CHARS`] characters of the value's string form.
///
/// An object key `""` stays empty rather than falling back to
/// [`ROOT_KEY`], so it is labelled from its value.
pub fn default_label(key: &str, value: &Value, _path: &NodePath) -> String {
    if key.is_empty() {
        truncate_chars(&display_string(value), LABEL_MAX_CHARS)
    } else {
        key.to_string()
    }
}

/// Pretty JSON cut to [`DESCRIPTION_MAX_CHARS`] plus `...` for arrays and
/// objects; the plain string form for scalars.
///
/// The cut is by characters and may leave unbalanced JSON behind. The
/// result is display text only.
pub fn default_description(_key: &str, value: &Value, _path: &NodePath) -> String {
    if ValueKind::of(value).is_composite() {
        format!(
            "{}...",
            truncate_chars(&pretty(value), DESCRIPTION_MAX_CHARS)
        )
    } else {
        display_string(value)
    }
}

/// Always [`NO_URL`].
pub fn default_url(_key: &str, _value: &Value, _path: &NodePath) -> String {
    NO_URL.to_string()
}

/// Label hook of the `api` preset.
fn api_label(key: &str, value: &Value, _path: &NodePath) -> String {
    if key == ROOT_KEY {
        return "API Response".to_string();
    }
    match value {
        Value::String(s) if s.chars().count() < 30 => s.clone(),
        _ => key.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Presets
// ─────────────────────────────────────────────────────────────────────────────

/// Named option bundles for common JSON shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Flat objects: one level, sibling links only.
    Flat,
    /// Deeply nested documents: five levels of hierarchy.
    Deep,
    /// API responses: hierarchy plus sibling links, short strings as labels.
    Api,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Flat, Preset::Deep, Preset::Api];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Flat => "flat",
            Preset::Deep => "deep",
            Preset::Api => "api",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preset {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GraphError::UnknownPreset(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// The data-only part of [`GraphOptions`], as read from a settings file.
///
/// Fields left unset keep the preset's value, or the plain default when
/// there is no preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphSettings {
    pub preset: Option<Preset>,
    pub max_depth: Option<usize>,
    pub create_hierarchical_links: Option<bool>,
    pub create_array_links: Option<bool>,
}

impl GraphSettings {
    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fields set in `other` replace the ones here.
    pub fn merge(mut self, other: GraphSettings) -> Self {
        self.preset = other.preset.or(self.preset);
        self.max_depth = other.max_depth.or(self.max_depth);
        self.create_hierarchical_links = other
            .create_hierarchical_links
            .or(self.create_hierarchical_links);
        self.create_array_links = other.create_array_links.or(self.create_array_links);
        self
    }

    /// Resolves to builder options: preset first, explicit fields on top.
    pub fn into_options(self) -> GraphOptions {
        let mut options = self
            .preset
            .map(GraphOptions::from_preset)
            .unwrap_or_default();

        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        if let Some(enabled) = self.create_hierarchical_links {
            options.create_hierarchical_links = enabled;
        }
        if let Some(enabled) = self.create_array_links {
            options.create_array_links = enabled;
        }
        options
    }
}
