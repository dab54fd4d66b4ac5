//! Link types for the JSON graph.
//!
//! Links always refer to nodes by their string id. Resolving ids to node
//! objects is left to whatever renders the graph.

use serde::{Deserialize, Serialize};

/// Why two nodes are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Parent value contains child value.
    Hierarchical,

    /// Consecutive elements of the same array.
    Sibling,

    /// Added by a caller-supplied cross-link function.
    Custom,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Hierarchical => "hierarchical",
            Self::Sibling => "sibling",
            Self::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub kind: LinkKind,
}

impl GraphLink {
    /// Creates a new link.
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }

    /// The `source->target` key the builder de-duplicates hierarchical
    /// links on.
    pub fn key(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }

    /// The end opposite to `id`, if the link touches it.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_key() {
        let link = GraphLink::new("root", "root.a", LinkKind::Hierarchical);
        assert_eq!(link.key(), "root->root.a");
    }

    #[test]
    fn test_other_end() {
        let link = GraphLink::new("root.a.0", "root.a.1", LinkKind::Sibling);
        assert_eq!(link.other_end("root.a.0"), Some("root.a.1"));
        assert_eq!(link.other_end("root.a.1"), Some("root.a.0"));
        assert_eq!(link.other_end("root"), None);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let link = GraphLink::new("a", "b", LinkKind::Sibling);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["kind"], "sibling");
        assert_eq!(LinkKind::Custom.to_string(), "custom");
    }
}
