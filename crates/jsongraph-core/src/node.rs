//! Graph nodes.
//!
//! A node stands for one visited JSON value. It carries only display
//! data; adjacency lives on the links and is derived when needed.

use serde::{Deserialize, Serialize};

/// Url used when a node has nowhere to navigate to.
pub const NO_URL: &str = "#";

/// A vertex in the JSON graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Dot-joined path from the root, e.g. `root.address.city`.
    pub id: String,

    /// Display text.
    pub label: String,

    /// Secondary text, shown as a tooltip by most renderers.
    pub description: String,

    /// Navigation target. [`NO_URL`] when there is none.
    pub url: String,

    /// Levels below the root, taken from the traversal path. Keys may
    /// contain `.`, so this is not derivable from `id`.
    #[serde(default)]
    pub depth: usize,
}

impl GraphNode {
    /// Creates a node with no navigation target.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            url: NO_URL.to_string(),
            depth: 0,
        }
    }

    /// Sets the navigation target.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the node's level below the root.
    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_placeholder_url() {
        let node = GraphNode::new("root", "root", "{}");
        assert_eq!(node.url, NO_URL);
        assert_eq!(node.depth, 0);

        let linked = node.with_url("https://example.com");
        assert_eq!(linked.url, "https://example.com");
    }

    #[test]
    fn test_depth_is_independent_of_id() {
        let node = GraphNode::new("root.a.b.c", "a.b.c", "1").at_depth(1);
        assert_eq!(node.depth, 1);
    }

    #[test]
    fn test_missing_depth_deserializes_as_zero() {
        let node: GraphNode = serde_json::from_str(
            r##"{"id": "root", "label": "root", "description": "", "url": "#"}"##,
        )
        .unwrap();
        assert_eq!(node.depth, 0);
    }

    #[test]
    fn test_serializes_flat() {
        let node = GraphNode::new("root.a", "a", "1").at_depth(1);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "root.a",
                "label": "a",
                "description": "1",
                "url": "#",
                "depth": 1
            })
        );
    }
}
