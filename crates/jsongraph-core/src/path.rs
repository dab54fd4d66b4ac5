//! Paths from the traversal root to a value.

use std::fmt;

/// First segment of every path.
pub const ROOT_KEY: &str = "root";

/// The key/index sequence leading from the root to a value.
///
/// Every path starts with [`ROOT_KEY`]. Array indices are stored in their
/// decimal form, so `["root", "items", "0"]` addresses the first element
/// of the `items` array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl Default for NodePath {
    fn default() -> Self {
        Self::root()
    }
}

impl NodePath {
    /// The path of the traversal root.
    pub fn root() -> Self {
        Self {
            segments: vec![ROOT_KEY.to_string()],
        }
    }

    /// Returns a new path one level below this one.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    /// Returns the path of the `index`-th array element below this one.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// Node id: the segments joined with `.`.
    pub fn id(&self) -> String {
        self.segments.join(".")
    }

    /// The last segment. The root's key is [`ROOT_KEY`].
    pub fn key(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or(ROOT_KEY)
    }

    /// Levels below the root.
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = NodePath::root();
        assert_eq!(root.id(), "root");
        assert_eq!(root.key(), "root");
        assert_eq!(root.depth(), 0);
        assert_eq!(NodePath::default(), root);
    }

    #[test]
    fn test_child_and_index() {
        let path = NodePath::root().child("items").index(2);
        assert_eq!(path.id(), "root.items.2");
        assert_eq!(path.key(), "2");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.to_string(), "root.items.2");
    }

    #[test]
    fn test_dotted_key_is_one_level() {
        let path = NodePath::root().child("a.b.c");
        assert_eq!(path.id(), "root.a.b.c");
        assert_eq!(path.key(), "a.b.c");
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn test_empty_key_is_kept() {
        let path = NodePath::root().child("");
        assert_eq!(path.id(), "root.");
        assert_eq!(path.key(), "");
    }
}
