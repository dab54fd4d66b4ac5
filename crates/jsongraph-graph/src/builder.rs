//! Graph builder for turning a JSON value into nodes and links.
//!
//! The builder walks the value depth-first:
//! 1. One node per visited non-null value, keyed by its dotted path
//! 2. Structural links (parent/child, array neighbours) as they are found
//! 3. Caller-defined cross-links over every visited pair, afterwards
//!
//! Nothing is kept between builds. Each call starts from an empty graph.

use crate::edge::{GraphLink, LinkKind};
use crate::error::Result;
use crate::graph::JsonGraph;
use crate::options::GraphOptions;
use jsongraph_core::{GraphNode, NodePath};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Builds a [`JsonGraph`] from a JSON value.
///
/// A `serde_json::Value` is always a finite tree, so traversal terminates
/// and never meets a cycle. Recursion depth is bounded by
/// [`GraphOptions::max_depth`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    options: GraphOptions,
}

impl GraphBuilder {
    /// Creates a builder with the given options.
    pub fn new(options: GraphOptions) -> Self {
        Self { options }
    }

    /// Walks `value` and returns the finished graph.
    ///
    /// A null root yields an empty graph.
    pub fn build(&self, value: &Value) -> JsonGraph {
        let mut traversal = Traversal::new(&self.options);
        traversal.visit(value, &NodePath::root(), None, 0);

        let structural = traversal.links.len();
        traversal.resolve_cross_links();

        debug!(
            "Built graph: {} nodes, {} structural links, {} cross-links",
            traversal.nodes.len(),
            structural,
            traversal.links.len() - structural
        );

        JsonGraph::from_parts(traversal.nodes, traversal.links)
    }

    /// Parses `text` as JSON and builds its graph.
    pub fn build_str(&self, text: &str) -> Result<JsonGraph> {
        let value: Value = serde_json::from_str(text)?;
        Ok(self.build(&value))
    }
}

/// Builds a graph with the given options.
pub fn json_to_graph(value: &Value, options: &GraphOptions) -> JsonGraph {
    GraphBuilder::new(options.clone()).build(value)
}

/// Parses JSON text and builds its graph.
pub fn json_str_to_graph(text: &str, options: &GraphOptions) -> Result<JsonGraph> {
    GraphBuilder::new(options.clone()).build_str(text)
}

/// State of a single build.
struct Traversal<'a> {
    options: &'a GraphOptions,
    nodes: Vec<GraphNode>,
    /// Path of each node, parallel to `nodes`.
    paths: Vec<NodePath>,
    /// Node id -> position in `nodes`.
    visited: HashMap<String, usize>,
    links: Vec<GraphLink>,
    /// [`GraphLink::key`]s of hierarchical links already emitted.
    hierarchical: HashSet<String>,
}

impl<'a> Traversal<'a> {
    fn new(options: &'a GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            paths: Vec::new(),
            visited: HashMap::new(),
            links: Vec::new(),
            hierarchical: HashSet::new(),
        }
    }

    fn visit(&mut self, value: &Value, path: &NodePath, parent_id: Option<&str>, depth: usize) {
        if depth > self.options.max_depth {
            return;
        }
        if value.is_null() {
            return;
        }

        let id = path.id();

        if !self.visited.contains_key(&id) {
            let key = path.key();
            let node = GraphNode::new(
                id.clone(),
                self.options.label(key, value, path),
                self.options.description(key, value, path),
            )
            .with_url(self.options.url(key, value, path))
            .at_depth(path.depth());
            self.visited.insert(id.clone(), self.nodes.len());
            self.nodes.push(node);
            self.paths.push(path.clone());
        }

        if let Some(parent_id) = parent_id {
            if self.options.create_hierarchical_links {
                self.add_hierarchical(parent_id, &id);
            }
        }

        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = path.index(index);
                    self.visit(item, &item_path, Some(id.as_str()), depth + 1);

                    // Emitted even when either element was pruned.
                    if self.options.create_array_links && index > 0 {
                        self.links.push(GraphLink::new(
                            path.index(index - 1).id(),
                            item_path.id(),
                            LinkKind::Sibling,
                        ));
                    }
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    self.visit(child, &path.child(key.as_str()), Some(id.as_str()), depth + 1);
                }
            }
            _ => {}
        }
    }

    fn add_hierarchical(&mut self, source: &str, target: &str) {
        let link = GraphLink::new(source, target, LinkKind::Hierarchical);
        if self.hierarchical.insert(link.key()) {
            self.links.push(link);
        }
    }

    /// Appends a custom link for every visited pair the cross-link hook accepts.
    fn resolve_cross_links(&mut self) {
        let options = self.options;
        let Some(should_link) = options.cross_link_fn.as_ref() else {
            return;
        };

        let mut cross_links = Vec::new();
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let (a, b) = (&self.nodes[i], &self.nodes[j]);
                if should_link(a, b, &self.paths[i], &self.paths[j]) {
                    cross_links.push(GraphLink::new(a.id.clone(), b.id.clone(), LinkKind::Custom));
                }
            }
        }
        self.links.extend(cross_links);
    }
}
