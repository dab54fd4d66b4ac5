//! jsongraph Graph - JSON to force-graph transformation
//!
//! This crate turns an arbitrary JSON value into a flat node/link graph
//! that a force-directed renderer can lay out directly. Every visited
//! value becomes a node identified by its dotted path from the root;
//! links connect parents to children, optionally neighbouring array
//! elements, and optionally any pair a caller-supplied function selects.
//!
//! # Architecture
//!
//! - [`GraphBuilder`] walks the value once, depth-first, pruning below
//!   [`GraphOptions::max_depth`] and skipping nulls
//! - [`GraphOptions`] holds the traversal policy and labeling hooks;
//!   [`Preset`] and [`GraphSettings`] produce common configurations
//! - [`JsonGraph`] is the result, with neighbour sets and statistics
//!
//! # Example
//!
//! ```
//! use jsongraph_graph::{json_to_graph, GraphOptions};
//! use serde_json::json;
//!
//! let value = json!({"user": {"name": "Ada", "tags": ["math", "engines"]}});
//! let graph = json_to_graph(&value, &GraphOptions::default().with_array_links(true));
//!
//! assert!(graph.get("root.user.tags.1").is_some());
//! assert_eq!(graph.neighbors_of("root.user.tags.0"), vec!["root.user.tags", "root.user.tags.1"]);
//! ```

mod builder;
mod edge;
mod error;
mod graph;
mod options;

pub use builder::{json_str_to_graph, json_to_graph, GraphBuilder};
pub use edge::{GraphLink, LinkKind};
pub use error::{GraphError, Result};
pub use graph::{GraphStats, JsonGraph, NodeWithNeighbors};
pub use options::{
    default_description, default_label, default_url, CrossLinkFn, GraphOptions, GraphSettings,
    Preset, TextFn, DEFAULT_MAX_DEPTH, DESCRIPTION_MAX_CHARS, LABEL_MAX_CHARS,
};

pub use jsongraph_core::{GraphNode, NodePath};
