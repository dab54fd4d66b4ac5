//! jsongraph Core - the vocabulary shared by every jsongraph crate
//!
//! A JSON value becomes a graph by walking it depth-first. Each visited
//! value is addressed by a [`NodePath`] (the key/index sequence from the
//! root) and rendered as a [`GraphNode`] whose id is that path joined
//! with dots.
//!
//! # Example
//!
//! ```
//! use jsongraph_core::{GraphNode, NodePath};
//!
//! let path = NodePath::root().child("address").child("city");
//! assert_eq!(path.id(), "root.address.city");
//! assert_eq!(path.key(), "city");
//!
//! let node = GraphNode::new(path.id(), "city", "Berlin").at_depth(path.depth());
//! assert_eq!(node.url, "#");
//! assert_eq!(node.depth, 2);
//! ```

mod node;
mod path;
pub mod value;

pub use node::{GraphNode, NO_URL};
pub use path::{NodePath, ROOT_KEY};
pub use value::ValueKind;
