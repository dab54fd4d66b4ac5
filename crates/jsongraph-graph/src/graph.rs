//! The finished graph.
//!
//! `JsonGraph` is a flat node list plus a flat link list, the shape a
//! force-directed renderer consumes. It adds an id index for lookups and
//! derives neighbour sets and statistics on demand.

use crate::edge::{GraphLink, LinkKind};
use jsongraph_core::GraphNode;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Nodes and links produced by one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphParts")]
pub struct JsonGraph {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,

    /// Maps node ids to positions in `nodes`.
    #[serde(skip_serializing)]
    id_index: HashMap<String, usize>,
}

/// Wire form of a graph, without the index.
#[derive(Deserialize)]
struct GraphParts {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    links: Vec<GraphLink>,
}

impl From<GraphParts> for JsonGraph {
    fn from(parts: GraphParts) -> Self {
        JsonGraph::from_parts(parts.nodes, parts.links)
    }
}

impl JsonGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a graph from already-ordered nodes and links.
    pub fn from_parts(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        let id_index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();
        Self {
            nodes,
            links,
            id_index,
        }
    }

    /// Nodes in visitation order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Links in discovery order.
    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets a node by its id.
    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        let index = self.id_index.get(id)?;
        self.nodes.get(*index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Ids adjacent to `id`, one entry per incident link, in link order.
    pub fn neighbors_of(&self, id: &str) -> Vec<&str> {
        self.links
            .iter()
            .filter_map(|link| link.other_end(id))
            .collect()
    }

    /// Neighbour lists for every node, for hover highlighting.
    ///
    /// Nodes without links map to an empty list. Link ends that are not
    /// nodes of this graph are left out of the keys.
    pub fn neighbor_index(&self) -> HashMap<&str, Vec<&str>> {
        let mut index: HashMap<&str, Vec<&str>> = self
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), Vec::new()))
            .collect();

        for link in &self.links {
            if let Some(list) = index.get_mut(link.source.as_str()) {
                list.push(link.target.as_str());
            }
            // A self-link is already recorded once above.
            if link.source != link.target {
                if let Some(list) = index.get_mut(link.target.as_str()) {
                    list.push(link.source.as_str());
                }
            }
        }
        index
    }

    /// Nodes paired with their neighbour ids, in node order.
    pub fn nodes_with_neighbors(&self) -> Vec<NodeWithNeighbors<'_>> {
        let mut index = self.neighbor_index();
        self.nodes
            .iter()
            .map(|node| NodeWithNeighbors {
                node,
                neighbors: index.remove(node.id.as_str()).unwrap_or_default(),
            })
            .collect()
    }

    /// Links whose source or target is not a node of this graph.
    pub fn dangling_links(&self) -> impl Iterator<Item = &GraphLink> + '_ {
        self.links
            .iter()
            .filter(|link| !self.contains(&link.source) || !self.contains(&link.target))
    }

    /// A petgraph view of the graph. Dangling links are dropped.
    pub fn to_petgraph(&self) -> DiGraph<&GraphNode, LinkKind> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.links.len());
        let indexes: Vec<NodeIndex> = self.nodes.iter().map(|n| graph.add_node(n)).collect();

        for link in &self.links {
            let source = self.id_index.get(&link.source);
            let target = self.id_index.get(&link.target);
            if let (Some(&s), Some(&t)) = (source, target) {
                graph.add_edge(indexes[s], indexes[t], link.kind);
            }
        }
        graph
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let view = self.to_petgraph();

        let count = |kind: LinkKind| self.links.iter().filter(|l| l.kind == kind).count();

        let orphan_count = view
            .node_indices()
            .filter(|&idx| view.neighbors_undirected(idx).next().is_none())
            .count();

        let dangling_link_count = self.dangling_links().count();
        if dangling_link_count > 0 {
            warn!("{} links point at nodes outside the graph", dangling_link_count);
        }

        GraphStats {
            node_count: self.node_count(),
            link_count: self.link_count(),
            hierarchical_links: count(LinkKind::Hierarchical),
            sibling_links: count(LinkKind::Sibling),
            custom_links: count(LinkKind::Custom),
            orphan_count,
            dangling_link_count,
            component_count: petgraph::algo::connected_components(&view),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}

/// A node together with the ids adjacent to it.
#[derive(Debug, Clone, Serialize)]
pub struct NodeWithNeighbors<'a> {
    #[serde(flatten)]
    pub node: &'a GraphNode,
    pub neighbors: Vec<&'a str>,
}

/// Graph statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub link_count: usize,
    pub hierarchical_links: usize,
    pub sibling_links: usize,
    pub custom_links: usize,
    /// Nodes with no link to any other node.
    pub orphan_count: usize,
    /// Links with an end that is not a node.
    pub dangling_link_count: usize,
    /// Weakly connected components.
    pub component_count: usize,
    /// Deepest path below the root among the nodes.
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::json_to_graph;
    use crate::options::GraphOptions;
    use serde_json::json;

    fn node(id: &str) -> GraphNode {
        GraphNode::new(id, id, "")
    }

    #[test]
    fn test_lookup_by_id() {
        let graph = json_to_graph(&json!({"a": {"b": 1}}), &GraphOptions::default());
        assert_eq!(graph.get("root.a.b").unwrap().label, "b");
        assert!(graph.contains("root.a"));
        assert!(graph.get("root.c").is_none());
    }

    #[test]
    fn test_neighbors_of() {
        let graph = json_to_graph(&json!({"a": {"b": 1}, "c": 2}), &GraphOptions::default());
        assert_eq!(graph.neighbors_of("root"), vec!["root.a", "root.c"]);
        assert_eq!(graph.neighbors_of("root.a"), vec!["root", "root.a.b"]);
        assert_eq!(graph.neighbors_of("root.a.b"), vec!["root.a"]);
    }

    #[test]
    fn test_neighbor_index_covers_every_node() {
        let graph = JsonGraph::from_parts(
            vec![node("root"), node("root.a"), node("root.b")],
            vec![GraphLink::new("root", "root.a", LinkKind::Hierarchical)],
        );
        let index = graph.neighbor_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index["root"], vec!["root.a"]);
        assert_eq!(index["root.a"], vec!["root"]);
        assert!(index["root.b"].is_empty());
    }

    #[test]
    fn test_nodes_with_neighbors_serialize_flat() {
        let graph = json_to_graph(&json!({"a": 1}), &GraphOptions::default());
        let enriched = graph.nodes_with_neighbors();
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json[0]["id"], "root");
        assert_eq!(json[0]["neighbors"], json!(["root.a"]));
        assert_eq!(json[1]["neighbors"], json!(["root"]));
    }

    #[test]
    fn test_serializes_nodes_and_links_only() {
        let graph = json_to_graph(&json!({"a": 1}), &GraphOptions::default());
        let json = serde_json::to_value(&graph).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["nodes", "links"]);
        assert_eq!(
            json["links"],
            json!([{"source": "root", "target": "root.a", "kind": "hierarchical"}])
        );
    }

    #[test]
    fn test_deserialize_rebuilds_index() {
        let graph = json_to_graph(&json!({"a": [1, 2]}), &GraphOptions::default());
        let text = serde_json::to_string(&graph).unwrap();
        let restored: JsonGraph = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, graph);
        assert!(restored.get("root.a.1").is_some());
    }

    #[test]
    fn test_stats() {
        let options = GraphOptions::new().with_array_links(true);
        let graph = json_to_graph(&json!({"a": [1, 2, 3], "b": {"c": true}}), &options);
        let stats = graph.stats();

        assert_eq!(stats.node_count, 7);
        assert_eq!(stats.hierarchical_links, 6);
        assert_eq!(stats.sibling_links, 2);
        assert_eq!(stats.custom_links, 0);
        assert_eq!(stats.link_count, 8);
        assert_eq!(stats.orphan_count, 0);
        assert_eq!(stats.dangling_link_count, 0);
        assert_eq!(stats.component_count, 1);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_stats_max_depth_with_dotted_keys() {
        let graph = json_to_graph(&json!({"a.b.c.d": 1}), &GraphOptions::default());
        assert_eq!(graph.get("root.a.b.c.d").unwrap().depth, 1);
        assert_eq!(graph.stats().max_depth, 1);
    }

    #[test]
    fn test_stats_without_links() {
        let options = GraphOptions::new().with_hierarchical_links(false);
        let graph = json_to_graph(&json!({"a": 1, "b": 2}), &options);
        let stats = graph.stats();

        assert_eq!(stats.orphan_count, 3);
        assert_eq!(stats.component_count, 3);
    }

    #[test]
    fn test_dangling_links_counted_not_drawn() {
        let options = GraphOptions::new()
            .with_hierarchical_links(false)
            .with_array_links(true);
        let graph = json_to_graph(&json!([1, null, 3]), &options);

        assert_eq!(graph.dangling_links().count(), 2);
        assert_eq!(graph.to_petgraph().edge_count(), 0);
        assert_eq!(graph.stats().dangling_link_count, 2);
    }

    #[test]
    fn test_empty_graph_stats() {
        let stats = JsonGraph::new().stats();
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.max_depth, 0);
    }
}
