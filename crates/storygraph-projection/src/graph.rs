//! Graph output types and the deduplicating builder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use storygraph_model::{EntityKind, RawId};

/// Namespaced node id: injective over (kind, raw_id).
///
/// Raw ids are only unique within one entity table; prefixing with the kind
/// tag keeps a Person and an Event with the same raw id apart. The string
/// form is chosen over a packed integer for debuggability.
pub fn node_id(kind: EntityKind, raw_id: RawId) -> String {
    format!("{}:{}", kind.tag(), raw_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    pub kind: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub label: String,
    pub directed: bool,
}

/// Final projection output. Created fresh per call and handed to the
/// renderer; never cached between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Accumulates nodes and edges during one projection pass.
///
/// `add_node` is idempotent under the node id, first-write-wins: the first
/// insertion fixes the node's attributes for the rest of the run. Insertion
/// order is preserved, so output is deterministic for a given input order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    seen: HashSet<String>,
    edges: Vec<GraphEdge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the node was actually inserted.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.seen.contains(&node.id) {
            return false;
        }
        self.seen.insert(node.id.clone());
        self.nodes.push(node);
        true
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Record an edge. Both endpoints must already be nodes; callers enforce
    /// this so no dangling edge ever reaches the output.
    pub fn add_edge(&mut self, source: String, target: String, label: String, directed: bool) {
        debug_assert!(self.has_node(&source) && self.has_node(&target));
        self.edges.push(GraphEdge {
            source,
            target,
            label,
            directed,
        });
    }

    pub fn finish(self) -> Graph {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, label: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: label.to_string(),
            tooltip: label.to_string(),
            kind: EntityKind::Person,
            link: None,
        }
    }

    #[test]
    fn node_ids_never_collide_across_kinds() {
        assert_ne!(
            node_id(EntityKind::Person, 5),
            node_id(EntityKind::Event, 5)
        );
        assert_eq!(node_id(EntityKind::Era, 12), "era:12");
    }

    #[test]
    fn add_node_is_first_write_wins() {
        let mut b = GraphBuilder::new();
        assert!(b.add_node(node("person:1", "first")));
        assert!(!b.add_node(node("person:1", "second")));
        let g = b.finish();
        assert_eq!(g.nodes.len(), 1);
        assert_eq!(g.nodes[0].label, "first");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut b = GraphBuilder::new();
        b.add_node(node("person:2", "b"));
        b.add_node(node("person:1", "a"));
        let g = b.finish();
        assert_eq!(g.nodes[0].id, "person:2");
        assert_eq!(g.nodes[1].id, "person:1");
    }
}
