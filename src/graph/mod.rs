//! Schema graph - tables as nodes, key relationships as edges.
//!
//! The graph is a transient value built for one schema snapshot and handed
//! to a renderer. It knows nothing about layout, colour or file formats;
//! renderers consume it through [`SchemaGraph::nodes`] and
//! [`SchemaGraph::edges`].

mod builder;
pub mod types;

pub use builder::GraphOptions;
pub use types::*;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Directed graph of tables and their relationships.
///
/// Invariant: every edge connects two nodes of this graph. Edges naming an
/// unknown table are dropped on insertion.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    /// The underlying directed graph
    graph: DiGraph<TableNode, RelationshipLink>,

    /// Index: table name → NodeIndex
    node_index: HashMap<String, NodeIndex>,
}

impl SchemaGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table node.
    ///
    /// A table name already present keeps its first node.
    pub fn add_table(&mut self, node: TableNode) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&node.name) {
            tracing::warn!(table = %node.name, "duplicate table name; keeping first node");
            return idx;
        }
        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(name, idx);
        idx
    }

    /// Add an edge between two existing tables.
    ///
    /// Returns `false` (and logs a warning) when either endpoint is missing.
    pub fn add_relationship(&mut self, source: &str, target: &str, link: RelationshipLink) -> bool {
        let (Some(&from), Some(&to)) = (self.node_index.get(source), self.node_index.get(target))
        else {
            tracing::warn!(
                source,
                target,
                label = %link.label,
                "dropping edge with unknown endpoint"
            );
            return false;
        };
        self.graph.add_edge(from, to, link);
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Get a table node by name.
    pub fn table(&self, name: &str) -> Option<&TableNode> {
        self.node_index.get(name).map(|&idx| &self.graph[idx])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> Vec<NodeView> {
        self.graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                NodeView {
                    id: node.name.clone(),
                    label: node.label(),
                    kind: node.kind,
                }
            })
            .collect()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> Vec<EdgeView> {
        self.graph
            .edge_references()
            .map(|edge| EdgeView {
                source: self.graph[edge.source()].name.clone(),
                target: self.graph[edge.target()].name.clone(),
                label: edge.weight().label.clone(),
                origin: edge.weight().origin,
            })
            .collect()
    }

    /// Names of tables referenced by `table`, in edge order (duplicates kept).
    pub fn referenced_tables(&self, table: &str) -> Vec<&str> {
        let Some(&idx) = self.node_index.get(table) else {
            return Vec::new();
        };
        let mut targets: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), self.graph[edge.target()].name.as_str()))
            .collect();
        // petgraph walks adjacency lists newest-first
        targets.sort_by_key(|(id, _)| *id);
        targets.into_iter().map(|(_, name)| name).collect()
    }
}
