//! Graph construction from schema snapshots.
//!
//! Construction happens in two phases:
//! - Phase 1: one node per table, in catalog order
//! - Phase 2: edges, either from declared foreign keys or from inference
//!   (never both)

use std::collections::HashMap;

use crate::inference::{InferenceEngine, RelationshipEdge};
use crate::metadata::{ForeignKeyInfo, SchemaSnapshot, TableMetadata};

use super::{RelationshipLink, SchemaGraph, TableNode};

/// Options controlling graph assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Attach column summaries to table nodes.
    pub show_columns: bool,
}

impl GraphOptions {
    pub fn with_columns() -> Self {
        Self { show_columns: true }
    }
}

impl SchemaGraph {
    /// Build the graph for a snapshot.
    ///
    /// Snapshots carrying foreign keys produce exactly the declared edges;
    /// otherwise edges come from `engine`.
    pub fn from_snapshot(
        snapshot: &SchemaSnapshot,
        engine: &InferenceEngine,
        options: GraphOptions,
    ) -> Self {
        let mut graph = Self::from_tables(&snapshot.tables, engine, options);

        match &snapshot.foreign_keys {
            Some(foreign_keys) => {
                graph.add_foreign_key_edges(&snapshot.tables, foreign_keys);
            }
            None => {
                let edges = engine
                    .infer_relationships(&snapshot.table_names(), &snapshot.columns_by_table());
                graph.add_inferred_edges(&edges);
            }
        }

        tracing::debug!(
            schema = %snapshot.schema,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "assembled schema graph"
        );

        graph
    }

    /// Phase 1: a graph with one node per table and no edges.
    pub fn from_tables(
        tables: &[TableMetadata],
        engine: &InferenceEngine,
        options: GraphOptions,
    ) -> Self {
        let mut graph = Self::new();
        for table in tables {
            let mut node = TableNode::new(&table.name, engine.table_kind(&table.name));
            if options.show_columns {
                node = node.with_columns(table.columns.clone());
            }
            graph.add_table(node);
        }
        graph
    }

    /// Add declared foreign keys, walking tables in catalog order.
    ///
    /// Returns the number of edges added.
    pub fn add_foreign_key_edges(
        &mut self,
        tables: &[TableMetadata],
        foreign_keys: &HashMap<String, Vec<ForeignKeyInfo>>,
    ) -> usize {
        let mut added = 0;
        for table in tables {
            for fk in foreign_keys.get(&table.name).into_iter().flatten() {
                let link = RelationshipLink::from_foreign_key(fk);
                if self.add_relationship(&table.name, &fk.referred_table, link) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Add inferred edges in discovery order.
    ///
    /// Returns the number of edges added.
    pub fn add_inferred_edges(&mut self, edges: &[RelationshipEdge]) -> usize {
        let mut added = 0;
        for edge in edges {
            let link = RelationshipLink::inferred(edge.column.clone(), edge.rule);
            if self.add_relationship(&edge.source_table, &edge.target_table, link) {
                added += 1;
            }
        }
        added
    }
}
