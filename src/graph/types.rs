//! Node and edge types for the schema graph.

use serde::Serialize;

use crate::inference::TableKind;
use crate::metadata::{ColumnMetadata, ForeignKeyInfo};

/// Table node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    /// Table name (also the node id)
    pub name: String,
    /// Naming-convention classification
    pub kind: TableKind,
    /// Columns to summarise in the label; `None` renders the name only
    pub columns: Option<Vec<ColumnMetadata>>,
}

impl TableNode {
    pub fn new(name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            columns: None,
        }
    }

    pub fn with_columns(mut self, columns: Vec<ColumnMetadata>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Display label: the table name, followed by a blank line and one
    /// summary line per column when columns are attached.
    pub fn label(&self) -> String {
        match &self.columns {
            Some(columns) if !columns.is_empty() => {
                let summary: Vec<String> = columns.iter().map(column_summary).collect();
                format!("{}\n\n{}", self.name, summary.join("\n"))
            }
            _ => self.name.clone(),
        }
    }
}

/// One label line for a column: `name: TYPE (PK) (nullable)`.
pub fn column_summary(column: &ColumnMetadata) -> String {
    let mut line = column.name.clone();
    if let Some(data_type) = &column.data_type {
        line.push_str(": ");
        line.push_str(data_type);
    }
    if column.is_primary_key == Some(true) {
        line.push_str(" (PK)");
    }
    if column.nullable == Some(true) {
        line.push_str(" (nullable)");
    }
    line
}

/// How an edge came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EdgeOrigin {
    /// Declared foreign key constraint
    Constraint,
    /// Naming-convention inference
    Inferred { rule: &'static str },
}

impl EdgeOrigin {
    pub fn is_inferred(&self) -> bool {
        matches!(self, Self::Inferred { .. })
    }
}

/// Relationship edge between two table nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipLink {
    pub label: String,
    pub origin: EdgeOrigin,
}

impl RelationshipLink {
    /// Edge for a declared foreign key, labelled `from cols → to cols`.
    pub fn from_foreign_key(fk: &ForeignKeyInfo) -> Self {
        Self {
            label: format!(
                "{} → {}",
                fk.constrained_columns.join(", "),
                fk.referred_columns.join(", ")
            ),
            origin: EdgeOrigin::Constraint,
        }
    }

    /// Edge for an inferred relationship, labelled with the column.
    pub fn inferred(column: impl Into<String>, rule: &'static str) -> Self {
        Self {
            label: column.into(),
            origin: EdgeOrigin::Inferred { rule },
        }
    }
}

/// Renderer-facing view of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub kind: TableKind,
}

/// Renderer-facing view of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub label: String,
    pub origin: EdgeOrigin,
}
