//! Metadata value types shared by all providers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Column information as reported by a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Database-specific type name.
    #[serde(default)]
    pub data_type: Option<String>,
    /// Whether NULL values are allowed.
    #[serde(default)]
    pub nullable: Option<bool>,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub is_primary_key: Option<bool>,
}

impl ColumnMetadata {
    /// Column with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            nullable: None,
            is_primary_key: None,
        }
    }

    /// Builder: set the data type.
    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Builder: set nullability.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Builder: mark as primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = Some(true);
        self
    }
}

/// Foreign key declared on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyInfo {
    /// Columns on the owning table (ordered).
    pub constrained_columns: Vec<String>,
    /// Name of the referenced table.
    pub referred_table: String,
    /// Columns in the referenced table (ordered).
    #[serde(default)]
    pub referred_columns: Vec<String>,
}

/// A table and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name.
    pub name: String,
    /// Columns in catalog order.
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Column names in catalog order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Where the relationships of a snapshot come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipSource {
    /// Declared foreign key constraints.
    Constraints,
    /// Naming-convention inference.
    Inferred,
}

impl std::fmt::Display for RelationshipSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraints => write!(f, "constraints"),
            Self::Inferred => write!(f, "inferred"),
        }
    }
}

/// Everything a provider returned for one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Schema name.
    pub schema: String,
    /// Tables in catalog order.
    pub tables: Vec<TableMetadata>,
    /// Declared foreign keys keyed by owning table; `None` when the catalog
    /// carries no constraints and relationships must be inferred.
    #[serde(default)]
    pub foreign_keys: Option<HashMap<String, Vec<ForeignKeyInfo>>>,
}

impl SchemaSnapshot {
    /// Table names in catalog order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    /// Mapping of table name to ordered column names.
    pub fn columns_by_table(&self) -> HashMap<String, Vec<String>> {
        self.tables
            .iter()
            .map(|t| (t.name.clone(), t.column_names()))
            .collect()
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn relationship_source(&self) -> RelationshipSource {
        if self.foreign_keys.is_some() {
            RelationshipSource::Constraints
        } else {
            RelationshipSource::Inferred
        }
    }
}
