//! StaticMetadataProvider implementation.
//!
//! Serves metadata from an in-memory [`SchemaSnapshot`], typically loaded
//! from a JSON export. Useful for headless runs and tests.

use std::path::Path;

use async_trait::async_trait;

use super::error::{MetadataError, MetadataResult};
use super::provider::MetadataProvider;
use super::types::{ColumnMetadata, ForeignKeyInfo, RelationshipSource, SchemaSnapshot};

/// MetadataProvider over a fixed snapshot.
///
/// Declares constraints only when the snapshot carries foreign keys.
#[derive(Debug, Clone)]
pub struct StaticMetadataProvider {
    snapshot: SchemaSnapshot,
}

impl StaticMetadataProvider {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file.
    ///
    /// ```json
    /// {
    ///   "schema": "PUBLIC",
    ///   "tables": [
    ///     {"name": "SALES", "columns": [{"name": "CUSTOMER_ID", "data_type": "NUMBER"}]},
    ///     {"name": "CUSTOMER_dim", "columns": [{"name": "ID", "is_primary_key": true}]}
    ///   ]
    /// }
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> MetadataResult<Self> {
        let snapshot: SchemaSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    pub fn as_snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    fn check_schema(&self, schema: &str) -> MetadataResult<()> {
        if schema.is_empty() || schema == self.snapshot.schema {
            Ok(())
        } else {
            Err(MetadataError::SchemaNotFound(schema.to_string()))
        }
    }
}

#[async_trait]
impl MetadataProvider for StaticMetadataProvider {
    async fn list_tables(&self, schema: &str) -> MetadataResult<Vec<String>> {
        self.check_schema(schema)?;
        Ok(self.snapshot.table_names())
    }

    async fn list_columns(&self, schema: &str, table: &str) -> MetadataResult<Vec<ColumnMetadata>> {
        self.check_schema(schema)?;
        self.snapshot
            .table(table)
            .map(|t| t.columns.clone())
            .ok_or_else(|| MetadataError::table_not_found(schema, table))
    }

    fn relationship_source(&self) -> RelationshipSource {
        self.snapshot.relationship_source()
    }

    async fn list_foreign_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> MetadataResult<Vec<ForeignKeyInfo>> {
        self.check_schema(schema)?;
        if self.snapshot.table(table).is_none() {
            return Err(MetadataError::table_not_found(schema, table));
        }
        Ok(self
            .snapshot
            .foreign_keys
            .as_ref()
            .and_then(|fks| fks.get(table))
            .cloned()
            .unwrap_or_default())
    }
}
