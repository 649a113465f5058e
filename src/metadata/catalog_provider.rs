//! InformationSchemaProvider implementation.
//!
//! Reads tables and columns from a warehouse's `information_schema` through a
//! pluggable [`CatalogClient`] transport. Warehouse catalogs of this kind do
//! not enforce foreign keys, so snapshots from this provider go through
//! relationship inference.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::{MetadataError, MetadataResult};
use super::provider::MetadataProvider;
use super::types::{ColumnMetadata, RelationshipSource};
use crate::config::{CatalogConfig, CatalogSettings};

/// What a catalog query asks for; lets transports and test doubles dispatch
/// without parsing SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQueryKind {
    /// One `schema_name` row when the schema exists.
    Schemata,
    /// `table_name` rows for a schema.
    Tables,
    /// `column_name, data_type, is_nullable` rows for one table.
    Columns,
}

/// A parameterised statement against the information schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub kind: CatalogQueryKind,
    /// Database the statement runs in.
    pub database: String,
    /// SQL text with positional `?` placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub binds: Vec<String>,
}

/// One result row; `None` is SQL NULL.
pub type CatalogRow = Vec<Option<String>>;

/// Transport executing catalog queries.
///
/// Implementations authenticate with the [`CatalogConfig`] handed to them on
/// every call and report connection problems as
/// [`MetadataError::CatalogUnreachable`]. They must not retry.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn query(
        &self,
        config: &CatalogConfig,
        query: &CatalogQuery,
    ) -> MetadataResult<Vec<CatalogRow>>;
}

/// MetadataProvider reading a warehouse information schema.
///
/// # Example
///
/// ```ignore
/// let config = CatalogConfig::new("xy12345", "analyst", secret, "COMPUTE_WH");
/// let provider = InformationSchemaProvider::new(config, "SALES_DB", Arc::new(client))?;
/// let snapshot = provider.snapshot("PUBLIC").await?;
/// ```
pub struct InformationSchemaProvider<C: CatalogClient> {
    config: CatalogConfig,
    database: String,
    client: Arc<C>,
}

impl<C: CatalogClient> InformationSchemaProvider<C> {
    /// Create a provider; the configuration is validated up front.
    pub fn new(
        config: CatalogConfig,
        database: impl Into<String>,
        client: Arc<C>,
    ) -> MetadataResult<Self> {
        config.validate()?;
        let database = database.into();
        if database.trim().is_empty() {
            return Err(MetadataError::InvalidConfig(
                "database name is required".to_string(),
            ));
        }
        Ok(Self {
            config,
            database,
            client,
        })
    }

    /// Create a provider from the `[catalog]` settings section, expanding
    /// environment variables in the connection fields.
    pub fn from_settings(settings: &CatalogSettings, client: Arc<C>) -> MetadataResult<Self> {
        let database = settings.database.as_deref().ok_or_else(|| {
            MetadataError::InvalidConfig("[catalog] database is required".to_string())
        })?;
        Self::new(settings.resolved_config()?, database, client)
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn schemata_query(&self, schema: &str) -> CatalogQuery {
        CatalogQuery {
            kind: CatalogQueryKind::Schemata,
            database: self.database.clone(),
            sql: "SELECT schema_name FROM information_schema.schemata WHERE schema_name = ?"
                .to_string(),
            binds: vec![schema.to_string()],
        }
    }

    fn tables_query(&self, schema: &str) -> CatalogQuery {
        CatalogQuery {
            kind: CatalogQueryKind::Tables,
            database: self.database.clone(),
            sql: "SELECT table_name FROM information_schema.tables \
                  WHERE table_schema = ? ORDER BY table_name"
                .to_string(),
            binds: vec![schema.to_string()],
        }
    }

    fn columns_query(&self, schema: &str, table: &str) -> CatalogQuery {
        CatalogQuery {
            kind: CatalogQueryKind::Columns,
            database: self.database.clone(),
            sql: "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
                  WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position"
                .to_string(),
            binds: vec![schema.to_string(), table.to_string()],
        }
    }
}

#[async_trait]
impl<C: CatalogClient> MetadataProvider for InformationSchemaProvider<C> {
    async fn list_tables(&self, schema: &str) -> MetadataResult<Vec<String>> {
        let rows = self
            .client
            .query(&self.config, &self.tables_query(schema))
            .await?;

        // No tables: distinguish an empty schema from a missing one
        if rows.is_empty() {
            let schemata = self
                .client
                .query(&self.config, &self.schemata_query(schema))
                .await?;
            if schemata.is_empty() {
                return Err(MetadataError::SchemaNotFound(schema.to_string()));
            }
            return Ok(Vec::new());
        }

        rows.into_iter()
            .map(|row| required(&row, 0, "table_name"))
            .collect()
    }

    async fn list_columns(&self, schema: &str, table: &str) -> MetadataResult<Vec<ColumnMetadata>> {
        let rows = self
            .client
            .query(&self.config, &self.columns_query(schema, table))
            .await?;

        if rows.is_empty() {
            return Err(MetadataError::table_not_found(schema, table));
        }

        rows.into_iter()
            .map(|row| {
                Ok(ColumnMetadata {
                    name: required(&row, 0, "column_name")?,
                    data_type: optional(&row, 1, "data_type")?,
                    nullable: optional(&row, 2, "is_nullable")?.map(|v| v == "YES"),
                    is_primary_key: None,
                })
            })
            .collect()
    }

    fn relationship_source(&self) -> RelationshipSource {
        RelationshipSource::Inferred
    }
}

fn optional(row: &CatalogRow, index: usize, field: &str) -> MetadataResult<Option<String>> {
    row.get(index).cloned().ok_or_else(|| {
        MetadataError::MalformedRow(format!(
            "expected {field} at position {index}, row has {} values",
            row.len()
        ))
    })
}

fn required(row: &CatalogRow, index: usize, field: &str) -> MetadataResult<String> {
    optional(row, index, field)?
        .ok_or_else(|| MetadataError::MalformedRow(format!("{field} is NULL")))
}
