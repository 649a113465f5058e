//! MetadataProvider trait definition.
//!
//! The MetadataProvider trait abstracts over the catalogs a schema graph can
//! be built from. Implementations only fetch raw metadata; relationship
//! inference happens locally in the [`inference`](crate::inference) module.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;

use super::error::MetadataResult;
use super::types::{ColumnMetadata, ForeignKeyInfo, RelationshipSource, SchemaSnapshot, TableMetadata};

/// Trait for fetching catalog metadata.
///
/// # Example
///
/// ```ignore
/// use schemagraph::metadata::{MetadataProvider, MetadataProviderExt};
///
/// async fn example(provider: &impl MetadataProvider) -> MetadataResult<()> {
///     let tables = provider.list_tables("main").await?;
///     let columns = provider.list_columns("main", &tables[0]).await?;
///
///     // Or everything at once
///     let snapshot = provider.snapshot("main").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// List all table names in a schema, in catalog order.
    async fn list_tables(&self, schema: &str) -> MetadataResult<Vec<String>>;

    /// List the columns of a table, in catalog order.
    async fn list_columns(&self, schema: &str, table: &str) -> MetadataResult<Vec<ColumnMetadata>>;

    /// Whether this catalog declares foreign keys.
    ///
    /// Providers returning [`RelationshipSource::Constraints`] must implement
    /// [`list_foreign_keys`](Self::list_foreign_keys); inference is bypassed
    /// for them.
    fn relationship_source(&self) -> RelationshipSource {
        RelationshipSource::Inferred
    }

    /// Get declared foreign keys for a table.
    async fn list_foreign_keys(
        &self,
        _schema: &str,
        _table: &str,
    ) -> MetadataResult<Vec<ForeignKeyInfo>> {
        Ok(Vec::new())
    }

    /// Get a table with its columns.
    async fn get_table(&self, schema: &str, table: &str) -> MetadataResult<TableMetadata> {
        let columns = self.list_columns(schema, table).await?;
        Ok(TableMetadata::new(table, columns))
    }

    /// Batch fetch multiple tables.
    ///
    /// Default implementation fetches tables concurrently using `join_all`
    /// and preserves input order.
    async fn get_tables_batch(
        &self,
        schema: &str,
        tables: &[String],
    ) -> MetadataResult<Vec<TableMetadata>> {
        let futures: Vec<_> = tables
            .iter()
            .map(|table| self.get_table(schema, table))
            .collect();

        // Collect results, failing if any failed
        join_all(futures).await.into_iter().collect()
    }
}

/// Extension trait for MetadataProvider with snapshot assembly.
#[async_trait]
pub trait MetadataProviderExt: MetadataProvider {
    /// Fetch tables, columns and (when declared) foreign keys for a schema.
    async fn snapshot(&self, schema: &str) -> MetadataResult<SchemaSnapshot> {
        let names = self.list_tables(schema).await?;
        let tables = self.get_tables_batch(schema, &names).await?;

        let foreign_keys = match self.relationship_source() {
            RelationshipSource::Inferred => None,
            RelationshipSource::Constraints => {
                let futures: Vec<_> = names
                    .iter()
                    .map(|table| self.list_foreign_keys(schema, table))
                    .collect();

                let mut by_table = HashMap::with_capacity(names.len());
                for (name, result) in names.iter().zip(join_all(futures).await) {
                    by_table.insert(name.clone(), result?);
                }
                Some(by_table)
            }
        };

        let snapshot = SchemaSnapshot {
            schema: schema.to_string(),
            tables,
            foreign_keys,
        };

        tracing::info!(
            schema,
            tables = snapshot.tables.len(),
            source = %snapshot.relationship_source(),
            "fetched schema snapshot"
        );

        Ok(snapshot)
    }
}

// Blanket implementation for all MetadataProvider implementations
impl<T: MetadataProvider + ?Sized> MetadataProviderExt for T {}
