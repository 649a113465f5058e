//! SqliteMetadataProvider implementation.
//!
//! Reads table, column and foreign key metadata from a SQLite database file.
//! SQLite declares its constraints, so snapshots from this provider bypass
//! inference entirely.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use super::error::{MetadataError, MetadataResult};
use super::provider::MetadataProvider;
use super::types::{ColumnMetadata, ForeignKeyInfo, RelationshipSource};

/// File extensions accepted as SQLite databases.
pub const SQLITE_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

/// Check if a path has a SQLite database extension (case-insensitive).
pub fn is_sqlite_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SQLITE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// MetadataProvider backed by a SQLite database.
///
/// An empty schema name means `main`.
pub struct SqliteMetadataProvider {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteMetadataProvider {
    /// Open an existing database file read-only.
    pub fn open(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MetadataError::CatalogUnreachable(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            path: None,
        }
    }

    /// Path of the database file, if opened from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn connection(&self) -> MetadataResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MetadataError::CatalogUnreachable("connection lock poisoned".to_string()))
    }

    fn schema_name(schema: &str) -> &str {
        if schema.is_empty() {
            "main"
        } else {
            schema
        }
    }

    fn ensure_schema(conn: &Connection, schema: &str) -> MetadataResult<()> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pragma_database_list WHERE name = ?1)",
            params![schema],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(MetadataError::SchemaNotFound(schema.to_string()))
        }
    }

    fn ensure_table(conn: &Connection, schema: &str, table: &str) -> MetadataResult<()> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {}.sqlite_master WHERE type = 'table' AND name = ?1)",
            quote_identifier(schema)
        );
        let exists: bool = conn.query_row(&sql, params![table], |row| row.get(0))?;
        if exists {
            Ok(())
        } else {
            Err(MetadataError::table_not_found(schema, table))
        }
    }

    /// Catalog spelling of `table`. SQLite identifiers are case-insensitive,
    /// so a constraint may name its parent in a different case than the
    /// parent was created with. Unknown tables keep the given spelling.
    fn resolve_table_name(conn: &Connection, schema: &str, table: &str) -> MetadataResult<String> {
        let sql = format!(
            "SELECT name FROM {}.sqlite_master \
             WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            quote_identifier(schema)
        );
        let stored: Option<String> = conn
            .query_row(&sql, params![table], |row| row.get(0))
            .optional()?;
        Ok(stored.unwrap_or_else(|| table.to_string()))
    }

    fn primary_key_columns(
        conn: &Connection,
        schema: &str,
        table: &str,
    ) -> MetadataResult<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT name FROM pragma_table_info(?1, ?2) WHERE pk > 0 ORDER BY pk",
        )?;
        let columns = stmt
            .query_map(params![table, schema], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(columns)
    }
}

#[async_trait]
impl MetadataProvider for SqliteMetadataProvider {
    async fn list_tables(&self, schema: &str) -> MetadataResult<Vec<String>> {
        let schema = Self::schema_name(schema);
        let conn = self.connection()?;
        Self::ensure_schema(&conn, schema)?;

        let sql = format!(
            "SELECT name FROM {}.sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            quote_identifier(schema)
        );
        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(tables)
    }

    async fn list_columns(&self, schema: &str, table: &str) -> MetadataResult<Vec<ColumnMetadata>> {
        let schema = Self::schema_name(schema);
        let conn = self.connection()?;
        Self::ensure_schema(&conn, schema)?;
        Self::ensure_table(&conn, schema, table)?;

        let mut stmt = conn.prepare(
            "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1, ?2) ORDER BY cid",
        )?;
        let columns = stmt
            .query_map(params![table, schema], |row| {
                let name: String = row.get(0)?;
                let data_type: String = row.get(1)?;
                let not_null: i64 = row.get(2)?;
                let pk: i64 = row.get(3)?;
                Ok(ColumnMetadata {
                    name,
                    data_type: (!data_type.is_empty()).then_some(data_type),
                    nullable: Some(not_null == 0 && pk == 0),
                    is_primary_key: Some(pk > 0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn relationship_source(&self) -> RelationshipSource {
        RelationshipSource::Constraints
    }

    async fn list_foreign_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> MetadataResult<Vec<ForeignKeyInfo>> {
        let schema = Self::schema_name(schema);
        let conn = self.connection()?;
        Self::ensure_schema(&conn, schema)?;
        Self::ensure_table(&conn, schema, table)?;

        let mut stmt = conn.prepare(
            "SELECT id, \"table\", \"from\", \"to\" FROM pragma_foreign_key_list(?1, ?2) \
             ORDER BY id, seq",
        )?;
        let rows = stmt
            .query_map(params![table, schema], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // Multi-column constraints span several rows sharing an id
        let mut grouped: BTreeMap<i64, ForeignKeyInfo> = BTreeMap::new();
        for (id, referred_table, from, to) in rows {
            let fk = grouped.entry(id).or_insert_with(|| ForeignKeyInfo {
                constrained_columns: Vec::new(),
                referred_table,
                referred_columns: Vec::new(),
            });
            fk.constrained_columns.push(from);
            if let Some(to) = to {
                fk.referred_columns.push(to);
            }
        }

        let mut foreign_keys = Vec::with_capacity(grouped.len());
        for (_, mut fk) in grouped {
            fk.referred_table = Self::resolve_table_name(&conn, schema, &fk.referred_table)?;
            // `REFERENCES parent` without columns targets the parent's primary key
            if fk.referred_columns.is_empty() {
                fk.referred_columns = Self::primary_key_columns(&conn, schema, &fk.referred_table)?;
            }
            foreign_keys.push(fk);
        }

        Ok(foreign_keys)
    }
}

/// Quote an identifier for interpolation into SQL.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
