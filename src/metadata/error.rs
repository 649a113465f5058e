//! Metadata provider errors.

use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while fetching catalog metadata.
///
/// Providers do not retry; a failed query is reported as-is.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The catalog could not be reached or refused the session.
    #[error("catalog unreachable: {0}")]
    CatalogUnreachable(String),

    /// The requested schema does not exist.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The requested table does not exist.
    #[error("table not found: {schema}.{table}")]
    TableNotFound { schema: String, table: String },

    /// A catalog row did not have the expected shape.
    #[error("malformed catalog row: {0}")]
    MalformedRow(String),

    /// The catalog configuration is incomplete.
    #[error("invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to read a metadata file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a metadata file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MetadataError {
    pub fn table_not_found(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self::TableNotFound {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Check if the error indicates the catalog itself was unavailable.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::CatalogUnreachable(_) | Self::Io(_))
    }
}

impl From<crate::config::SettingsError> for MetadataError {
    fn from(err: crate::config::SettingsError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

impl From<crate::config::ConnectionError> for MetadataError {
    fn from(err: crate::config::ConnectionError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
