//! Metadata provider module.
//!
//! This module provides abstractions for fetching schema metadata from a
//! catalog. Providers only report what the catalog holds; relationship
//! inference happens locally.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MetadataProvider                           │
//! │  - list_tables()            - relationship_source()             │
//! │  - list_columns()           - list_foreign_keys()               │
//! │                                                                 │
//! │  MetadataProviderExt::snapshot() ──► SchemaSnapshot             │
//! └─────────────────────────────────────────────────────────────────┘
//!          │                     │                        │
//!          ▼                     ▼                        ▼
//!   SqliteMetadataProvider  InformationSchemaProvider  StaticMetadataProvider
//!   (declared FKs)          (CatalogClient transport)  (JSON snapshot)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use schemagraph::metadata::{MetadataProviderExt, SqliteMetadataProvider};
//!
//! let provider = SqliteMetadataProvider::open("./shop.db")?;
//! let snapshot = provider.snapshot("main").await?;
//! ```

mod catalog_provider;
mod error;
mod provider;
mod sqlite_provider;
mod static_provider;
mod types;

pub use catalog_provider::{
    CatalogClient, CatalogQuery, CatalogQueryKind, CatalogRow, InformationSchemaProvider,
};
pub use error::{MetadataError, MetadataResult};
pub use provider::{MetadataProvider, MetadataProviderExt};
pub use sqlite_provider::{is_sqlite_path, SqliteMetadataProvider, SQLITE_EXTENSIONS};
pub use static_provider::StaticMetadataProvider;
pub use types::*;
