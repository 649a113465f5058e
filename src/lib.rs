//! # schemagraph
//!
//! Draws the tables of a relational schema and the key relationships between
//! them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Metadata Provider                       │
//! │     (SQLite catalog, information_schema, JSON file)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [snapshot]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Declared foreign keys  │  Inference (naming rules)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [graph builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │               SchemaGraph (tables + edges)               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [renderer]
//! ┌─────────────────────────────────────────────────────────┐
//! │              DOT / PNG / SVG / PDF artifact              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalogs that declare foreign keys are graphed as declared. Catalogs
//! without constraints go through the [`inference`] engine, which guesses
//! edges from column names such as `CUSTOMER_ID`.

pub mod config;
pub mod error;
pub mod graph;
pub mod inference;
pub mod logging;
pub mod metadata;
pub mod render;
pub mod visualize;

pub use error::{Error, Result};
pub use graph::{GraphOptions, SchemaGraph};
pub use inference::{infer_relationships, InferenceConfig, InferenceEngine, RelationshipEdge};
pub use render::{GraphvizRenderer, OutputFormat, RenderedArtifact, Renderer};
pub use visualize::{artifact_name, Visualizer};
