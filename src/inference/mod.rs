//! Relationship inference from naming conventions.
//!
//! Catalogs without declared foreign keys still tend to follow naming
//! conventions: a `CUSTOMER_ID` column on `SALES` usually points at a
//! `CUSTOMER` (or `CUSTOMER_dim`) table. This module turns table and column
//! names into a best-guess list of directed edges.
//!
//! # Rule chain
//!
//! ```text
//! column ──► suffix_strip ──► substring_split ──► exact_name
//!                │                  │                  │
//!                └──────── first rule whose pattern applies ────────┐
//!                                                                   ▼
//!                                        candidate ∈ tables ?  candidate_dim ∈ tables ?
//! ```
//!
//! Only one rule contributes per column. The output keeps discovery order and
//! duplicates; every target is guaranteed to be a member of the input tables.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use schemagraph::inference::InferenceEngine;
//!
//! let tables = vec!["SALES".to_string(), "CUSTOMER_dim".to_string()];
//! let mut columns = HashMap::new();
//! columns.insert("SALES".to_string(), vec!["CUSTOMER_ID".to_string()]);
//!
//! let edges = InferenceEngine::new().infer_relationships(&tables, &columns);
//! assert_eq!(edges[0].target_table, "CUSTOMER_dim");
//! ```

mod engine;
mod rules;

use std::collections::HashMap;

use serde::Serialize;

pub use engine::{InferenceConfig, InferenceEngine, TableClassification, TableKind};
pub use rules::{
    default_rules, exact_name, resolve_reference, rule_by_name, substring_split, suffix_strip,
    CandidateFn, HeuristicRule, RuleContext, EXACT_NAME, SUBSTRING_SPLIT, SUFFIX_STRIP,
};

/// A directed relationship guessed from a column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipEdge {
    /// Table owning the column
    pub source_table: String,
    /// Referenced table (always a member of the input table set)
    pub target_table: String,
    /// The column that triggered the match
    pub column: String,
    /// The rule that claimed the column
    pub rule: &'static str,
}

/// Infer relationships with the default engine configuration.
pub fn infer_relationships<S: AsRef<str>>(
    tables: &[S],
    columns_by_table: &HashMap<String, Vec<String>>,
) -> Vec<RelationshipEdge> {
    InferenceEngine::new().infer_relationships(tables, columns_by_table)
}
