//! Relationship inference engine.
//!
//! The engine walks every table's columns in order and runs the configured
//! rule chain against each one. It never fails: a column no rule can resolve
//! simply contributes no edge.

use std::collections::{HashMap, HashSet};

use super::rules::{default_rules, resolve_reference, HeuristicRule, RuleContext};
use super::RelationshipEdge;

/// Naming-convention classification of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Lookup table (name ends with the dimension suffix).
    Dimension,
    /// Transactional table (name ends with the fact suffix).
    Fact,
    /// Anything else.
    #[default]
    Other,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dimension => write!(f, "dimension"),
            Self::Fact => write!(f, "fact"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Dimension and fact tables found in a schema, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableClassification {
    pub dimensions: Vec<String>,
    pub facts: Vec<String>,
}

/// Configuration for the inference engine.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Rules in priority order; the first whose pattern applies claims a column.
    pub rules: Vec<HeuristicRule>,
    /// Key markers in precedence order.
    pub key_markers: Vec<String>,
    /// Suffix of dimension tables; also used as the resolution fallback.
    pub dimension_suffix: String,
    /// Suffix of fact tables.
    pub fact_suffix: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            key_markers: vec!["_ID".to_string(), "_num".to_string(), "_number".to_string()],
            dimension_suffix: "_dim".to_string(),
            fact_suffix: "_fact".to_string(),
        }
    }
}

impl InferenceConfig {
    /// Builder: replace the rule chain.
    pub fn with_rules(mut self, rules: Vec<HeuristicRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Builder: replace the key markers.
    pub fn with_key_markers(mut self, markers: Vec<String>) -> Self {
        self.key_markers = markers;
        self
    }

    /// Builder: set the dimension suffix.
    pub fn with_dimension_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dimension_suffix = suffix.into();
        self
    }
}

/// Heuristic relationship inference over table and column names.
#[derive(Debug, Clone, Default)]
pub struct InferenceEngine {
    config: InferenceConfig,
}

impl InferenceEngine {
    /// Create an engine with the default rule chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Classify a single table by its name.
    pub fn table_kind(&self, table: &str) -> TableKind {
        if !self.config.dimension_suffix.is_empty()
            && table.ends_with(self.config.dimension_suffix.as_str())
        {
            TableKind::Dimension
        } else if !self.config.fact_suffix.is_empty()
            && table.ends_with(self.config.fact_suffix.as_str())
        {
            TableKind::Fact
        } else {
            TableKind::Other
        }
    }

    /// Split tables into dimension and fact lists.
    ///
    /// Resolution does not consult this; it is exposed for annotation.
    pub fn classify<S: AsRef<str>>(&self, tables: &[S]) -> TableClassification {
        let mut classification = TableClassification::default();
        for table in tables {
            let table = table.as_ref();
            match self.table_kind(table) {
                TableKind::Dimension => classification.dimensions.push(table.to_string()),
                TableKind::Fact => classification.facts.push(table.to_string()),
                TableKind::Other => {}
            }
        }
        classification
    }

    /// Run the rule chain for one column.
    ///
    /// Returns the resolved target table and the name of the rule that
    /// claimed the column.
    pub fn infer_column(
        &self,
        column: &str,
        table_set: &HashSet<String>,
    ) -> Option<(String, &'static str)> {
        let ctx = RuleContext {
            tables: table_set,
            key_markers: &self.config.key_markers,
        };

        let (rule, candidate) = self
            .config
            .rules
            .iter()
            .find_map(|rule| rule.candidate(column, &ctx).map(|c| (rule, c)))?;

        match resolve_reference(&candidate, table_set, &self.config.dimension_suffix) {
            Some(target) => Some((target, rule.name)),
            None => {
                tracing::trace!(
                    column,
                    rule = rule.name,
                    candidate = %candidate,
                    "candidate does not name a table"
                );
                None
            }
        }
    }

    /// Infer relationship edges for a schema.
    ///
    /// Tables are visited in the given order and each table's columns in
    /// mapping order. Columns mapped to a table absent from `tables` are
    /// ignored. Duplicate edges are kept.
    pub fn infer_relationships<S: AsRef<str>>(
        &self,
        tables: &[S],
        columns_by_table: &HashMap<String, Vec<String>>,
    ) -> Vec<RelationshipEdge> {
        let table_set: HashSet<String> = tables.iter().map(|t| t.as_ref().to_string()).collect();
        let mut edges = Vec::new();

        for table in tables {
            let table = table.as_ref();
            let Some(columns) = columns_by_table.get(table) else {
                continue;
            };

            for column in columns {
                if let Some((target, rule)) = self.infer_column(column, &table_set) {
                    tracing::debug!(
                        source = table,
                        target = %target,
                        column = %column,
                        rule,
                        "inferred relationship"
                    );
                    edges.push(RelationshipEdge {
                        source_table: table.to_string(),
                        target_table: target,
                        column: column.clone(),
                        rule,
                    });
                }
            }
        }

        edges
    }
}
