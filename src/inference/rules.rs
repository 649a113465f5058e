//! Heuristic rules for relationship discovery.
//!
//! Each rule looks at a single column name and, when its naming pattern
//! applies, proposes the name of the table the column refers to. Rules are
//! evaluated in order and the first one whose pattern applies claims the
//! column, even if its proposal does not resolve to a known table.

use std::collections::HashSet;

/// Inputs shared by every rule for one inference run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Every table name in the snapshot.
    pub tables: &'a HashSet<String>,
    /// Key markers in precedence order (e.g. `_ID`, `_num`, `_number`).
    pub key_markers: &'a [String],
}

/// Signature of a rule's candidate function.
pub type CandidateFn = fn(&str, &RuleContext<'_>) -> Option<String>;

/// A named heuristic that maps a column name to a candidate table name.
#[derive(Clone, Copy)]
pub struct HeuristicRule {
    /// Rule identifier
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    candidate: CandidateFn,
}

impl HeuristicRule {
    /// Build a rule from a candidate function.
    pub const fn new(name: &'static str, description: &'static str, candidate: CandidateFn) -> Self {
        Self {
            name,
            description,
            candidate,
        }
    }

    /// Propose a referenced table name for `column`.
    ///
    /// `None` means the rule's pattern does not apply and the next rule
    /// should be tried.
    pub fn candidate(&self, column: &str, ctx: &RuleContext<'_>) -> Option<String> {
        (self.candidate)(column, ctx)
    }
}

impl std::fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// `CUSTOMER_ID` -> `CUSTOMER`: strip the first key marker the column ends with.
pub fn suffix_strip(column: &str, ctx: &RuleContext<'_>) -> Option<String> {
    ctx.key_markers
        .iter()
        .find_map(|marker| column.strip_suffix(marker.as_str()))
        .map(str::to_string)
}

/// `CUSTOMER_ID_2` -> `CUSTOMER`: split at the first occurrence of the
/// first key marker (in precedence order) the column contains.
pub fn substring_split(column: &str, ctx: &RuleContext<'_>) -> Option<String> {
    let marker = ctx
        .key_markers
        .iter()
        .find(|marker| column.contains(marker.as_str()))?;
    column
        .split_once(marker.as_str())
        .map(|(prefix, _)| prefix.to_string())
}

/// A column named exactly like a table refers to that table.
pub fn exact_name(column: &str, ctx: &RuleContext<'_>) -> Option<String> {
    ctx.tables.contains(column).then(|| column.to_string())
}

/// Suffix-strip rule.
pub const SUFFIX_STRIP: HeuristicRule = HeuristicRule::new(
    "suffix_strip",
    "Column ends with a key marker; strip it (e.g., CUSTOMER_ID -> CUSTOMER)",
    suffix_strip,
);

/// Substring-split rule.
pub const SUBSTRING_SPLIT: HeuristicRule = HeuristicRule::new(
    "substring_split",
    "Column embeds a key marker; keep the prefix (e.g., CUSTOMER_ID_2 -> CUSTOMER)",
    substring_split,
);

/// Exact-name rule.
pub const EXACT_NAME: HeuristicRule = HeuristicRule::new(
    "exact_name",
    "Column is named exactly like a table (e.g., REGION -> REGION)",
    exact_name,
);

/// Returns the default set of rules, ordered by priority.
pub fn default_rules() -> Vec<HeuristicRule> {
    vec![SUFFIX_STRIP, SUBSTRING_SPLIT, EXACT_NAME]
}

/// Look up a built-in rule by its name.
pub fn rule_by_name(name: &str) -> Option<HeuristicRule> {
    [SUFFIX_STRIP, SUBSTRING_SPLIT, EXACT_NAME]
        .into_iter()
        .find(|rule| rule.name == name)
}

/// Resolve a candidate name against the table set.
///
/// The candidate itself wins; otherwise its dimension variant
/// (`candidate + dimension_suffix`) is tried.
pub fn resolve_reference(
    candidate: &str,
    tables: &HashSet<String>,
    dimension_suffix: &str,
) -> Option<String> {
    if tables.contains(candidate) {
        return Some(candidate.to_string());
    }
    let dimension = format!("{candidate}{dimension_suffix}");
    tables.contains(&dimension).then_some(dimension)
}
