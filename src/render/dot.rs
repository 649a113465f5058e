//! Graphviz DOT output.

use std::fmt::Write;

use crate::graph::{EdgeOrigin, SchemaGraph};

/// Visual attributes applied when writing DOT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotStyle {
    pub rankdir: String,
    pub splines: String,
    pub node_shape: String,
    pub node_fill: String,
    pub edge_font_size: u32,
    /// Colour of declared foreign key edges.
    pub constraint_color: String,
    /// Colour of inferred edges.
    pub inferred_color: String,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            rankdir: "LR".to_string(),
            splines: "ortho".to_string(),
            node_shape: "rectangle".to_string(),
            node_fill: "lightgrey".to_string(),
            edge_font_size: 10,
            constraint_color: "#0000FF".to_string(),
            inferred_color: "#666666".to_string(),
        }
    }
}

/// Write `graph` as a DOT digraph named `name`.
pub fn to_dot(graph: &SchemaGraph, name: &str, style: &DotStyle) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "// {} schema", name);
    let _ = writeln!(out, "digraph {} {{", quote(name));
    let _ = writeln!(
        out,
        "    graph [rankdir={} splines={}]",
        quote(&style.rankdir),
        quote(&style.splines)
    );
    let _ = writeln!(
        out,
        "    node [shape={} style=filled fillcolor={}]",
        quote(&style.node_shape),
        quote(&style.node_fill)
    );

    for node in graph.nodes() {
        let _ = writeln!(out, "    {} [label={}]", quote(&node.id), quote(&node.label));
    }

    for edge in graph.edges() {
        let color = match edge.origin {
            EdgeOrigin::Constraint => &style.constraint_color,
            EdgeOrigin::Inferred { .. } => &style.inferred_color,
        };
        let _ = writeln!(
            out,
            "    {} -> {} [label={} fontsize={} color={} arrowhead=crow arrowtail=dot dir=both]",
            quote(&edge.source),
            quote(&edge.target),
            quote(&edge.label),
            style.edge_font_size,
            quote(color)
        );
    }

    out.push_str("}\n");
    out
}

/// Quote a DOT ID, escaping quotes, backslashes and line breaks.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            // Graphviz reads `\r` as a right-justified line break, so CR and
            // CRLF both become the centred `\n`
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    quoted.push_str("\\n");
                }
            }
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
