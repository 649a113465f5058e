#[cfg(test)]
mod tests {
    use schemagraph::inference::{
        infer_relationships, InferenceConfig, InferenceEngine, RelationshipEdge, TableKind,
        EXACT_NAME, SUFFIX_STRIP,
    };
    use schemagraph::metadata::{ColumnMetadata, SchemaSnapshot, TableMetadata};
    use schemagraph::{GraphOptions, SchemaGraph};
    use std::collections::{HashMap, HashSet};

    fn warehouse_tables() -> Vec<String> {
        ["SALES_fact", "CUSTOMER_dim", "PRODUCT_dim", "STORE", "REGION", "DATE_dim"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn warehouse_columns() -> HashMap<String, Vec<String>> {
        let entries: &[(&str, &[&str])] = &[
            (
                "SALES_fact",
                &[
                    "SALE_ID",
                    "CUSTOMER_ID",
                    "PRODUCT_num",
                    "STORE_ID",
                    "DATE_ID_KEY",
                    "REGION",
                    "AMOUNT",
                    "CURRENCY_CODE",
                ],
            ),
            ("CUSTOMER_dim", &["CUSTOMER_ID", "REGION_ID", "NAME"]),
            ("PRODUCT_dim", &[]),
            ("STORE", &["STORE_ID", "REGION_number"]),
            ("REGION", &["REGION_ID"]),
            ("DATE_dim", &["DATE_ID"]),
            // Not part of the table list
            ("ORPHAN", &["CUSTOMER_ID"]),
        ];
        entries
            .iter()
            .map(|(table, cols)| {
                (
                    table.to_string(),
                    cols.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect()
    }

    fn summary(edges: &[RelationshipEdge]) -> Vec<(&str, &str, &str, &str)> {
        edges
            .iter()
            .map(|e| {
                (
                    e.source_table.as_str(),
                    e.target_table.as_str(),
                    e.column.as_str(),
                    e.rule,
                )
            })
            .collect()
    }

    #[test]
    fn test_warehouse_inference() {
        let edges = infer_relationships(&warehouse_tables(), &warehouse_columns());

        assert_eq!(
            summary(&edges),
            vec![
                ("SALES_fact", "CUSTOMER_dim", "CUSTOMER_ID", "suffix_strip"),
                ("SALES_fact", "PRODUCT_dim", "PRODUCT_num", "suffix_strip"),
                ("SALES_fact", "STORE", "STORE_ID", "suffix_strip"),
                ("SALES_fact", "DATE_dim", "DATE_ID_KEY", "substring_split"),
                ("SALES_fact", "REGION", "REGION", "exact_name"),
                ("CUSTOMER_dim", "CUSTOMER_dim", "CUSTOMER_ID", "suffix_strip"),
                ("CUSTOMER_dim", "REGION", "REGION_ID", "suffix_strip"),
                ("STORE", "STORE", "STORE_ID", "suffix_strip"),
                ("STORE", "REGION", "REGION_number", "suffix_strip"),
                ("REGION", "REGION", "REGION_ID", "suffix_strip"),
                ("DATE_dim", "DATE_dim", "DATE_ID", "suffix_strip"),
            ]
        );
    }

    #[test]
    fn test_no_dangling_targets() {
        let tables = warehouse_tables();
        let table_set: HashSet<&str> = tables.iter().map(String::as_str).collect();

        for edge in infer_relationships(&tables, &warehouse_columns()) {
            assert!(table_set.contains(edge.target_table.as_str()), "{:?}", edge);
            assert!(table_set.contains(edge.source_table.as_str()), "{:?}", edge);
        }
    }

    #[test]
    fn test_repeated_runs_match() {
        let engine = InferenceEngine::new();
        let first = engine.infer_relationships(&warehouse_tables(), &warehouse_columns());
        for _ in 0..5 {
            assert_eq!(
                engine.infer_relationships(&warehouse_tables(), &warehouse_columns()),
                first
            );
        }
    }

    #[test]
    fn test_classification_does_not_change_resolution() {
        let engine = InferenceEngine::new();
        let classification = engine.classify(&warehouse_tables());
        assert_eq!(
            classification.dimensions,
            vec!["CUSTOMER_dim", "PRODUCT_dim", "DATE_dim"]
        );
        assert_eq!(classification.facts, vec!["SALES_fact"]);

        // A fact table is still a valid target
        let mut columns = HashMap::new();
        columns.insert("REFUND".to_string(), vec!["SALES_fact".to_string()]);
        let edges = engine.infer_relationships(&["REFUND", "SALES_fact"], &columns);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target_table, "SALES_fact");
    }

    #[test]
    fn test_restricted_rule_chain() {
        let engine = InferenceEngine::with_config(
            InferenceConfig::default().with_rules(vec![EXACT_NAME, SUFFIX_STRIP]),
        );
        let edges = engine.infer_relationships(&warehouse_tables(), &warehouse_columns());

        // No substring matches, and REGION is claimed by exact_name first
        assert!(edges.iter().all(|e| e.rule != "substring_split"));
        assert!(!edges.iter().any(|e| e.column == "DATE_ID_KEY"));
        assert_eq!(edges.len(), 10);
    }

    #[test]
    fn test_inferred_graph_from_snapshot() {
        let tables: Vec<TableMetadata> = warehouse_tables()
            .into_iter()
            .map(|name| {
                let columns = warehouse_columns()
                    .remove(&name)
                    .unwrap_or_default()
                    .into_iter()
                    .map(ColumnMetadata::named)
                    .collect();
                TableMetadata::new(name, columns)
            })
            .collect();
        let snapshot = SchemaSnapshot {
            schema: "PUBLIC".to_string(),
            tables,
            foreign_keys: None,
        };

        let graph =
            SchemaGraph::from_snapshot(&snapshot, &InferenceEngine::new(), GraphOptions::default());

        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 11);
        assert_eq!(graph.table("SALES_fact").unwrap().kind, TableKind::Fact);
        assert_eq!(
            graph.referenced_tables("SALES_fact"),
            vec!["CUSTOMER_dim", "PRODUCT_dim", "STORE", "DATE_dim", "REGION"]
        );
        assert!(graph.edges().iter().all(|e| e.origin.is_inferred()));
    }
}
