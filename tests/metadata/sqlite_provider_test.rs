#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use schemagraph::graph::EdgeOrigin;
    use schemagraph::metadata::{
        is_sqlite_path, MetadataError, MetadataProviderExt, RelationshipSource,
        SqliteMetadataProvider,
    };
    use schemagraph::render::{GraphvizRenderer, OutputFormat};
    use schemagraph::{artifact_name, Error, GraphOptions, InferenceEngine, Visualizer};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn shop_db() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "
            CREATE TABLE customer (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT
            );
            CREATE TABLE product (
                id INTEGER PRIMARY KEY,
                title TEXT
            );
            -- product_id has no constraint
            CREATE TABLE orders (
                id INTEGER PRIMARY KEY,
                customer_id INTEGER REFERENCES customer(id),
                product_id INTEGER,
                total REAL
            );
            ",
        )
        .unwrap();
        (dir, path)
    }

    fn visualizer(out: &Path, options: GraphOptions) -> Visualizer<GraphvizRenderer> {
        Visualizer::new(
            InferenceEngine::new(),
            options,
            GraphvizRenderer::new(out, OutputFormat::Dot),
        )
    }

    #[tokio::test]
    async fn test_snapshot_from_file() {
        let (_dir, path) = shop_db();
        let provider = SqliteMetadataProvider::open(&path).unwrap();
        assert_eq!(provider.path(), Some(path.as_path()));

        let snapshot = provider.snapshot("main").await.unwrap();

        assert_eq!(snapshot.table_names(), vec!["customer", "orders", "product"]);
        assert_eq!(snapshot.relationship_source(), RelationshipSource::Constraints);

        let foreign_keys = snapshot.foreign_keys.as_ref().unwrap();
        assert_eq!(foreign_keys["orders"].len(), 1);
        assert_eq!(foreign_keys["orders"][0].referred_table, "customer");
        assert!(foreign_keys["product"].is_empty());
    }

    #[tokio::test]
    async fn test_declared_keys_bypass_inference() {
        let (dir, path) = shop_db();
        let provider = SqliteMetadataProvider::open(&path).unwrap();

        let graph = visualizer(dir.path(), GraphOptions::default())
            .build_graph(&provider, "main")
            .await
            .unwrap();

        // product_id would be inferred, but the catalog declares its keys
        let edges = graph.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "orders");
        assert_eq!(edges[0].target, "customer");
        assert_eq!(edges[0].label, "customer_id → id");
        assert_eq!(edges[0].origin, EdgeOrigin::Constraint);
    }

    #[tokio::test]
    async fn test_render_dot_artifact() {
        let (dir, path) = shop_db();
        let out = dir.path().join("uploads");
        let provider = SqliteMetadataProvider::open(&path).unwrap();
        let name = artifact_name(Some("shop"), "main");

        let artifact = visualizer(&out, GraphOptions::with_columns())
            .visualize(&provider, "main", &name)
            .await
            .unwrap();

        assert_eq!(artifact.path, out.join("shop_main_schema.dot"));
        let dot = std::fs::read_to_string(&artifact.path).unwrap();
        assert!(dot.contains(
            "\"customer\" [label=\"customer\\n\\nid: INTEGER (PK)\\nname: TEXT\\nemail: TEXT (nullable)\"]"
        ));
        assert!(dot.contains("\"orders\" -> \"customer\" [label=\"customer_id → id\""));
        assert!(dot.contains("color=\"#0000FF\""));
        assert!(!dot.contains("#666666"));
    }

    #[tokio::test]
    async fn test_unknown_schema_is_metadata_error() {
        let (dir, path) = shop_db();
        let out = dir.path().join("uploads");
        let provider = SqliteMetadataProvider::open(&path).unwrap();

        let err = visualizer(&out, GraphOptions::default())
            .visualize(&provider, "archive", "shop_archive_schema")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::MetadataUnavailable(MetadataError::SchemaNotFound(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SqliteMetadataProvider::open(dir.path().join("gone.sqlite"))
            .err()
            .unwrap();
        assert!(err.is_unreachable());
    }

    #[test]
    fn test_upload_extensions() {
        assert!(is_sqlite_path("chinook.db"));
        assert!(is_sqlite_path("CHINOOK.SQLITE3"));
        assert!(!is_sqlite_path("chinook.csv"));
        assert!(!is_sqlite_path("chinook"));
    }
}
