#[cfg(test)]
mod tests {
    use schemagraph::config::{Settings, SettingsError};
    use schemagraph::metadata::StaticMetadataProvider;
    use schemagraph::render::OutputFormat;
    use schemagraph::{artifact_name, Visualizer};
    use std::path::Path;

    const SNAPSHOT: &str = r#"{
        "schema": "PUBLIC",
        "tables": [
            {"name": "ORDERS", "columns": [{"name": "CUSTOMER_KEY"}, {"name": "STORE_ID"}]},
            {"name": "CUSTOMER_dimension", "columns": [{"name": "NAME"}]},
            {"name": "STORE"}
        ]
    }"#;

    fn write_config(dir: &Path, output_dir: &Path) -> std::path::PathBuf {
        let path = dir.join("schemagraph.toml");
        let toml = format!(
            r#"
[catalog]
database = "ANALYTICS"

[inference]
key_markers = ["_KEY"]
dimension_suffix = "_dimension"

[render]
output_dir = '{}'
format = "dot"

[logging]
level = "debug"
"#,
            output_dir.display()
        );
        std::fs::write(&path, toml).unwrap();
        path
    }

    #[tokio::test]
    async fn test_settings_drive_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("uploads");
        let settings = Settings::from_file(write_config(dir.path(), &out)).unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.render.output_format().unwrap(), OutputFormat::Dot);

        let visualizer = Visualizer::from_settings(&settings).unwrap();
        let provider = StaticMetadataProvider::from_json_str(SNAPSHOT).unwrap();

        let graph = visualizer.build_graph(&provider, "PUBLIC").await.unwrap();
        let edges = graph.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "ORDERS");
        assert_eq!(edges[0].target, "CUSTOMER_dimension");
        assert_eq!(edges[0].label, "CUSTOMER_KEY");

        let name = artifact_name(settings.catalog.database.as_deref(), "PUBLIC");
        let artifact = visualizer.visualize(&provider, "PUBLIC", &name).await.unwrap();
        assert_eq!(artifact.path, out.join("ANALYTICS_PUBLIC_schema.dot"));
        assert!(artifact.path.exists());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemagraph.toml");
        std::fs::write(&path, "[render\nformat = ").unwrap();

        assert!(matches!(
            Settings::from_file(&path),
            Err(SettingsError::ParseError(_))
        ));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemagraph.toml");
        std::fs::write(&path, "").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.render.output_dir, Path::new("uploads"));
        assert_eq!(settings.render.dot_binary, "dot");
        assert_eq!(settings.catalog.database, None);
    }
}
