#[cfg(test)]
mod tests {
    use schemagraph::metadata::StaticMetadataProvider;
    use schemagraph::render::{
        to_dot, DotStyle, GraphvizRenderer, OutputFormat, RenderError, Renderer,
    };
    use schemagraph::graph::TableNode;
    use schemagraph::inference::TableKind;
    use schemagraph::{GraphOptions, InferenceEngine, SchemaGraph, Visualizer};
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};

    const CONSTRAINED: &str = r#"{
        "schema": "main",
        "tables": [
            {"name": "artist", "columns": [
                {"name": "id", "data_type": "INTEGER", "is_primary_key": true, "nullable": false}
            ]},
            {"name": "album", "columns": [
                {"name": "id", "data_type": "INTEGER", "is_primary_key": true, "nullable": false},
                {"name": "artist_id", "data_type": "INTEGER", "nullable": true}
            ]},
            {"name": "track \"live\"", "columns": [{"name": "album_id"}]}
        ],
        "foreign_keys": {
            "album": [{"constrained_columns": ["artist_id"], "referred_table": "artist", "referred_columns": ["id"]}],
            "track \"live\"": [{"constrained_columns": ["album_id"], "referred_table": "album", "referred_columns": ["id"]}]
        }
    }"#;

    async fn constrained_graph(options: GraphOptions) -> SchemaGraph {
        let provider = StaticMetadataProvider::from_json_str(CONSTRAINED).unwrap();
        let dir = tempfile::tempdir().unwrap();
        Visualizer::new(
            InferenceEngine::new(),
            options,
            GraphvizRenderer::new(dir.path(), OutputFormat::Dot),
        )
        .build_graph(&provider, "main")
        .await
        .unwrap()
    }

    /// Graph whose DOT text is far larger than a pipe buffer.
    fn wide_graph() -> SchemaGraph {
        let mut graph = SchemaGraph::new();
        for i in 0..5000 {
            graph.add_table(TableNode::new(format!("warehouse_table_{i:05}"), TableKind::Other));
        }
        graph
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_constraint_graph_dot() {
        let graph = constrained_graph(GraphOptions::default()).await;
        let dot = to_dot(&graph, "chinook_main_schema", &DotStyle::default());

        let expected = [
            "// chinook_main_schema schema",
            "digraph \"chinook_main_schema\" {",
            "    graph [rankdir=\"LR\" splines=\"ortho\"]",
            "    node [shape=\"rectangle\" style=filled fillcolor=\"lightgrey\"]",
            "    \"artist\" [label=\"artist\"]",
            "    \"album\" [label=\"album\"]",
            "    \"track \\\"live\\\"\" [label=\"track \\\"live\\\"\"]",
            "    \"album\" -> \"artist\" [label=\"artist_id → id\" fontsize=10 color=\"#0000FF\" arrowhead=crow arrowtail=dot dir=both]",
            "    \"track \\\"live\\\"\" -> \"album\" [label=\"album_id → id\" fontsize=10 color=\"#0000FF\" arrowhead=crow arrowtail=dot dir=both]",
            "}",
        ];
        assert_eq!(dot.lines().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn test_column_labels() {
        let graph = constrained_graph(GraphOptions::with_columns()).await;
        let dot = to_dot(&graph, "chinook", &DotStyle::default());

        assert!(dot.contains(
            "\"album\" [label=\"album\\n\\nid: INTEGER (PK)\\nartist_id: INTEGER (nullable)\"]"
        ));
        // No column metadata beyond the name
        assert!(dot.contains("[label=\"track \\\"live\\\"\\n\\nalbum_id\"]"));
    }

    #[tokio::test]
    async fn test_custom_style() {
        let graph = constrained_graph(GraphOptions::default()).await;
        let style = DotStyle {
            rankdir: "TB".to_string(),
            constraint_color: "black".to_string(),
            ..DotStyle::default()
        };

        let dot = to_dot(&graph, "chinook", &style);
        assert!(dot.contains("rankdir=\"TB\""));
        assert!(dot.contains("color=\"black\""));
        assert!(!dot.contains("#0000FF"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_dot_binary() {
        use std::os::unix::fs::PermissionsExt;

        let graph = constrained_graph(GraphOptions::default()).await;
        let dir = tempfile::tempdir().unwrap();

        // Stand-in for graphviz: copies stdin to the -o path
        let fake_dot = dir.path().join("fake-dot");
        std::fs::write(&fake_dot, "#!/bin/sh\ncat > \"$3\"\n").unwrap();
        std::fs::set_permissions(&fake_dot, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = dir.path().join("uploads");
        let renderer = GraphvizRenderer::new(&out, OutputFormat::Svg).with_dot_binary(&fake_dot);
        let artifact = renderer.render(&graph, "chinook_main_schema").await.unwrap();

        assert_eq!(artifact.path, out.join("chinook_main_schema.svg"));
        assert_eq!(artifact.format, OutputFormat::Svg);
        let written = std::fs::read_to_string(&artifact.path).unwrap();
        assert!(written.starts_with("// chinook_main_schema schema\n"));

        // A failing graphviz run reports its stderr
        let failing_dot = dir.path().join("failing-dot");
        std::fs::write(
            &failing_dot,
            "#!/bin/sh\ncat > /dev/null\necho 'syntax error in line 1' >&2\nexit 2\n",
        )
        .unwrap();
        std::fs::set_permissions(&failing_dot, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = GraphvizRenderer::new(&out, OutputFormat::Png).with_dot_binary(&failing_dot);
        match renderer.render(&graph, "chinook_main_schema").await {
            Err(RenderError::GraphvizFailed { stderr, .. }) => {
                assert_eq!(stderr, "syntax error in line 1");
            }
            other => panic!("expected graphviz failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dot_exiting_before_reading_input() {
        let dir = tempfile::tempdir().unwrap();
        let rejecting_dot = write_script(
            dir.path(),
            "rejecting-dot",
            "echo 'Format: \"pdf\" not recognized' >&2\nexit 1\n",
        );

        let renderer = GraphvizRenderer::new(dir.path().join("uploads"), OutputFormat::Pdf)
            .with_dot_binary(&rejecting_dot);
        match renderer.render(&wide_graph(), "wide").await {
            Err(RenderError::GraphvizFailed { stderr, .. }) => {
                assert_eq!(stderr, "Format: \"pdf\" not recognized");
            }
            other => panic!("expected graphviz failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stalled_dot_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let stalled_dot = write_script(dir.path(), "stalled-dot", "exec sleep 20\n");

        let renderer = GraphvizRenderer::new(dir.path().join("uploads"), OutputFormat::Svg)
            .with_dot_binary(&stalled_dot)
            .with_timeout(Duration::from_millis(500));

        let started = Instant::now();
        let err = renderer.render(&wide_graph(), "wide").await.unwrap_err();

        assert!(matches!(err, RenderError::Timeout(t) if t == Duration::from_millis(500)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
