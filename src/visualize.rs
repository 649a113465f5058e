//! End-to-end pipeline: provider -> snapshot -> graph -> renderer.

use crate::config::Settings;
use crate::error::Result;
use crate::graph::{GraphOptions, SchemaGraph};
use crate::inference::InferenceEngine;
use crate::metadata::{MetadataProvider, MetadataProviderExt};
use crate::render::{GraphvizRenderer, RenderedArtifact, Renderer};

/// Drives one visualization run.
///
/// A metadata failure is reported before the renderer is touched, so a
/// failed run never leaves a partial artifact behind.
pub struct Visualizer<R> {
    engine: InferenceEngine,
    options: GraphOptions,
    renderer: R,
}

impl<R: Renderer> Visualizer<R> {
    pub fn new(engine: InferenceEngine, options: GraphOptions, renderer: R) -> Self {
        Self {
            engine,
            options,
            renderer,
        }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Fetch `schema` from `provider` and assemble its graph.
    pub async fn build_graph<P>(&self, provider: &P, schema: &str) -> Result<SchemaGraph>
    where
        P: MetadataProvider + ?Sized,
    {
        let snapshot = provider.snapshot(schema).await?;
        Ok(SchemaGraph::from_snapshot(&snapshot, &self.engine, self.options))
    }

    /// Build the graph for `schema` and render it as `name`.
    pub async fn visualize<P>(
        &self,
        provider: &P,
        schema: &str,
        name: &str,
    ) -> Result<RenderedArtifact>
    where
        P: MetadataProvider + ?Sized,
    {
        let graph = self.build_graph(provider, schema).await?;
        Ok(self.renderer.render(&graph, name).await?)
    }
}

impl Visualizer<GraphvizRenderer> {
    /// Engine, graph options and Graphviz renderer from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let engine = InferenceEngine::with_config(settings.inference.to_inference_config()?);
        let options = GraphOptions {
            show_columns: settings.render.show_columns,
        };
        let renderer =
            GraphvizRenderer::new(&settings.render.output_dir, settings.render.output_format()?)
                .with_dot_binary(&settings.render.dot_binary);
        Ok(Self::new(engine, options, renderer))
    }
}

/// Artifact name for a schema: `{database}_{schema}_schema`, or
/// `{schema}_schema` when there is no database name.
pub fn artifact_name(database: Option<&str>, schema: &str) -> String {
    match database.filter(|d| !d.is_empty()) {
        Some(database) => format!("{}_{}_schema", database, schema),
        None => format!("{}_schema", schema),
    }
}
