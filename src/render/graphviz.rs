//! File renderer backed by the Graphviz `dot` executable.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::dot::{to_dot, DotStyle};
use super::{OutputFormat, RenderError, RenderResult, RenderedArtifact, Renderer};
use crate::graph::SchemaGraph;

/// Default time allowed for a single `dot` invocation.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Writes `{output_dir}/{name}.{ext}`.
///
/// [`OutputFormat::Dot`] writes the DOT source directly; every other format
/// pipes it through `dot -T<ext>`.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    output_dir: PathBuf,
    format: OutputFormat,
    dot_binary: PathBuf,
    style: DotStyle,
    timeout: Duration,
}

impl GraphvizRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            dot_binary: PathBuf::from("dot"),
            style: DotStyle::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use a specific `dot` executable.
    pub fn with_dot_binary(mut self, dot_binary: impl Into<PathBuf>) -> Self {
        self.dot_binary = dot_binary.into();
        self
    }

    pub fn with_style(mut self, style: DotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Path the artifact for `name` will be written to.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", artifact_file_name(name), self.format.extension()))
    }

    async fn run_dot(&self, source: &str, path: &Path) -> RenderResult<()> {
        let mut child = Command::new(&self.dot_binary)
            .arg(format!("-T{}", self.format.extension()))
            .arg("-o")
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    RenderError::GraphvizNotFound(self.dot_binary.display().to_string())
                }
                _ => RenderError::Io(e),
            })?;

        // Feed stdin while draining stdout/stderr so a large graph cannot
        // fill the pipe and stall; the timeout covers both.
        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok::<(), std::io::Error>(());
            };
            stdin.write_all(source.as_bytes()).await?;
            stdin.shutdown().await
        };
        let (fed, output) = tokio::time::timeout(self.timeout, async {
            tokio::join!(feed, child.wait_with_output())
        })
        .await
        .map_err(|_| RenderError::Timeout(self.timeout))?;
        let output = output?;

        // A dot that exits early breaks the pipe; its exit status and
        // stderr say why.
        if !output.status.success() {
            return Err(RenderError::GraphvizFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        fed?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for GraphvizRenderer {
    async fn render(&self, graph: &SchemaGraph, name: &str) -> RenderResult<RenderedArtifact> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let source = to_dot(graph, name, &self.style);
        let path = self.artifact_path(name);

        match self.format {
            OutputFormat::Dot => tokio::fs::write(&path, source).await?,
            _ => self.run_dot(&source, &path).await?,
        }

        tracing::info!(path = %path.display(), format = %self.format, "rendered schema graph");

        Ok(RenderedArtifact {
            path,
            format: self.format,
        })
    }
}

/// File stem for an artifact name: anything outside `[A-Za-z0-9_.-]`
/// becomes `_`, so names cannot escape the output directory.
pub fn artifact_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "schema".to_string()
    } else {
        stem.to_string()
    }
}
