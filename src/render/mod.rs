//! Rendering collaborators.
//!
//! A [`Renderer`] turns a [`SchemaGraph`] into a displayable artifact. The
//! graph itself stays free of any drawing concerns; everything about layout,
//! colour and file formats lives here.

pub mod dot;
mod graphviz;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::graph::SchemaGraph;

pub use dot::{to_dot, DotStyle};
pub use graphviz::{artifact_file_name, GraphvizRenderer};

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while producing an artifact.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing the artifact or its directory failed.
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),

    /// The Graphviz executable could not be started.
    #[error("graphviz executable not found: {0}")]
    GraphvizNotFound(String),

    /// Graphviz ran but reported an error.
    #[error("graphviz exited with {status}: {stderr}")]
    GraphvizFailed { status: String, stderr: String },

    /// Graphviz did not finish in time.
    #[error("graphviz timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The requested output format is not supported.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Artifact formats a renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    /// Graphviz source text; no external tool needed.
    Dot,
}

impl OutputFormat {
    /// File extension, which doubles as the Graphviz `-T` argument.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A produced artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// Turns a schema graph into an artifact.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render `graph`; `name` identifies the artifact (e.g. `SALES_PUBLIC_schema`).
    async fn render(&self, graph: &SchemaGraph, name: &str) -> RenderResult<RenderedArtifact>;
}
