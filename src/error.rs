//! Crate-level error type.

use thiserror::Error;

use crate::config::SettingsError;
use crate::metadata::MetadataError;
use crate::render::RenderError;

/// Result type for end-to-end operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level failure of a visualization run.
///
/// Callers can tell a missing catalog apart from a failed render without
/// inspecting messages.
#[derive(Error, Debug)]
pub enum Error {
    #[error("metadata unavailable: {0}")]
    MetadataUnavailable(#[from] MetadataError),

    #[error("render failed: {0}")]
    RenderFailure(#[from] RenderError),

    #[error("configuration error: {0}")]
    Config(#[from] SettingsError),
}

impl Error {
    pub fn is_metadata(&self) -> bool {
        matches!(self, Self::MetadataUnavailable(_))
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Self::RenderFailure(_))
    }
}
