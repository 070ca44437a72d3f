//! Engine error type.

use std::path::PathBuf;

use thiserror::Error;

use ascii_field_compositor::AtlasError;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("failed to parse content: {0}")]
    Content(#[from] serde_json::Error),

    #[error("failed to decode asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Atlas(#[from] AtlasError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FieldError {
    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Content(_) => "content_parse",
            FieldError::Asset { .. } => "asset_decode",
            FieldError::Atlas(_) => "atlas",
            FieldError::Io { .. } => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
