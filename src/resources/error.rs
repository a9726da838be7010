//! Resource loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the resource manager
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed resource config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ResourceError>;
