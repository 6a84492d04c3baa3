//! Error types for loading menu inputs.
//!
//! The menu pipeline itself is total. Errors only arise at the edges, where
//! route trees and message catalogs are read from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading route or locale sources.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
