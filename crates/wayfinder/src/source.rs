//! Reading JSON and YAML source files.
//!
//! Route trees and message catalogs are both stored as plain data files;
//! the format is chosen from the file extension.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{MenuError, MenuResult};

/// Supported source file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> MenuResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(SourceFormat::Json),
            "yaml" | "yml" => Ok(SourceFormat::Yaml),
            _ => Err(MenuError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a document in this format.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> MenuResult<T> {
        match self {
            SourceFormat::Json => Ok(serde_json::from_str(text)?),
            SourceFormat::Yaml => Ok(serde_yml::from_str(text)?),
        }
    }
}

/// Read and parse a source file, detecting the format from its extension.
pub fn read_source<T: DeserializeOwned>(path: &Path) -> MenuResult<T> {
    let format = SourceFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?format, bytes = text.len(), "read source file");
    format.parse(&text)
}
