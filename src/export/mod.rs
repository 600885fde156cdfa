//! Export functionality
//!
//! Writes generated record schemas as Avro schema files (`.avsc`).

pub mod avsc;

use std::path::PathBuf;

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Exported document
    pub content: String,
    /// Format identifier
    pub format: String,
    /// File name the document is written under
    pub file_name: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Cannot write {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub use avsc::AvscExporter;
