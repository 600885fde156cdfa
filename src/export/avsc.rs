//! Avro schema file exporter

use crate::export::{ExportError, ExportResult};
use crate::models::RecordSchema;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Exporter for Avro schema files
///
/// One file per record, named `<namespace>_<name>.avsc` with dots replaced
/// by underscores, holding the schema as JSON indented with four spaces.
#[derive(Debug, Clone)]
pub struct AvscExporter {
    output_dir: PathBuf,
}

impl AvscExporter {
    pub const FORMAT: &'static str = "avsc";

    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render a schema without touching the filesystem
    ///
    /// # Example
    ///
    /// ```rust
    /// use avro_schema_generator::export::AvscExporter;
    /// use avro_schema_generator::models::{AvroField, AvroType, RecordSchema};
    ///
    /// let schema = RecordSchema::new(
    ///     "Orders",
    ///     Some("com.example".to_string()),
    ///     vec![AvroField::new("OrderId", AvroType::long(), false)],
    /// );
    /// let result = AvscExporter::export(&schema).unwrap();
    /// assert_eq!(result.file_name, "com_example_Orders.avsc");
    /// assert!(result.content.starts_with("{\n    \"type\": \"record\""));
    /// ```
    pub fn export(schema: &RecordSchema) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: schema.to_pretty_json()?,
            format: Self::FORMAT.to_string(),
            file_name: schema.file_name(),
        })
    }

    /// Write a schema into the output directory, creating it if needed
    pub fn write(&self, schema: &RecordSchema) -> Result<PathBuf, ExportError> {
        let result = Self::export(schema)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::IoError {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(&result.file_name);
        fs::write(&path, result.content).map_err(|source| ExportError::IoError {
            path: path.clone(),
            source,
        })?;

        info!("Wrote schema {} to {}", schema.name, path.display());
        Ok(path)
    }
}
