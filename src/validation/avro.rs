//! Avro schema validation
//!
//! A document is valid when it parses as JSON and the parsed JSON is
//! accepted by the Avro schema parser. The two failure kinds are kept
//! apart so callers can tell malformed JSON from a malformed schema.
//!
//! # Example
//!
//! ```rust
//! use avro_schema_generator::validation::{ValidationErrorKind, validate_schema_definition};
//!
//! assert!(validate_schema_definition(r#"{"type": "string"}"#).is_ok());
//!
//! let err = validate_schema_definition(r#"{"type": "banana"}"#).unwrap_err();
//! assert_eq!(err.kind(), ValidationErrorKind::AvroError);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default extension of Avro schema files
pub const AVRO_EXTENSION: &str = ".avsc";

/// Message prefix for documents that are not JSON
pub const JSON_ERROR: &str = "Input could not be parsed as JSON";

/// Message prefix for JSON documents that are not Avro schemas
pub const AVRO_ERROR: &str = "Input could not be parsed as AVRO";

/// Full name of a record, enum or fixed type: dotted namespace, then a simple name
static FULL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*\.)*[A-Za-z_][A-Za-z0-9_]*$").unwrap()
});

const NAMED_TYPES: [&str; 4] = ["record", "error", "enum", "fixed"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    JsonError,
    AvroError,
    Io,
}

/// Why a schema document is not valid
#[derive(Error, Debug)]
pub enum AvroValidationError {
    #[error("Input could not be parsed as JSON:\n{0}")]
    Json(String),

    #[error("Input could not be parsed as AVRO:\n{0}")]
    Avro(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AvroValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            AvroValidationError::Json(_) => ValidationErrorKind::JsonError,
            AvroValidationError::Avro(_) => ValidationErrorKind::AvroError,
            AvroValidationError::Io { .. } => ValidationErrorKind::Io,
        }
    }
}

/// A schema document in one of its accepted forms
///
/// Text and bytes are parsed as JSON first; a `Value` is taken as already parsed.
#[derive(Debug, Clone, Copy)]
pub enum SchemaDefinition<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
    Value(&'a Value),
}

impl<'a> From<&'a str> for SchemaDefinition<'a> {
    fn from(text: &'a str) -> Self {
        SchemaDefinition::Text(text)
    }
}

impl<'a> From<&'a String> for SchemaDefinition<'a> {
    fn from(text: &'a String) -> Self {
        SchemaDefinition::Text(text)
    }
}

impl<'a> From<&'a [u8]> for SchemaDefinition<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SchemaDefinition::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for SchemaDefinition<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        SchemaDefinition::Bytes(bytes)
    }
}

impl<'a> From<&'a Value> for SchemaDefinition<'a> {
    fn from(value: &'a Value) -> Self {
        SchemaDefinition::Value(value)
    }
}

/// Check that a schema document is a syntactically valid Avro schema
pub fn validate_schema_definition<'a>(
    schema: impl Into<SchemaDefinition<'a>>,
) -> Result<(), AvroValidationError> {
    let parsed;
    let value = match schema.into() {
        SchemaDefinition::Text(text) => {
            let text = text.strip_prefix('\u{feff}').unwrap_or(text);
            parsed = parse_json(serde_json::from_str(text))?;
            &parsed
        }
        SchemaDefinition::Bytes(bytes) => {
            let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            parsed = parse_json(serde_json::from_slice(bytes))?;
            &parsed
        }
        SchemaDefinition::Value(value) => value,
    };

    check_type_names(value)?;
    let canonical =
        serde_json::to_string(value).map_err(|e| AvroValidationError::Json(e.to_string()))?;

    // apache-avro unwraps some name errors internally; a panic is an invalid schema
    let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
        apache_avro::Schema::parse_str(&canonical)
    }))
    .map_err(|payload| AvroValidationError::Avro(panic_message(payload.as_ref())))?;
    parsed
        .map(|_| ())
        .map_err(|e| AvroValidationError::Avro(e.to_string()))
}

/// Reject record, enum and fixed names that are not valid Avro full names
fn check_type_names(value: &Value) -> Result<(), AvroValidationError> {
    match value {
        Value::Object(map) => {
            let is_named = map
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| NAMED_TYPES.contains(&t));
            if is_named {
                if let Some(name) = map.get("name").and_then(Value::as_str) {
                    if !FULL_NAME_REGEX.is_match(name) {
                        return Err(AvroValidationError::Avro(format!(
                            "Invalid schema name {name}. It must match the regex '{}'",
                            FULL_NAME_REGEX.as_str()
                        )));
                    }
                }
            }
            map.values().try_for_each(check_type_names)
        }
        Value::Array(items) => items.iter().try_for_each(check_type_names),
        _ => Ok(()),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "schema parser panicked".to_string())
}

fn parse_json(result: serde_json::Result<Value>) -> Result<Value, AvroValidationError> {
    result.map_err(|e| AvroValidationError::Json(e.to_string()))
}

/// Outcome of validating one file
#[derive(Debug)]
pub struct FileValidation {
    pub path: PathBuf,
    pub result: Result<(), AvroValidationError>,
}

impl FileValidation {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// File name without its directory
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn error(&self) -> Option<&AvroValidationError> {
        self.result.as_ref().err()
    }
}

/// Validate the schema stored in a file
pub fn validate_avro_schema_file(path: impl AsRef<Path>) -> FileValidation {
    let path = path.as_ref().to_path_buf();
    let result = std::fs::read(&path)
        .map_err(|source| AvroValidationError::Io {
            path: path.clone(),
            source,
        })
        .and_then(|bytes| validate_schema_definition(&bytes));

    match &result {
        Ok(()) => debug!("Schema file {} is valid", path.display()),
        Err(e) => debug!("Schema file {} is not valid: {}", path.display(), e),
    }
    FileValidation { path, result }
}

/// Per-file results of a folder scan, in path order
#[derive(Debug, Default)]
pub struct FolderReport {
    pub files: Vec<FileValidation>,
}

impl FolderReport {
    pub fn success_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_valid()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileValidation> {
        self.files.iter().filter(|f| !f.is_valid())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Validate every file below `folder` whose name ends in `extension`
///
/// When `include` is given only paths containing it (case-sensitive) are
/// checked. Each file is validated independently; failures are collected
/// in the report and never stop the scan.
pub fn validate_all_in_folder(
    folder: impl AsRef<Path>,
    include: Option<&str>,
    extension: &str,
) -> FolderReport {
    let mut report = FolderReport::default();
    for path in discover_schema_files(folder.as_ref(), extension) {
        let matches_filter = include
            .filter(|needle| !needle.is_empty())
            .is_none_or(|needle| path.to_string_lossy().contains(needle));
        if !matches_filter {
            continue;
        }

        let validation = validate_avro_schema_file(&path);
        if let Some(e) = validation.error() {
            warn!("Invalid schema file {}: {}", path.display(), e);
        }
        report.files.push(validation);
    }
    report
}

fn discover_schema_files(folder: &Path, extension: &str) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/**/*{}",
        glob::Pattern::escape(&folder.to_string_lossy()),
        glob::Pattern::escape(extension)
    );

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Invalid search pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID: &str = r#"{
        "type": "record",
        "name": "Orders",
        "namespace": "com.example",
        "fields": [
            {"name": "OrderId", "type": "long"},
            {"name": "Note", "type": ["null", "string"], "default": null}
        ]
    }"#;

    #[test]
    fn test_valid_text() {
        assert!(validate_schema_definition(VALID).is_ok());
    }

    #[test]
    fn test_valid_bytes_and_value() {
        assert!(validate_schema_definition(VALID.as_bytes()).is_ok());
        let value: Value = serde_json::from_str(VALID).unwrap();
        assert!(validate_schema_definition(&value).is_ok());
    }

    #[test]
    fn test_trailing_comma_is_json_error() {
        let err = validate_schema_definition(r#"{"type": "record", "name": "A", "fields": [],}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::JsonError);
        assert!(err.to_string().starts_with(JSON_ERROR));
    }

    #[test]
    fn test_unknown_field_type_is_avro_error() {
        let schema = json!({
            "type": "record",
            "name": "Fruit",
            "fields": [{"name": "kind", "type": "banana"}]
        });
        let err = validate_schema_definition(&schema).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::AvroError);
        assert!(err.to_string().starts_with(AVRO_ERROR));
    }

    #[test]
    fn test_record_without_fields_is_avro_error() {
        let err = validate_schema_definition(r#"{"type": "record", "name": "A"}"#).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::AvroError);
    }

    #[test]
    fn test_invalid_record_name_is_avro_error() {
        for name in ["Order Details", "1st", "sales.Order Details"] {
            let schema = json!({"type": "record", "name": name, "fields": []});
            let err = validate_schema_definition(&schema).unwrap_err();
            assert_eq!(err.kind(), ValidationErrorKind::AvroError, "{name}");
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn test_nested_enum_name_is_checked() {
        let schema = json!({
            "type": "record",
            "name": "Orders",
            "fields": [{"name": "status", "type": {"type": "enum", "name": "order-status", "symbols": ["OPEN"]}}]
        });
        let err = validate_schema_definition(&schema).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::AvroError);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        assert!(validate_schema_definition("\u{feff}{\"type\": \"long\"}").is_ok());
        let bytes = [UTF8_BOM, br#"{"type": "long"}"#.as_slice()].concat();
        assert!(validate_schema_definition(&bytes).is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let validation = validate_avro_schema_file("/nonexistent/schema.avsc");
        assert!(!validation.is_valid());
        assert_eq!(validation.error().unwrap().kind(), ValidationErrorKind::Io);
        assert_eq!(validation.file_name(), "schema.avsc");
    }

    #[test]
    fn test_folder_scan_is_recursive_and_filtered() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("sales-schemas");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("orders.avsc"), VALID).unwrap();
        std::fs::write(nested.join("invoices.avsc"), VALID).unwrap();
        std::fs::write(nested.join("broken.avsc"), "{").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "{").unwrap();

        let report = validate_all_in_folder(temp.path(), None, AVRO_EXTENSION);
        assert_eq!(report.len(), 3);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);

        let report = validate_all_in_folder(temp.path(), Some("sales-schemas"), AVRO_EXTENSION);
        assert_eq!(report.len(), 2);
        assert_eq!(report.success_count(), 1);

        let report = validate_all_in_folder(temp.path(), Some("Sales-Schemas"), AVRO_EXTENSION);
        assert!(report.is_empty());
    }
}
