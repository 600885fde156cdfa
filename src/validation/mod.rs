//! Validation functionality
//!
//! Checks that schema documents parse as JSON and as Avro schemas, one
//! document, one file, or a whole folder at a time.

pub mod avro;

pub use avro::{
    AVRO_EXTENSION, AvroValidationError, FileValidation, FolderReport, SchemaDefinition,
    ValidationErrorKind, validate_all_in_folder, validate_avro_schema_file,
    validate_schema_definition,
};
