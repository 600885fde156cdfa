//! Avro Schema Generator - Avro schemas for Kafka Connect from relational metadata
//!
//! Provides:
//! - Avro type, field and record schema models
//! - Static type-mapping tables per source system and dialect
//! - Metadata connectors (CSV export, live database)
//! - Schema generation and `.avsc` file output
//! - Avro schema validation for documents, files and folders
//!
//! # Example
//!
//! ```rust,no_run
//! use avro_schema_generator::{Configuration, generator};
//!
//! let config = Configuration::new("csv", "debezium")
//!     .with_csv_path("columns.csv")
//!     .with_db_system("sqlserver")
//!     .with_namespace("com.example.sales")
//!     .with_output_path("schemas");
//! let written = generator::run(&config)?;
//! # Ok::<(), avro_schema_generator::GenerateError>(())
//! ```

pub mod cli;
pub mod config;
pub mod connectors;
pub mod export;
pub mod generator;
pub mod mapping;
pub mod models;
pub mod validation;

pub use config::{ConfigError, Configuration};
pub use connectors::{Connector, ConnectorError, CsvConnector, DatabaseConnector, MetadataSource, open_connector};
#[cfg(feature = "duckdb-backend")]
pub use connectors::DuckDbSource;
pub use export::{AvscExporter, ExportError, ExportResult};
pub use generator::{GenerateError, get_schema};
pub use mapping::{MappingError, MappingTable};
pub use models::{AvroField, AvroType, AvroTypeError, ColumnDescriptor, RecordSchema, TableRef};
pub use validation::{AvroValidationError, ValidationErrorKind, validate_schema_definition};
