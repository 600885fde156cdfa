//! Metadata connectors
//!
//! A connector answers two questions about a source system: which tables
//! exist, and which columns a table has. Two kinds are provided:
//! - [`CsvConnector`]: metadata exported to a CSV file, loaded once into memory
//! - [`DatabaseConnector`]: live metadata queries through a [`MetadataSource`]
//!   driver (DuckDB with the `duckdb-backend` feature)
//!
//! Use [`open_connector`] to build the connector selected by a [`Configuration`].

pub mod csv;
pub mod database;
#[cfg(feature = "duckdb-backend")]
pub mod duckdb;

pub use self::csv::CsvConnector;
pub use database::{DatabaseConnector, MetadataSource};
#[cfg(feature = "duckdb-backend")]
pub use self::duckdb::DuckDbSource;

use crate::config::{ConfigProperty, Configuration};
use crate::mapping::{MappingError, MappingTable};
use crate::models::{ColumnDescriptor, TableRef};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by connectors
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Metadata file could not be opened or read
    #[error("Cannot read metadata file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata file is not valid CSV
    #[error("Invalid CSV metadata: {0}")]
    Csv(#[from] ::csv::Error),

    /// Metadata file lacks required header columns
    #[error("Metadata file {path} is missing columns: {}", .missing.join(", "))]
    MissingHeaders { path: PathBuf, missing: Vec<String> },

    /// A metadata row holds an unusable value
    #[error("Invalid metadata row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// Database driver failure
    #[error("Database error: {0}")]
    Database(String),

    /// No metadata for the requested table
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// An unqualified table name exists in several schemas
    #[error("Table '{table}' exists in several schemas: {}", .schemas.join(", "))]
    AmbiguousTable { table: String, schemas: Vec<String> },

    /// Ordinal positions are not the contiguous sequence 1..N
    #[error(
        "Incomplete column metadata for table {table}: expected ordinal position {expected}, found {found}"
    )]
    OrdinalGap {
        table: String,
        expected: u32,
        found: u32,
    },

    /// The configured connector name is not known
    #[error("Unsupported connector '{name}' (available: {})", .available.join(", "))]
    UnsupportedConnector {
        name: String,
        available: Vec<&'static str>,
    },

    /// A setting the selected connector needs is missing
    #[error("Connector '{connector}' requires configuration property '{property}'")]
    MissingSetting {
        connector: &'static str,
        property: &'static str,
    },

    /// Mapping table selection failed
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl ConnectorError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ConnectorError::UnsupportedConnector { .. } => format!(
                "ERROR {self}\n\nHint: Set 'connector' in the configuration file or pass --connector."
            ),
            ConnectorError::OrdinalGap { .. } => format!(
                "ERROR {self}\n\nHint: The metadata query returned a partial column list; retry or check permissions."
            ),
            _ => format!("ERROR {self}"),
        }
    }
}

#[cfg(feature = "duckdb-backend")]
impl From<::duckdb::Error> for ConnectorError {
    fn from(err: ::duckdb::Error) -> Self {
        ConnectorError::Database(err.to_string())
    }
}

/// Capability interface shared by all connectors
pub trait Connector {
    /// Mapping table selected for this connector's (system, dialect)
    fn mapping(&self) -> &'static MappingTable;

    /// Tables available to generate schemas for
    fn list_tables(&self) -> Result<Vec<TableRef>, ConnectorError>;

    /// Columns of `table` in ascending ordinal order
    ///
    /// Repeated calls for the same table return equivalent results.
    fn list_columns(&self, table: &TableRef) -> Result<Vec<ColumnDescriptor>, ConnectorError>;
}

/// Connector names accepted by [`open_connector`]
pub fn supported_connectors() -> Vec<&'static str> {
    vec![
        CsvConnector::NAME,
        #[cfg(feature = "duckdb-backend")]
        DuckDbSource::NAME,
    ]
}

/// Build the connector selected by `config.connector`
///
/// The mapping table is resolved here, so an unknown (system, dialect)
/// combination fails before any table is read.
pub fn open_connector(config: &Configuration) -> Result<Box<dyn Connector>, ConnectorError> {
    let name = config.connector.trim().to_lowercase();
    match name.as_str() {
        CsvConnector::NAME => {
            let path = config
                .connector_csv_path
                .as_ref()
                .ok_or(ConnectorError::MissingSetting {
                    connector: CsvConnector::NAME,
                    property: ConfigProperty::CsvPath.key(),
                })?;
            let system = config
                .db_system
                .as_deref()
                .ok_or(ConnectorError::MissingSetting {
                    connector: CsvConnector::NAME,
                    property: ConfigProperty::DbSystem.key(),
                })?;
            let connector = CsvConnector::open(path, system, &config.connector_mapper)?
                .with_schema_filter(config.db_schema.clone());
            Ok(Box::new(connector))
        }
        #[cfg(feature = "duckdb-backend")]
        DuckDbSource::NAME => {
            let path = config
                .db_name
                .as_deref()
                .ok_or(ConnectorError::MissingSetting {
                    connector: DuckDbSource::NAME,
                    property: ConfigProperty::DbName.key(),
                })?;
            let source = DuckDbSource::open(path)?;
            let system = config.db_system.as_deref().unwrap_or(DuckDbSource::NAME);
            let connector = DatabaseConnector::new(source, system, &config.connector_mapper)?
                .with_schema(config.db_schema.clone());
            Ok(Box::new(connector))
        }
        _ => Err(ConnectorError::UnsupportedConnector {
            name: config.connector.clone(),
            available: supported_connectors(),
        }),
    }
}

/// Sort columns by ordinal position and require the sequence 1..N
///
/// Gaps and duplicates both mean the metadata for `table` is incomplete.
pub fn order_by_ordinal(
    table: &TableRef,
    mut columns: Vec<ColumnDescriptor>,
) -> Result<Vec<ColumnDescriptor>, ConnectorError> {
    columns.sort_by_key(|c| c.ordinal_position);
    for (index, column) in columns.iter().enumerate() {
        let expected = index as u32 + 1;
        if column.ordinal_position != expected {
            return Err(ConnectorError::OrdinalGap {
                table: table.to_string(),
                expected,
                found: column.ordinal_position,
            });
        }
    }
    Ok(columns)
}
