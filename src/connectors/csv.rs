//! CSV metadata connector
//!
//! Reads an `information_schema.columns`-style export. The header row must
//! name the columns `TABLE_NAME`, `TABLE_SCHEMA`, `ORDINAL_POSITION`,
//! `COLUMN_NAME`, `DATA_TYPE`, `NUMERIC_PRECISION`, `NUMERIC_SCALE` and
//! `IS_NULLABLE`, in any order. Extra columns are ignored.

use super::{Connector, ConnectorError, order_by_ordinal};
use crate::mapping::{self, MappingTable};
use crate::models::{ColumnDescriptor, TableRef, parse_nullable_flag};
use ::csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header names a metadata file must provide
pub const REQUIRED_HEADERS: [&str; 8] = [
    "TABLE_NAME",
    "TABLE_SCHEMA",
    "ORDINAL_POSITION",
    "COLUMN_NAME",
    "DATA_TYPE",
    "NUMERIC_PRECISION",
    "NUMERIC_SCALE",
    "IS_NULLABLE",
];

#[derive(Debug, Deserialize)]
struct MetadataRow {
    #[serde(rename = "TABLE_NAME")]
    table_name: String,
    #[serde(rename = "TABLE_SCHEMA")]
    table_schema: String,
    #[serde(rename = "ORDINAL_POSITION")]
    ordinal_position: u32,
    #[serde(rename = "COLUMN_NAME")]
    column_name: String,
    #[serde(rename = "DATA_TYPE")]
    data_type: String,
    // Exports write NULL or leave the cell blank for non-numeric columns
    #[serde(rename = "NUMERIC_PRECISION", deserialize_with = "::csv::invalid_option")]
    numeric_precision: Option<u32>,
    #[serde(rename = "NUMERIC_SCALE", deserialize_with = "::csv::invalid_option")]
    numeric_scale: Option<u32>,
    #[serde(rename = "IS_NULLABLE")]
    is_nullable: String,
}

type TableIndex = BTreeMap<String, BTreeMap<String, Vec<ColumnDescriptor>>>;

/// Connector over a CSV metadata export
///
/// The whole file is read when the connector is opened and the file handle
/// is released before `open` returns.
///
/// # Example
///
/// ```rust,no_run
/// use avro_schema_generator::connectors::{Connector, CsvConnector};
/// use avro_schema_generator::models::TableRef;
///
/// let connector = CsvConnector::open("columns.csv", "sqlserver", "debezium")?;
/// let columns = connector.list_columns(&TableRef::new("dbo", "Orders"))?;
/// # Ok::<(), avro_schema_generator::connectors::ConnectorError>(())
/// ```
#[derive(Debug)]
pub struct CsvConnector {
    path: PathBuf,
    mapping: &'static MappingTable,
    schema_filter: Option<String>,
    tables: TableIndex,
}

impl CsvConnector {
    /// Connector name used in configuration
    pub const NAME: &'static str = "csv";

    /// Load a metadata file and select the (system, dialect) mapping table
    pub fn open(
        path: impl AsRef<Path>,
        system: &str,
        dialect: &str,
    ) -> Result<Self, ConnectorError> {
        let mapping = mapping::lookup(system, dialect)?;
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|source| ConnectorError::Io {
            path: path.clone(),
            source,
        })?;
        let tables = read_metadata(&path, file)?;

        info!(
            "Loaded metadata for {} tables from {}",
            tables.values().map(BTreeMap::len).sum::<usize>(),
            path.display()
        );

        Ok(Self {
            path,
            mapping,
            schema_filter: None,
            tables,
        })
    }

    /// Restrict `list_tables` to one schema
    pub fn with_schema_filter(mut self, schema: Option<String>) -> Self {
        self.schema_filter = schema;
        self
    }

    /// Path the metadata was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn find_table(&self, table: &TableRef) -> Result<&Vec<ColumnDescriptor>, ConnectorError> {
        let not_found = || ConnectorError::TableNotFound(table.to_string());
        match &table.schema {
            Some(schema) => self
                .tables
                .get(schema)
                .and_then(|tables| tables.get(&table.name))
                .ok_or_else(not_found),
            None => {
                let matches: Vec<(&String, &Vec<ColumnDescriptor>)> = self
                    .tables
                    .iter()
                    .filter_map(|(schema, tables)| tables.get(&table.name).map(|c| (schema, c)))
                    .collect();
                match matches.as_slice() {
                    [] => Err(not_found()),
                    [(_, columns)] => Ok(columns),
                    _ => Err(ConnectorError::AmbiguousTable {
                        table: table.name.clone(),
                        schemas: matches.iter().map(|(s, _)| s.to_string()).collect(),
                    }),
                }
            }
        }
    }
}

impl Connector for CsvConnector {
    fn mapping(&self) -> &'static MappingTable {
        self.mapping
    }

    fn list_tables(&self) -> Result<Vec<TableRef>, ConnectorError> {
        let tables = self
            .tables
            .iter()
            .filter(|(schema, _)| {
                self.schema_filter
                    .as_deref()
                    .is_none_or(|filter| filter == schema.as_str())
            })
            .flat_map(|(schema, tables)| {
                tables
                    .keys()
                    .map(move |name| TableRef::new(schema.as_str(), name.as_str()))
            })
            .collect();
        Ok(tables)
    }

    fn list_columns(&self, table: &TableRef) -> Result<Vec<ColumnDescriptor>, ConnectorError> {
        let columns = self.find_table(table)?;
        debug!("Found {} columns for table {}", columns.len(), table);
        order_by_ordinal(table, columns.clone())
    }
}

fn read_metadata(path: &Path, file: File) -> Result<TableIndex, ConnectorError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|h| h.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ConnectorError::MissingHeaders {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut tables = TableIndex::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: MetadataRow = record.deserialize(Some(&headers))?;
        if row.ordinal_position == 0 {
            return Err(ConnectorError::InvalidRow {
                line,
                reason: "ORDINAL_POSITION must start at 1".to_string(),
            });
        }

        let column = ColumnDescriptor::new(
            row.table_schema,
            row.table_name,
            row.ordinal_position,
            row.column_name,
            row.data_type,
        )
        .with_numeric(row.numeric_precision, row.numeric_scale)
        .with_nullable(parse_nullable_flag(&row.is_nullable));

        tables
            .entry(column.table_schema.clone())
            .or_default()
            .entry(column.table_name.clone())
            .or_default()
            .push(column);
    }

    Ok(tables)
}
