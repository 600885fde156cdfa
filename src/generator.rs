//! Schema generation
//!
//! Turns the columns a [`Connector`] reports for a table into an Avro
//! [`RecordSchema`], and drives the whole configured run with [`run`].

use crate::config::Configuration;
use crate::connectors::{Connector, ConnectorError, open_connector};
use crate::export::{AvscExporter, ExportError};
use crate::mapping::MappingError;
use crate::models::{AvroField, RecordSchema, TableRef};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while generating schemas
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// A column could not be mapped; the table's schema is not produced
    #[error("Column '{column}' of table {table}: {source}")]
    Column {
        table: String,
        column: String,
        #[source]
        source: MappingError,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl GenerateError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            GenerateError::Connector(err) => err.user_message(),
            GenerateError::Column {
                source: MappingError::UnmappedType { .. },
                ..
            } => format!(
                "ERROR {self}\n\nHint: Add the native type to the mapping table or pick another connector_mapper."
            ),
            _ => format!("ERROR {self}"),
        }
    }
}

/// Build the record schema for one table
///
/// Fields follow the connector's ordinal order. A field is nullable when
/// the column is nullable or `avro_all_nullable` is set. The first column
/// that cannot be mapped aborts the table.
pub fn get_schema(
    connector: &dyn Connector,
    table: &TableRef,
    schema_name: &str,
    config: &Configuration,
) -> Result<RecordSchema, GenerateError> {
    let mapping = connector.mapping();
    let columns = connector.list_columns(table)?;

    let mut fields = Vec::with_capacity(columns.len());
    for column in &columns {
        let avro_type = mapping
            .avro_type(
                &column.native_data_type,
                column.numeric_precision,
                column.numeric_scale,
            )
            .map_err(|source| GenerateError::Column {
                table: table.to_string(),
                column: column.column_name.clone(),
                source,
            })?;
        let nullable = config.avro_all_nullable || column.is_nullable;
        debug!(
            "Mapped {}.{} ({}) to {}{}",
            table,
            column.column_name,
            column.native_data_type,
            avro_type,
            if nullable { " (optional)" } else { "" }
        );
        fields.push(AvroField::new(column.column_name.as_str(), avro_type, nullable));
    }

    info!(
        "Generated schema {} for table {} ({} fields)",
        schema_name,
        table,
        fields.len()
    );
    Ok(RecordSchema::new(
        schema_name,
        config.avro_namespace.clone(),
        fields,
    ))
}

/// Tables to generate: the configured list, else everything the connector lists
pub fn resolve_tables(
    connector: &dyn Connector,
    config: &Configuration,
) -> Result<Vec<TableRef>, GenerateError> {
    match config.tables() {
        Some(tables) if !tables.is_empty() => Ok(tables),
        _ => Ok(connector.list_tables()?),
    }
}

/// Generate and write a schema file for every selected table
///
/// Returns the written paths in table order. The first failing table stops
/// the run; files already written are kept. File names come from the table
/// name alone, so same-named tables from different schemas share one file
/// and the last one listed wins.
pub fn run(config: &Configuration) -> Result<Vec<PathBuf>, GenerateError> {
    let connector = open_connector(config)?;
    let tables = resolve_tables(connector.as_ref(), config)?;
    if tables.is_empty() {
        warn!("No tables selected, nothing to generate");
        return Ok(Vec::new());
    }

    let exporter = AvscExporter::new(&config.avro_output_path);
    let mut written = Vec::with_capacity(tables.len());
    let mut seen = HashSet::new();
    for table in &tables {
        let schema = get_schema(connector.as_ref(), table, &table.name, config)?;
        let path = exporter.write(&schema)?;
        if !seen.insert(path.clone()) {
            warn!(
                "Schema file {} was already written in this run; table {} overwrote it",
                path.display(),
                table
            );
        }
        written.push(path);
    }

    info!(
        "Generated {} schema files in {}",
        written.len(),
        exporter.output_dir().display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{self, MappingTable};
    use crate::models::{AvroType, ColumnDescriptor};
    use serde_json::json;

    struct StaticConnector {
        mapping: &'static MappingTable,
        columns: Vec<ColumnDescriptor>,
    }

    impl StaticConnector {
        fn new(columns: Vec<ColumnDescriptor>) -> Self {
            Self {
                mapping: mapping::lookup("sqlserver", "debezium").unwrap(),
                columns,
            }
        }
    }

    impl Connector for StaticConnector {
        fn mapping(&self) -> &'static MappingTable {
            self.mapping
        }

        fn list_tables(&self) -> Result<Vec<TableRef>, ConnectorError> {
            Ok(vec![TableRef::new("dbo", "Orders")])
        }

        fn list_columns(&self, table: &TableRef) -> Result<Vec<ColumnDescriptor>, ConnectorError> {
            crate::connectors::order_by_ordinal(table, self.columns.clone())
        }
    }

    fn orders() -> StaticConnector {
        StaticConnector::new(vec![
            ColumnDescriptor::new("dbo", "Orders", 2, "Total", "decimal")
                .with_numeric(Some(18), Some(2))
                .with_nullable(false),
            ColumnDescriptor::new("dbo", "Orders", 1, "OrderId", "bigint").with_nullable(false),
            ColumnDescriptor::new("dbo", "Orders", 3, "Note", "nvarchar"),
        ])
    }

    #[test]
    fn test_get_schema() {
        let config = Configuration::new("csv", "debezium").with_namespace("com.example");
        let schema = get_schema(
            &orders(),
            &TableRef::new("dbo", "Orders"),
            "Orders",
            &config,
        )
        .unwrap();

        assert_eq!(
            schema.to_value(),
            json!({
                "type": "record",
                "name": "Orders",
                "namespace": "com.example",
                "fields": [
                    {"name": "OrderId", "type": "long"},
                    {"name": "Total", "type": {"type": "bytes", "scale": 2, "precision": 18, "logicalType": "decimal"}},
                    {"name": "Note", "type": ["null", "string"], "default": null}
                ]
            })
        );
    }

    #[test]
    fn test_all_nullable_overrides_columns() {
        let config = Configuration::new("csv", "debezium").with_all_nullable(true);
        let schema = get_schema(
            &orders(),
            &TableRef::new("dbo", "Orders"),
            "Orders",
            &config,
        )
        .unwrap();
        assert!(schema.fields.iter().all(|f| f.nullable));
        assert_eq!(schema.namespace, None);
    }

    #[test]
    fn test_unmapped_column_aborts_table() {
        let connector = StaticConnector::new(vec![
            ColumnDescriptor::new("dbo", "Shapes", 1, "Id", "int"),
            ColumnDescriptor::new("dbo", "Shapes", 2, "Area", "geography"),
        ]);
        let config = Configuration::new("csv", "debezium");
        let err = get_schema(
            &connector,
            &TableRef::new("dbo", "Shapes"),
            "Shapes",
            &config,
        )
        .unwrap_err();

        match &err {
            GenerateError::Column { column, source, .. } => {
                assert_eq!(column, "Area");
                assert!(matches!(source, MappingError::UnmappedType { native_type, .. } if native_type == "geography"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.user_message().contains("Hint"));
    }

    #[test]
    fn test_decimal_uses_column_metadata() {
        let connector = StaticConnector::new(vec![
            ColumnDescriptor::new("dbo", "Prices", 1, "Small", "numeric").with_numeric(Some(5), Some(1)),
            ColumnDescriptor::new("dbo", "Prices", 2, "Large", "numeric").with_numeric(Some(38), Some(10)),
        ]);
        let config = Configuration::new("csv", "debezium");
        let schema = get_schema(
            &connector,
            &TableRef::new("dbo", "Prices"),
            "Prices",
            &config,
        )
        .unwrap();
        assert_eq!(schema.fields[0].avro_type, AvroType::decimal(Some(5), Some(1)).unwrap());
        assert_eq!(schema.fields[1].avro_type, AvroType::decimal(Some(38), Some(10)).unwrap());
    }

    #[test]
    fn test_resolve_tables_prefers_configured_list() {
        let connector = orders();
        let config = Configuration::new("csv", "debezium")
            .with_db_schema("sales")
            .with_tables("Invoices");
        assert_eq!(
            resolve_tables(&connector, &config).unwrap(),
            vec![TableRef::new("sales", "Invoices")]
        );

        let config = Configuration::new("csv", "debezium");
        assert_eq!(
            resolve_tables(&connector, &config).unwrap(),
            vec![TableRef::new("dbo", "Orders")]
        );
    }
}
