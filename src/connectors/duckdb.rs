//! DuckDB metadata driver
//!
//! Reads table and column metadata from DuckDB's `information_schema`.

use super::database::MetadataSource;
use super::ConnectorError;
use crate::models::{ColumnDescriptor, TableRef, parse_nullable_flag};
use std::fmt;
use tracing::info;

const LIST_TABLES_SQL: &str = "SELECT table_schema, table_name
     FROM information_schema.tables
     WHERE table_type = 'BASE TABLE'
     ORDER BY table_schema, table_name";

const LIST_SCHEMA_TABLES_SQL: &str = "SELECT table_schema, table_name
     FROM information_schema.tables
     WHERE table_type = 'BASE TABLE' AND table_schema = ?1
     ORDER BY table_name";

const COLUMNS_SQL: &str = "SELECT ordinal_position, column_name, data_type,
            numeric_precision, numeric_scale, is_nullable
     FROM information_schema.columns
     WHERE table_schema = ?1 AND table_name = ?2";

/// DuckDB connection used as a [`MetadataSource`]
pub struct DuckDbSource {
    conn: ::duckdb::Connection,
    path: Option<String>,
}

impl DuckDbSource {
    /// Connector name and source system key
    pub const NAME: &'static str = "duckdb";

    /// Open a database file
    pub fn open(path: &str) -> Result<Self, ConnectorError> {
        let conn = ::duckdb::Connection::open(path)?;
        info!("Opened DuckDB database {}", path);
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database
    pub fn memory() -> Result<Self, ConnectorError> {
        let conn = ::duckdb::Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: ::duckdb::Connection) -> Self {
        Self { conn, path: None }
    }

    /// Database path, `None` when in memory
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The underlying connection
    pub fn connection(&self) -> &::duckdb::Connection {
        &self.conn
    }
}

impl fmt::Debug for DuckDbSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuckDbSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl MetadataSource for DuckDbSource {
    fn default_schema(&self) -> &str {
        "main"
    }

    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<TableRef>, ConnectorError> {
        let map_row = |row: &::duckdb::Row<'_>| -> ::duckdb::Result<TableRef> {
            Ok(TableRef::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        };

        let mut tables = Vec::new();
        match schema {
            Some(schema) => {
                let mut stmt = self.conn.prepare(LIST_SCHEMA_TABLES_SQL)?;
                for table in stmt.query_map([schema], map_row)? {
                    tables.push(table?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(LIST_TABLES_SQL)?;
                for table in stmt.query_map([], map_row)? {
                    tables.push(table?);
                }
            }
        }
        Ok(tables)
    }

    fn column_rows(&self, table: &TableRef) -> Result<Vec<ColumnDescriptor>, ConnectorError> {
        let schema = table
            .schema
            .as_deref()
            .unwrap_or_else(|| self.default_schema());

        let mut stmt = self.conn.prepare(COLUMNS_SQL)?;
        let rows = stmt.query_map([schema, table.name.as_str()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<i64>>(3)?,
                row.get::<_, Option<i64>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut columns = Vec::new();
        for row in rows {
            let (ordinal, name, data_type, precision, scale, nullable) = row?;
            let ordinal = u32::try_from(ordinal).map_err(|_| {
                ConnectorError::Database(format!(
                    "invalid ordinal position {ordinal} for column {name} of {table}"
                ))
            })?;
            columns.push(
                ColumnDescriptor::new(schema, table.name.as_str(), ordinal, name, data_type)
                    .with_numeric(
                        precision.and_then(|p| u32::try_from(p).ok()),
                        scale.and_then(|s| u32::try_from(s).ok()),
                    )
                    .with_nullable(parse_nullable_flag(&nullable)),
            );
        }
        Ok(columns)
    }
}
