//! Live database connector
//!
//! [`DatabaseConnector`] owns a driver implementing [`MetadataSource`] and
//! turns its raw metadata rows into ordered column lists. The driver's
//! connection lives as long as the connector and is closed when the
//! connector is dropped.

use super::{Connector, ConnectorError, order_by_ordinal};
use crate::mapping::{self, MappingTable};
use crate::models::{ColumnDescriptor, TableRef};
use tracing::{debug, info};

/// Driver seam for live metadata queries
pub trait MetadataSource {
    /// Schema used when a table reference has none
    fn default_schema(&self) -> &str;

    /// Base tables, optionally restricted to one schema
    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<TableRef>, ConnectorError>;

    /// One descriptor per column row returned by the driver, in driver order
    ///
    /// `table.schema` is always set when called by [`DatabaseConnector`].
    fn column_rows(&self, table: &TableRef) -> Result<Vec<ColumnDescriptor>, ConnectorError>;
}

/// Connector backed by a live database
#[derive(Debug)]
pub struct DatabaseConnector<S: MetadataSource> {
    source: S,
    mapping: &'static MappingTable,
    schema: Option<String>,
}

impl<S: MetadataSource> DatabaseConnector<S> {
    /// Wrap an open driver and select the (system, dialect) mapping table
    pub fn new(source: S, system: &str, dialect: &str) -> Result<Self, ConnectorError> {
        let mapping = mapping::lookup(system, dialect)?;
        Ok(Self {
            source,
            mapping,
            schema: None,
        })
    }

    /// Schema for table listing and for unqualified table names
    pub fn with_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }

    /// The underlying driver
    pub fn source(&self) -> &S {
        &self.source
    }

    fn qualify(&self, table: &TableRef) -> TableRef {
        match &table.schema {
            Some(_) => table.clone(),
            None => TableRef::new(
                self.schema
                    .as_deref()
                    .unwrap_or_else(|| self.source.default_schema()),
                table.name.as_str(),
            ),
        }
    }
}

impl<S: MetadataSource> Connector for DatabaseConnector<S> {
    fn mapping(&self) -> &'static MappingTable {
        self.mapping
    }

    fn list_tables(&self) -> Result<Vec<TableRef>, ConnectorError> {
        let tables = self.source.list_tables(self.schema.as_deref())?;
        info!("Discovered {} tables", tables.len());
        Ok(tables)
    }

    fn list_columns(&self, table: &TableRef) -> Result<Vec<ColumnDescriptor>, ConnectorError> {
        let table = self.qualify(table);
        let rows = self.source.column_rows(&table)?;
        if rows.is_empty() {
            return Err(ConnectorError::TableNotFound(table.to_string()));
        }
        debug!("Fetched {} column rows for table {}", rows.len(), table);
        order_by_ordinal(&table, rows)
    }
}
