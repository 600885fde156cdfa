//! Table reference model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a source table by schema and name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableRef {
    /// Database schema; `None` lets the connector resolve it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Table name
    pub name: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// A table reference without a schema
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Parse `schema.table` or `table`
    ///
    /// A bare table name takes `default_schema` when one is given. Only the
    /// first dot separates schema from table.
    pub fn parse(entry: &str, default_schema: Option<&str>) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        match entry.split_once('.') {
            Some((schema, name)) if !schema.trim().is_empty() && !name.trim().is_empty() => {
                Some(Self::new(schema.trim(), name.trim()))
            }
            Some(_) => None,
            None => Some(Self {
                schema: default_schema.map(str::to_string),
                name: entry.to_string(),
            }),
        }
    }

    /// Parse a comma-separated table list, skipping empty entries
    pub fn parse_list(list: &str, default_schema: Option<&str>) -> Vec<Self> {
        list.split(',')
            .filter_map(|entry| Self::parse(entry, default_schema))
            .collect()
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(&self.name),
        }
    }
}
