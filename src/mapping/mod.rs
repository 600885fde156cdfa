//! Type-mapping tables
//!
//! One static table per (source system, dialect) pair translates native
//! column type names into Avro types. Tables are built once, on first use,
//! and are never mutated afterwards.
//!
//! # Example
//!
//! ```rust
//! use avro_schema_generator::mapping;
//! use avro_schema_generator::models::AvroType;
//!
//! let table = mapping::lookup("sqlserver", "debezium").unwrap();
//! assert_eq!(table.avro_type("bit", None, None).unwrap(), AvroType::boolean());
//!
//! let table = mapping::lookup("sqlserver", "jdbc").unwrap();
//! assert_eq!(table.avro_type("bit", None, None).unwrap(), AvroType::int());
//! ```

mod duckdb;
mod snowflake;
mod sqlserver;

use crate::models::{AvroType, AvroTypeError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

/// Errors raised while selecting or consulting a mapping table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// No table is registered for the (system, dialect) key
    #[error(
        "Invalid mapper: no type mapping for system '{system}' and dialect '{dialect}' (available: {})",
        .available.join(", ")
    )]
    InvalidMapper {
        system: String,
        dialect: String,
        available: Vec<String>,
    },

    /// The native type is absent from the selected table
    #[error("Unmapped type: '{native_type}' is not defined in mapping table {table}")]
    UnmappedType { native_type: String, table: String },

    /// The native type maps to a logical type whose parameters are invalid
    #[error("Cannot map '{native_type}' using mapping table {table}: {source}")]
    TypeParameters {
        native_type: String,
        table: String,
        #[source]
        source: AvroTypeError,
    },
}

/// How a mapping entry produces its Avro type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeConstructor {
    /// Always the same type
    Fixed(AvroType),
    /// `decimal`, parameterized from the column's own precision and scale
    Decimal,
}

impl TypeConstructor {
    /// Produce the Avro type, injecting numeric metadata for decimals
    pub fn build(&self, precision: Option<u32>, scale: Option<u32>) -> Result<AvroType, AvroTypeError> {
        match self {
            TypeConstructor::Fixed(avro_type) => Ok(*avro_type),
            TypeConstructor::Decimal => AvroType::decimal(precision, scale),
        }
    }
}

/// Identifies a mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapperKey {
    pub system: &'static str,
    pub dialect: &'static str,
}

impl fmt::Display for MapperKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.system, self.dialect)
    }
}

/// Immutable mapping from native type name to Avro type constructor
#[derive(Debug)]
pub struct MappingTable {
    key: MapperKey,
    entries: HashMap<&'static str, TypeConstructor>,
}

impl MappingTable {
    fn new(
        system: &'static str,
        dialect: &'static str,
        entries: &[(&'static str, TypeConstructor)],
    ) -> Self {
        Self {
            key: MapperKey { system, dialect },
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn key(&self) -> MapperKey {
        self.key
    }

    pub fn system(&self) -> &'static str {
        self.key.system
    }

    pub fn dialect(&self) -> &'static str {
        self.key.dialect
    }

    /// Number of native types covered
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Native type names covered by this table, sorted
    pub fn native_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Find the constructor for a native type
    ///
    /// The name is normalized first (see [`normalize_native_type`]). A missing
    /// entry is always an error; there is no fallback type.
    pub fn constructor(&self, native_type: &str) -> Result<TypeConstructor, MappingError> {
        let normalized = normalize_native_type(native_type);
        self.entries
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| MappingError::UnmappedType {
                native_type: native_type.to_string(),
                table: self.key.to_string(),
            })
    }

    /// Map a native type to its Avro type
    pub fn avro_type(
        &self,
        native_type: &str,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<AvroType, MappingError> {
        self.constructor(native_type)?
            .build(precision, scale)
            .map_err(|source| MappingError::TypeParameters {
                native_type: native_type.to_string(),
                table: self.key.to_string(),
                source,
            })
    }
}

static TYPE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(.*\)\s*$").unwrap());

/// Normalize a native type name for lookup
///
/// Trims whitespace, drops a trailing length/precision suffix such as
/// `(10,2)` or `(max)`, and lower-cases the result.
pub fn normalize_native_type(native_type: &str) -> String {
    TYPE_SUFFIX
        .replace(native_type.trim(), "")
        .trim()
        .to_lowercase()
}

static REGISTRY: Lazy<BTreeMap<MapperKey, MappingTable>> = Lazy::new(|| {
    [
        MappingTable::new("sqlserver", "debezium", sqlserver::DEBEZIUM),
        MappingTable::new("sqlserver", "jdbc", sqlserver::JDBC),
        MappingTable::new("snowflake", "jdbc", snowflake::JDBC),
        MappingTable::new("duckdb", "jdbc", duckdb::JDBC),
    ]
    .into_iter()
    .map(|table| (table.key, table))
    .collect()
});

/// Select the mapping table for a (system, dialect) pair
///
/// Keys are matched case-insensitively.
pub fn lookup(system: &str, dialect: &str) -> Result<&'static MappingTable, MappingError> {
    let system_lc = system.trim().to_lowercase();
    let dialect_lc = dialect.trim().to_lowercase();
    REGISTRY
        .values()
        .find(|table| table.key.system == system_lc && table.key.dialect == dialect_lc)
        .ok_or_else(|| MappingError::InvalidMapper {
            system: system.to_string(),
            dialect: dialect.to_string(),
            available: available_mappers().iter().map(ToString::to_string).collect(),
        })
}

/// All registered (system, dialect) keys, sorted
pub fn available_mappers() -> Vec<MapperKey> {
    REGISTRY.keys().copied().collect()
}
