//! Column descriptor model

use serde::{Deserialize, Serialize};

/// Normalized description of one physical column of a source table
///
/// Connectors build one descriptor per metadata row (a CSV line or a row
/// returned by the database driver). Descriptors are never modified after
/// construction.
///
/// # Example
///
/// ```rust
/// use avro_schema_generator::models::ColumnDescriptor;
///
/// let column = ColumnDescriptor::new("dbo", "Orders", 1, "OrderId", "bigint")
///     .with_nullable(false);
/// assert_eq!(column.ordinal_position, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Database schema the table belongs to
    pub table_schema: String,
    /// Table name
    pub table_name: String,
    /// 1-based position of the column within its table
    pub ordinal_position: u32,
    /// Column name
    pub column_name: String,
    /// Native type name, the key into a mapping table
    pub native_data_type: String,
    /// Numeric precision (decimal types)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_precision: Option<u32>,
    /// Numeric scale (decimal types)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_scale: Option<u32>,
    /// Whether the column allows NULL values
    pub is_nullable: bool,
}

impl ColumnDescriptor {
    /// Create a nullable descriptor without numeric metadata
    pub fn new(
        table_schema: impl Into<String>,
        table_name: impl Into<String>,
        ordinal_position: u32,
        column_name: impl Into<String>,
        native_data_type: impl Into<String>,
    ) -> Self {
        Self {
            table_schema: table_schema.into(),
            table_name: table_name.into(),
            ordinal_position,
            column_name: column_name.into(),
            native_data_type: native_data_type.into(),
            numeric_precision: None,
            numeric_scale: None,
            is_nullable: true,
        }
    }

    /// Set numeric precision and scale
    pub fn with_numeric(mut self, precision: Option<u32>, scale: Option<u32>) -> Self {
        self.numeric_precision = precision;
        self.numeric_scale = scale;
        self
    }

    /// Set nullability
    pub fn with_nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }
}

/// Interpret a metadata nullability flag (`YES`, `TRUE`, `1`; case-insensitive)
pub fn parse_nullable_flag(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "YES" | "TRUE" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nullable_flag() {
        assert!(parse_nullable_flag("YES"));
        assert!(parse_nullable_flag("yes"));
        assert!(parse_nullable_flag("True"));
        assert!(parse_nullable_flag("1"));
        assert!(!parse_nullable_flag("NO"));
        assert!(!parse_nullable_flag("0"));
        assert!(!parse_nullable_flag(""));
    }

    #[test]
    fn test_builder() {
        let column = ColumnDescriptor::new("dbo", "Orders", 3, "Total", "decimal")
            .with_numeric(Some(18), Some(2))
            .with_nullable(false);
        assert_eq!(column.numeric_precision, Some(18));
        assert_eq!(column.numeric_scale, Some(2));
        assert!(!column.is_nullable);
    }
}
