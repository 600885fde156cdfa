//! Avro type model
//!
//! A closed set of the Avro types this crate emits: the primitive types, and
//! the logical types that sit on top of a primitive (`date`, `decimal`,
//! `timestamp-millis`, `time-millis`).

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing an Avro type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvroTypeError {
    /// Logical type parameters are missing or inconsistent
    #[error("Invalid parameters for logical type '{logical_type}': {reason}")]
    InvalidTypeParameters {
        logical_type: &'static str,
        reason: String,
    },
}

/// Avro primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Bytes,
    Double,
    Float,
    Int,
    Long,
    Null,
    String,
}

impl PrimitiveType {
    /// Canonical Avro name of the primitive
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Bytes => "bytes",
            PrimitiveType::Double => "double",
            PrimitiveType::Float => "float",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Null => "null",
            PrimitiveType::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Avro logical type together with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// Days since the unix epoch, stored as `int`
    Date,
    /// Arbitrary-precision decimal, stored as `bytes`
    Decimal { precision: u32, scale: u32 },
    /// Milliseconds since the unix epoch, stored as `long`
    TimestampMillis,
    /// Milliseconds after midnight, stored as `int`
    TimeMillis,
}

impl LogicalType {
    /// Value of the `logicalType` attribute
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Date => "date",
            LogicalType::Decimal { .. } => "decimal",
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimeMillis => "time-millis",
        }
    }

    /// Primitive type the logical type annotates
    pub fn underlying(&self) -> PrimitiveType {
        match self {
            LogicalType::Date | LogicalType::TimeMillis => PrimitiveType::Int,
            LogicalType::Decimal { .. } => PrimitiveType::Bytes,
            LogicalType::TimestampMillis => PrimitiveType::Long,
        }
    }

    /// Extra attributes in serialization order
    pub fn params(&self) -> Vec<(&'static str, u32)> {
        match self {
            LogicalType::Decimal { precision, scale } => {
                vec![("scale", *scale), ("precision", *precision)]
            }
            _ => Vec::new(),
        }
    }
}

/// An Avro type as it appears in a field definition
///
/// Primitive types serialize to their bare name (`"long"`); logical types
/// serialize to an object with `type`, any parameters, then `logicalType`.
///
/// # Example
///
/// ```rust
/// use avro_schema_generator::models::AvroType;
///
/// let decimal = AvroType::decimal(Some(10), Some(2)).unwrap();
/// assert_eq!(
///     decimal.obj().to_string(),
///     r#"{"type":"bytes","scale":2,"precision":10,"logicalType":"decimal"}"#
/// );
/// assert_eq!(AvroType::long().obj(), "long");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvroType {
    Primitive(PrimitiveType),
    Logical(LogicalType),
}

impl AvroType {
    pub const fn boolean() -> Self {
        AvroType::Primitive(PrimitiveType::Boolean)
    }

    pub const fn bytes() -> Self {
        AvroType::Primitive(PrimitiveType::Bytes)
    }

    pub const fn double() -> Self {
        AvroType::Primitive(PrimitiveType::Double)
    }

    pub const fn float() -> Self {
        AvroType::Primitive(PrimitiveType::Float)
    }

    pub const fn int() -> Self {
        AvroType::Primitive(PrimitiveType::Int)
    }

    pub const fn long() -> Self {
        AvroType::Primitive(PrimitiveType::Long)
    }

    pub const fn null() -> Self {
        AvroType::Primitive(PrimitiveType::Null)
    }

    pub const fn string() -> Self {
        AvroType::Primitive(PrimitiveType::String)
    }

    pub const fn date() -> Self {
        AvroType::Logical(LogicalType::Date)
    }

    pub const fn timestamp_millis() -> Self {
        AvroType::Logical(LogicalType::TimestampMillis)
    }

    pub const fn time_millis() -> Self {
        AvroType::Logical(LogicalType::TimeMillis)
    }

    /// Build a `decimal` logical type
    ///
    /// Both `precision` and `scale` are required. Precision must be at least 1
    /// and scale may not exceed precision.
    pub fn decimal(precision: Option<u32>, scale: Option<u32>) -> Result<Self, AvroTypeError> {
        let invalid = |reason: String| AvroTypeError::InvalidTypeParameters {
            logical_type: "decimal",
            reason,
        };

        let (precision, scale) = match (precision, scale) {
            (Some(p), Some(s)) => (p, s),
            (None, None) => return Err(invalid("precision and scale are required".to_string())),
            (None, Some(_)) => return Err(invalid("precision is required".to_string())),
            (Some(_), None) => return Err(invalid("scale is required".to_string())),
        };

        if precision == 0 {
            return Err(invalid("precision must be a positive integer".to_string()));
        }
        if scale > precision {
            return Err(invalid(format!(
                "scale ({scale}) must not exceed precision ({precision})"
            )));
        }

        Ok(AvroType::Logical(LogicalType::Decimal { precision, scale }))
    }

    /// Canonical name: the primitive name, or the logical type name
    pub fn name(&self) -> &'static str {
        match self {
            AvroType::Primitive(p) => p.name(),
            AvroType::Logical(l) => l.name(),
        }
    }

    /// Serialized representation used inside field definitions
    pub fn obj(&self) -> Value {
        match self {
            AvroType::Primitive(p) => Value::String(p.name().to_string()),
            AvroType::Logical(l) => {
                let mut map = Map::new();
                map.insert("type".to_string(), Value::from(l.underlying().name()));
                for (key, value) in l.params() {
                    map.insert(key.to_string(), Value::from(value));
                }
                map.insert("logicalType".to_string(), Value::from(l.name()));
                Value::Object(map)
            }
        }
    }
}

impl fmt::Display for AvroType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PrimitiveType> for AvroType {
    fn from(p: PrimitiveType) -> Self {
        AvroType::Primitive(p)
    }
}

impl Serialize for AvroType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AvroType::Primitive(p) => serializer.serialize_str(p.name()),
            AvroType::Logical(l) => {
                let params = l.params();
                let mut map = serializer.serialize_map(Some(params.len() + 2))?;
                map.serialize_entry("type", l.underlying().name())?;
                for (key, value) in &params {
                    map.serialize_entry(key, value)?;
                }
                map.serialize_entry("logicalType", l.name())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_serializes_to_bare_name() {
        assert_eq!(AvroType::boolean().obj(), json!("boolean"));
        assert_eq!(AvroType::bytes().obj(), json!("bytes"));
        assert_eq!(AvroType::double().obj(), json!("double"));
        assert_eq!(AvroType::float().obj(), json!("float"));
        assert_eq!(AvroType::int().obj(), json!("int"));
        assert_eq!(AvroType::long().obj(), json!("long"));
        assert_eq!(AvroType::null().obj(), json!("null"));
        assert_eq!(AvroType::string().obj(), json!("string"));
    }

    #[test]
    fn test_logical_types_embed_underlying_primitive() {
        assert_eq!(
            AvroType::date().obj(),
            json!({"type": "int", "logicalType": "date"})
        );
        assert_eq!(
            AvroType::timestamp_millis().obj(),
            json!({"type": "long", "logicalType": "timestamp-millis"})
        );
        assert_eq!(
            AvroType::time_millis().obj(),
            json!({"type": "int", "logicalType": "time-millis"})
        );
    }

    #[test]
    fn test_decimal_key_order_is_stable() {
        let decimal = AvroType::decimal(Some(18), Some(4)).unwrap();
        assert_eq!(
            serde_json::to_string(&decimal.obj()).unwrap(),
            r#"{"type":"bytes","scale":4,"precision":18,"logicalType":"decimal"}"#
        );
        // Direct serialization matches the Value form
        assert_eq!(
            serde_json::to_string(&decimal).unwrap(),
            serde_json::to_string(&decimal.obj()).unwrap()
        );
    }

    #[test]
    fn test_decimal_requires_precision_and_scale() {
        for (precision, scale) in [(None, None), (Some(10), None), (None, Some(2))] {
            let err = AvroType::decimal(precision, scale).unwrap_err();
            assert!(matches!(
                err,
                AvroTypeError::InvalidTypeParameters {
                    logical_type: "decimal",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_decimal_rejects_scale_above_precision() {
        let err = AvroType::decimal(Some(4), Some(6)).unwrap_err();
        assert!(err.to_string().contains("scale (6) must not exceed precision (4)"));
        assert!(AvroType::decimal(Some(0), Some(0)).is_err());
    }

    #[test]
    fn test_decimal_allows_zero_scale() {
        let decimal = AvroType::decimal(Some(10), Some(0)).unwrap();
        assert_eq!(
            decimal,
            AvroType::Logical(LogicalType::Decimal {
                precision: 10,
                scale: 0
            })
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(AvroType::long().name(), "long");
        assert_eq!(AvroType::date().name(), "date");
        assert_eq!(
            AvroType::decimal(Some(5), Some(2)).unwrap().to_string(),
            "decimal"
        );
    }
}
