//! Avro field model

use super::avro_type::AvroType;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A single field of an Avro record
///
/// Nullable fields are encoded as a null-first union with an explicit
/// `null` default, which is what Kafka Connect expects for optional columns.
///
/// # Example
///
/// ```rust
/// use avro_schema_generator::models::{AvroField, AvroType};
///
/// let field = AvroField::new("CustomerId", AvroType::long(), true);
/// assert_eq!(
///     field.to_value().to_string(),
///     r#"{"name":"CustomerId","type":["null","long"],"default":null}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvroField {
    pub name: String,
    pub avro_type: AvroType,
    pub nullable: bool,
}

impl AvroField {
    pub fn new(name: impl Into<String>, avro_type: AvroType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            avro_type,
            nullable,
        }
    }

    /// Render the field as its Avro JSON definition
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        if self.nullable {
            map.insert(
                "type".to_string(),
                Value::Array(vec![Value::from("null"), self.avro_type.obj()]),
            );
            map.insert("default".to_string(), Value::Null);
        } else {
            map.insert("type".to_string(), self.avro_type.obj());
        }
        Value::Object(map)
    }
}

impl fmt::Display for AvroField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.avro_type)?;
        if self.nullable {
            f.write_str(" (optional)")?;
        }
        Ok(())
    }
}

impl Serialize for AvroField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.nullable { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        if self.nullable {
            map.serialize_entry("type", &("null", &self.avro_type))?;
            map.serialize_entry("default", &())?;
        } else {
            map.serialize_entry("type", &self.avro_type)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_field() {
        let field = AvroField::new("id", AvroType::int(), false);
        assert_eq!(field.to_value(), json!({"name": "id", "type": "int"}));
    }

    #[test]
    fn test_nullable_field_is_null_first_union() {
        let field = AvroField::new("created", AvroType::timestamp_millis(), true);
        assert_eq!(
            field.to_value(),
            json!({
                "name": "created",
                "type": ["null", {"type": "long", "logicalType": "timestamp-millis"}],
                "default": null
            })
        );
    }

    #[test]
    fn test_serialize_matches_value() {
        let decimal = AvroType::decimal(Some(19), Some(4)).unwrap();
        for nullable in [true, false] {
            let field = AvroField::new("amount", decimal, nullable);
            assert_eq!(
                serde_json::to_string(&field).unwrap(),
                serde_json::to_string(&field.to_value()).unwrap()
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            AvroField::new("name", AvroType::string(), true).to_string(),
            "name: string (optional)"
        );
        assert_eq!(
            AvroField::new("id", AvroType::long(), false).to_string(),
            "id: long"
        );
    }
}
