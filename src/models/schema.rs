//! Avro record schema model

use super::field::AvroField;
use serde::Serialize;
use serde_json::{Map, Value};

/// Avro record schema generated for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Record name (the table name)
    pub name: String,
    /// Record namespace; omitted from the document when not configured
    pub namespace: Option<String>,
    /// Fields in ordinal position order
    pub fields: Vec<AvroField>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>, namespace: Option<String>, fields: Vec<AvroField>) -> Self {
        Self {
            name: name.into(),
            namespace,
            fields,
        }
    }

    /// Render the schema document
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from("record"));
        map.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(namespace) = &self.namespace {
            map.insert("namespace".to_string(), Value::String(namespace.clone()));
        }
        map.insert(
            "fields".to_string(),
            Value::Array(self.fields.iter().map(AvroField::to_value).collect()),
        );
        Value::Object(map)
    }

    /// Serialize as JSON indented with four spaces
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.to_value().serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Output file name: `<namespace>_<name>.avsc` with dots replaced by underscores
    pub fn file_name(&self) -> String {
        let stem = match &self.namespace {
            Some(namespace) => format!("{}_{}", namespace, self.name),
            None => self.name.clone(),
        };
        format!("{}.avsc", stem.replace('.', "_"))
    }
}
