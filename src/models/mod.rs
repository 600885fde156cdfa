//! Models module
//!
//! Value types shared by the connectors, the mapping tables and the schema
//! generator: Avro types and fields, record schemas, table references and
//! normalized column descriptors.

pub mod avro_type;
pub mod column;
pub mod field;
pub mod schema;
pub mod table;

pub use avro_type::{AvroType, AvroTypeError, LogicalType, PrimitiveType};
pub use column::{ColumnDescriptor, parse_nullable_flag};
pub use field::AvroField;
pub use schema::RecordSchema;
pub use table::TableRef;
