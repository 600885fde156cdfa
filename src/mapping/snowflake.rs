//! Snowflake mapping tables

use super::TypeConstructor::{self, Decimal, Fixed};
use crate::models::AvroType;

pub(super) const JDBC: &[(&str, TypeConstructor)] = &[
    ("boolean", Fixed(AvroType::boolean())),
    ("float", Fixed(AvroType::float())),
    ("number", Decimal),
    ("text", Fixed(AvroType::string())),
    ("timestamp", Fixed(AvroType::timestamp_millis())),
];
