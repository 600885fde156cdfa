//! DuckDB mapping tables
//!
//! Keys are the type names DuckDB reports in `information_schema.columns`,
//! with any `(precision,scale)` suffix stripped by the lookup.

use super::TypeConstructor::{self, Decimal, Fixed};
use crate::models::AvroType;

pub(super) const JDBC: &[(&str, TypeConstructor)] = &[
    ("bigint", Fixed(AvroType::long())),
    ("blob", Fixed(AvroType::bytes())),
    ("boolean", Fixed(AvroType::boolean())),
    ("date", Fixed(AvroType::date())),
    ("decimal", Decimal),
    ("double", Fixed(AvroType::double())),
    ("float", Fixed(AvroType::float())),
    ("integer", Fixed(AvroType::int())),
    ("smallint", Fixed(AvroType::int())),
    ("time", Fixed(AvroType::time_millis())),
    ("timestamp", Fixed(AvroType::timestamp_millis())),
    ("timestamp with time zone", Fixed(AvroType::timestamp_millis())),
    ("tinyint", Fixed(AvroType::int())),
    ("uuid", Fixed(AvroType::string())),
    ("varchar", Fixed(AvroType::string())),
];
