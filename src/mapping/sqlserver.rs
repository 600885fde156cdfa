//! SQL Server mapping tables
//!
//! Keys are the type names SQL Server reports in `INFORMATION_SCHEMA.COLUMNS`.
//! The Debezium and JDBC tables differ only for `bit` and `datetimeoffset`,
//! matching what each Kafka Connect connector emits for those columns.

use super::TypeConstructor::{self, Decimal, Fixed};
use crate::models::AvroType;

pub(super) const DEBEZIUM: &[(&str, TypeConstructor)] = &[
    ("bigint", Fixed(AvroType::long())),
    ("binary", Fixed(AvroType::bytes())),
    ("bit", Fixed(AvroType::boolean())),
    ("char", Fixed(AvroType::string())),
    ("date", Fixed(AvroType::date())),
    ("datetime", Fixed(AvroType::timestamp_millis())),
    ("datetime2", Fixed(AvroType::timestamp_millis())),
    ("datetimeoffset", Fixed(AvroType::string())),
    ("decimal", Decimal),
    ("float", Fixed(AvroType::double())),
    ("int", Fixed(AvroType::int())),
    ("money", Decimal),
    ("nchar", Fixed(AvroType::string())),
    ("numeric", Decimal),
    ("nvarchar", Fixed(AvroType::string())),
    ("ntext", Fixed(AvroType::string())),
    ("real", Fixed(AvroType::float())),
    ("smalldatetime", Fixed(AvroType::timestamp_millis())),
    ("smallint", Fixed(AvroType::int())),
    ("smallmoney", Decimal),
    ("text", Fixed(AvroType::string())),
    ("time", Fixed(AvroType::time_millis())),
    ("tinyint", Fixed(AvroType::int())),
    ("uniqueidentifier", Fixed(AvroType::string())),
    ("varbinary", Fixed(AvroType::bytes())),
    ("varchar", Fixed(AvroType::string())),
    ("xml", Fixed(AvroType::string())),
];

pub(super) const JDBC: &[(&str, TypeConstructor)] = &[
    ("bigint", Fixed(AvroType::long())),
    ("binary", Fixed(AvroType::bytes())),
    ("bit", Fixed(AvroType::int())),
    ("char", Fixed(AvroType::string())),
    ("date", Fixed(AvroType::date())),
    ("datetime", Fixed(AvroType::timestamp_millis())),
    ("datetime2", Fixed(AvroType::timestamp_millis())),
    ("datetimeoffset", Fixed(AvroType::timestamp_millis())),
    ("decimal", Decimal),
    ("float", Fixed(AvroType::double())),
    ("int", Fixed(AvroType::int())),
    ("money", Decimal),
    ("nchar", Fixed(AvroType::string())),
    ("numeric", Decimal),
    ("nvarchar", Fixed(AvroType::string())),
    ("ntext", Fixed(AvroType::string())),
    ("real", Fixed(AvroType::float())),
    ("smalldatetime", Fixed(AvroType::timestamp_millis())),
    ("smallint", Fixed(AvroType::int())),
    ("smallmoney", Decimal),
    ("text", Fixed(AvroType::string())),
    ("time", Fixed(AvroType::time_millis())),
    ("tinyint", Fixed(AvroType::int())),
    ("uniqueidentifier", Fixed(AvroType::string())),
    ("varbinary", Fixed(AvroType::bytes())),
    ("varchar", Fixed(AvroType::string())),
    ("xml", Fixed(AvroType::string())),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_dialects_cover_the_same_types() {
        let debezium: Vec<_> = DEBEZIUM.iter().map(|(name, _)| *name).collect();
        let jdbc: Vec<_> = JDBC.iter().map(|(name, _)| *name).collect();
        assert_eq!(debezium, jdbc);
    }

    #[test]
    fn test_dialects_diverge_only_on_bit_and_datetimeoffset() {
        let jdbc: HashMap<_, _> = JDBC.iter().copied().collect();
        let diverging: Vec<_> = DEBEZIUM
            .iter()
            .filter(|(name, constructor)| jdbc[name] != *constructor)
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(diverging, vec!["bit", "datetimeoffset"]);
    }
}
