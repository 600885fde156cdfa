//! Configuration for schema generation
//!
//! Options come from a configuration file, from command-line flags, or from
//! a plain key/value map. All three end up in [`Configuration::from_properties`].

use crate::models::TableRef;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default configuration file, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = ".config";

/// Recognized configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigProperty {
    Connector,
    Mapper,
    CsvPath,
    Tables,
    DbSystem,
    DbServer,
    DbName,
    DbSchema,
    Namespace,
    OutputDir,
    AllNullable,
}

impl ConfigProperty {
    pub const ALL: [ConfigProperty; 11] = [
        ConfigProperty::Connector,
        ConfigProperty::Mapper,
        ConfigProperty::CsvPath,
        ConfigProperty::Tables,
        ConfigProperty::DbSystem,
        ConfigProperty::DbServer,
        ConfigProperty::DbName,
        ConfigProperty::DbSchema,
        ConfigProperty::Namespace,
        ConfigProperty::OutputDir,
        ConfigProperty::AllNullable,
    ];

    /// Key as written in configuration files
    pub fn key(&self) -> &'static str {
        match self {
            ConfigProperty::Connector => "connector",
            ConfigProperty::Mapper => "connector_mapper",
            ConfigProperty::CsvPath => "connector_csv_path",
            ConfigProperty::Tables => "connector_tables",
            ConfigProperty::DbSystem => "db_system",
            ConfigProperty::DbServer => "db_server",
            ConfigProperty::DbName => "db_name",
            ConfigProperty::DbSchema => "db_schema",
            ConfigProperty::Namespace => "avro_namespace",
            ConfigProperty::OutputDir => "avro_output_path",
            ConfigProperty::AllNullable => "avro_all_nullable",
        }
    }

    fn is_known(key: &str) -> bool {
        Self::ALL.iter().any(|p| p.key() == key)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required properties are missing
    #[error("Missing configuration property/ies: {}.", .0.join(", "))]
    MissingProperties(Vec<String>),

    /// Configuration file could not be read
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid
    #[error("Invalid configuration file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl ConfigError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::MissingProperties(_) => format!(
                "ERROR {self}\n\nHint: Set them in the {DEFAULT_CONFIG_FILE} file or pass --connector and --mapper."
            ),
            _ => format!("ERROR {self}"),
        }
    }
}

/// Raw key/value properties; `None` marks a key present without a value
pub type Properties = BTreeMap<String, Option<String>>;

/// Resolved generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Connector variant (`csv`, `duckdb`)
    pub connector: String,
    /// Dialect key of the mapping table
    pub connector_mapper: String,
    /// Metadata CSV file for the `csv` connector
    pub connector_csv_path: Option<PathBuf>,
    /// Comma-separated explicit table list
    pub connector_tables: Option<String>,
    /// Source system key of the mapping table
    pub db_system: Option<String>,
    pub db_server: Option<String>,
    pub db_name: Option<String>,
    pub db_schema: Option<String>,
    pub avro_namespace: Option<String>,
    /// Output directory for `.avsc` files
    pub avro_output_path: PathBuf,
    /// Force every field to be nullable
    pub avro_all_nullable: bool,
}

impl Configuration {
    /// Create a configuration with the two required keys and defaults elsewhere
    pub fn new(connector: impl Into<String>, connector_mapper: impl Into<String>) -> Self {
        Self {
            connector: connector.into(),
            connector_mapper: connector_mapper.into(),
            connector_csv_path: None,
            connector_tables: None,
            db_system: None,
            db_server: None,
            db_name: None,
            db_schema: None,
            avro_namespace: None,
            avro_output_path: default_output_path(),
            avro_all_nullable: false,
        }
    }

    /// Build a configuration from key/value properties
    ///
    /// Empty values count as absent. Fails when `connector` or
    /// `connector_mapper` is missing, naming every missing key.
    pub fn from_properties(props: &Properties) -> Result<Self, ConfigError> {
        for key in props.keys() {
            if !ConfigProperty::is_known(key) {
                warn!("Ignoring unknown configuration property '{}'", key);
            }
        }

        let get = |property: ConfigProperty| -> Option<String> {
            props
                .get(property.key())
                .and_then(|v| v.as_deref())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let connector = get(ConfigProperty::Connector);
        let connector_mapper = get(ConfigProperty::Mapper);
        let (connector, connector_mapper) = match (connector, connector_mapper) {
            (Some(c), Some(m)) => (c, m),
            (c, m) => {
                let mut missing = Vec::new();
                if c.is_none() {
                    missing.push(ConfigProperty::Connector.key().to_string());
                }
                if m.is_none() {
                    missing.push(ConfigProperty::Mapper.key().to_string());
                }
                return Err(ConfigError::MissingProperties(missing));
            }
        };

        Ok(Self {
            connector,
            connector_mapper,
            connector_csv_path: get(ConfigProperty::CsvPath).map(PathBuf::from),
            connector_tables: get(ConfigProperty::Tables),
            db_system: get(ConfigProperty::DbSystem),
            db_server: get(ConfigProperty::DbServer),
            db_name: get(ConfigProperty::DbName),
            db_schema: get(ConfigProperty::DbSchema),
            avro_namespace: get(ConfigProperty::Namespace),
            avro_output_path: get(ConfigProperty::OutputDir)
                .map(PathBuf::from)
                .unwrap_or_else(default_output_path),
            avro_all_nullable: get(ConfigProperty::AllNullable)
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        })
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let props = parse_config(path.as_ref())?;
        Self::from_properties(&props)
    }

    /// Set the CSV metadata path
    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.connector_csv_path = Some(path.into());
        self
    }

    /// Set the explicit table list
    pub fn with_tables(mut self, tables: impl Into<String>) -> Self {
        self.connector_tables = Some(tables.into());
        self
    }

    /// Set the source system key
    pub fn with_db_system(mut self, system: impl Into<String>) -> Self {
        self.db_system = Some(system.into());
        self
    }

    /// Set the database name
    pub fn with_db_name(mut self, name: impl Into<String>) -> Self {
        self.db_name = Some(name.into());
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, schema: impl Into<String>) -> Self {
        self.db_schema = Some(schema.into());
        self
    }

    /// Set the Avro namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.avro_namespace = Some(namespace.into());
        self
    }

    /// Set the output directory
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.avro_output_path = path.into();
        self
    }

    /// Force all fields nullable
    pub fn with_all_nullable(mut self, all_nullable: bool) -> Self {
        self.avro_all_nullable = all_nullable;
        self
    }

    /// Explicit tables from `connector_tables`, if configured
    ///
    /// Bare table names are qualified with `db_schema`.
    pub fn tables(&self) -> Option<Vec<TableRef>> {
        self.connector_tables
            .as_deref()
            .map(|list| TableRef::parse_list(list, self.db_schema.as_deref()))
    }
}

/// Truthy configuration values: `Y`, `T`, `YES`, `TRUE` (case-insensitive)
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "Y" | "T" | "YES" | "TRUE"
    )
}

fn default_output_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Read a TOML configuration file into raw properties
///
/// Keys may sit at the top level or inside a `[DEFAULT]` table; keys are
/// lower-cased. Strings, booleans and numbers are accepted, and an empty
/// string is recorded as a key without a value.
///
/// String values must be quoted. An INI-style line such as `connector = csv`
/// is rejected with [`ConfigError::Parse`]; write `connector = "csv"`.
pub fn parse_config(path: &Path) -> Result<Properties, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&content).map_err(|reason| ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse TOML configuration text into raw properties
pub fn parse_config_str(content: &str) -> Result<Properties, String> {
    let table: toml::Table = content.parse().map_err(|e: toml::de::Error| e.to_string())?;

    let mut props = Properties::new();
    for (key, value) in &table {
        match value {
            toml::Value::Table(section) if key.eq_ignore_ascii_case("default") => {
                for (key, value) in section {
                    props.insert(key.to_lowercase(), scalar_to_string(key, value)?);
                }
            }
            toml::Value::Table(_) => {
                debug!("Skipping configuration section [{}]", key);
            }
            value => {
                props.insert(key.to_lowercase(), scalar_to_string(key, value)?);
            }
        }
    }
    Ok(props)
}

fn scalar_to_string(key: &str, value: &toml::Value) -> Result<Option<String>, String> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        other => {
            return Err(format!(
                "property '{}' must be a string, boolean or number, found {}",
                key,
                other.type_str()
            ));
        }
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}

/// Overlay `overrides` onto `base`; override entries without a value are ignored
pub fn merge_properties(mut base: Properties, overrides: Properties) -> Properties {
    for (key, value) in overrides {
        if value.is_some() {
            base.insert(key, value);
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(entries: &[(&str, &str)]) -> Properties {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    #[test]
    fn test_from_properties_all_attributes() {
        let config = Configuration::from_properties(&props(&[
            ("connector", "aaa"),
            ("connector_mapper", "bbb"),
            ("connector_csv_path", "ccc"),
            ("connector_tables", "ddd"),
            ("db_system", "eee"),
            ("db_server", "fff"),
            ("db_name", "ggg"),
            ("db_schema", "hhh"),
            ("avro_namespace", "iii"),
            ("avro_output_path", "path/jjj"),
            ("avro_all_nullable", "false"),
        ]))
        .unwrap();

        let mut expected = Configuration::new("aaa", "bbb")
            .with_csv_path("ccc")
            .with_tables("ddd")
            .with_db_system("eee")
            .with_db_name("ggg")
            .with_db_schema("hhh")
            .with_namespace("iii")
            .with_output_path("path/jjj");
        expected.db_server = Some("fff".to_string());
        assert_eq!(config, expected);
    }

    #[test]
    fn test_missing_required_properties_are_named() {
        let err = Configuration::from_properties(&props(&[("db_system", "eee")])).unwrap_err();
        assert!(matches!(&err, ConfigError::MissingProperties(keys) if keys == &["connector", "connector_mapper"]));
        assert_eq!(
            err.to_string(),
            "Missing configuration property/ies: connector, connector_mapper."
        );

        let err = Configuration::from_properties(&props(&[("connector", "csv")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing configuration property/ies: connector_mapper."
        );
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let err = Configuration::from_properties(&props(&[
            ("connector", ""),
            ("connector_mapper", "jdbc"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperties(keys) if keys == ["connector"]));
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::from_properties(&props(&[
            ("connector", "connector"),
            ("connector_mapper", "mapper"),
        ]))
        .unwrap();
        assert_eq!(config.connector_csv_path, None);
        assert_eq!(config.connector_tables, None);
        assert_eq!(config.avro_namespace, None);
        assert_eq!(config.avro_output_path, std::env::current_dir().unwrap());
        assert!(!config.avro_all_nullable);
    }

    #[test]
    fn test_truthy_values() {
        for value in ["Y", "t", "yes", "TRUE", " True "] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["N", "false", "1", "on", ""] {
            assert!(!is_truthy(value), "{value} should not be truthy");
        }
    }

    #[test]
    fn test_parse_config_str_default_section() {
        let parsed = parse_config_str(
            r#"
            [DEFAULT]
            key1 = "value1"
            key2 = ""
            KEY4 = 0
            flag = true
            "#,
        )
        .unwrap();

        let mut expected = Properties::new();
        expected.insert("key1".to_string(), Some("value1".to_string()));
        expected.insert("key2".to_string(), None);
        expected.insert("key4".to_string(), Some("0".to_string()));
        expected.insert("flag".to_string(), Some("true".to_string()));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_empty_config() {
        assert!(parse_config_str("[DEFAULT]").unwrap().is_empty());
        assert!(parse_config_str("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_config_rejects_arrays() {
        let err = parse_config_str("connector_tables = [\"a\", \"b\"]").unwrap_err();
        assert!(err.contains("connector_tables"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "connector = \"csv\"\nconnector_mapper = \"jdbc\"\navro_all_nullable = \"Y\"\n",
        )
        .unwrap();

        let config = Configuration::load(&path).unwrap();
        assert_eq!(config.connector, "csv");
        assert_eq!(config.connector_mapper, "jdbc");
        assert!(config.avro_all_nullable);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Configuration::load("/nonexistent/dir/.config").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_merge_properties() {
        let base = props(&[("connector", "csv"), ("db_schema", "dbo")]);
        let mut overrides = props(&[("db_schema", "sales")]);
        overrides.insert("connector".to_string(), None);

        let merged = merge_properties(base, overrides);
        assert_eq!(merged["connector"], Some("csv".to_string()));
        assert_eq!(merged["db_schema"], Some("sales".to_string()));
    }

    #[test]
    fn test_tables_are_qualified_with_db_schema() {
        let config = Configuration::new("csv", "jdbc")
            .with_db_schema("dbo")
            .with_tables("Orders,sales.Customers");
        assert_eq!(
            config.tables().unwrap(),
            vec![
                TableRef::new("dbo", "Orders"),
                TableRef::new("sales", "Customers")
            ]
        );
        assert_eq!(Configuration::new("csv", "jdbc").tables(), None);
    }
}
