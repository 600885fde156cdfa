//! Generate command implementation

use crate::cli::error::CliError;
use crate::cli::output;
use crate::config::{
    ConfigProperty, Configuration, DEFAULT_CONFIG_FILE, Properties, merge_properties,
    parse_config,
};
use crate::generator;
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options of the generator; each flag overrides the configuration file
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Configuration file (optional when flags give connector and mapper)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Connector to read metadata with (csv, duckdb)
    #[arg(long)]
    pub connector: Option<String>,

    /// Type-mapping dialect (debezium, jdbc)
    #[arg(long)]
    pub mapper: Option<String>,

    /// Metadata CSV file for the csv connector
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Comma-separated tables, `table` or `schema.table`
    #[arg(long)]
    pub tables: Option<String>,

    /// Source database system (sqlserver, snowflake, duckdb)
    #[arg(long)]
    pub system: Option<String>,

    #[arg(long)]
    pub server: Option<String>,

    #[arg(long)]
    pub database: Option<String>,

    #[arg(long)]
    pub schema: Option<String>,

    /// Avro namespace of the generated records
    #[arg(long)]
    pub namespace: Option<String>,

    /// Output directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Make every field nullable
    #[arg(long)]
    pub nullable: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            connector: None,
            mapper: None,
            csv: None,
            tables: None,
            system: None,
            server: None,
            database: None,
            schema: None,
            namespace: None,
            out: None,
            nullable: false,
        }
    }
}

impl GenerateArgs {
    /// Flags given on the command line, as configuration properties
    pub fn overrides(&self) -> Properties {
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        [
            (ConfigProperty::Connector, self.connector.clone()),
            (ConfigProperty::Mapper, self.mapper.clone()),
            (ConfigProperty::CsvPath, path(&self.csv)),
            (ConfigProperty::Tables, self.tables.clone()),
            (ConfigProperty::DbSystem, self.system.clone()),
            (ConfigProperty::DbServer, self.server.clone()),
            (ConfigProperty::DbName, self.database.clone()),
            (ConfigProperty::DbSchema, self.schema.clone()),
            (ConfigProperty::Namespace, self.namespace.clone()),
            (ConfigProperty::OutputDir, path(&self.out)),
            (
                ConfigProperty::AllNullable,
                self.nullable.then(|| "true".to_string()),
            ),
        ]
        .into_iter()
        .map(|(property, value)| (property.key().to_string(), value))
        .collect()
    }
}

/// Resolve the configuration: file values, then flag overrides
///
/// A missing default `.config` file is tolerated; a missing file passed
/// explicitly with `--config` is an error.
pub fn load_configuration(args: &GenerateArgs) -> Result<Configuration, CliError> {
    let base = if args.config.is_file() {
        debug!("Reading configuration from {}", args.config.display());
        parse_config(&args.config)?
    } else if args.config == Path::new(DEFAULT_CONFIG_FILE) {
        Properties::new()
    } else {
        return Err(CliError::InvalidPath(args.config.clone()));
    };

    let props = merge_properties(base, args.overrides());
    Ok(Configuration::from_properties(&props)?)
}

/// Handle the generate command
pub fn handle_generate(args: &GenerateArgs, out: &mut impl Write) -> Result<Vec<PathBuf>, CliError> {
    let config = load_configuration(args)?;
    let written = generator::run(&config)?;
    output::write_generated(out, &written)?;
    Ok(written)
}
