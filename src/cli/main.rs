//! avro-schema-generator binary

#[cfg(feature = "cli")]
use avro_schema_generator::cli::{self, CliError, commands::GenerateArgs};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "avro-schema-generator",
    version,
    about = "Generate Avro schemas for Kafka Connect from source database metadata"
)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    cli::commands::handle_generate(&cli.args, &mut stdout)?;
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    cli::init_tracing("info");
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => eprintln!("{}", cli_err.user_message()),
                None => eprintln!("ERROR {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
