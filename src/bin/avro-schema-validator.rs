//! avro-schema-validator binary

#[cfg(feature = "cli")]
use anyhow::Context;
#[cfg(feature = "cli")]
use avro_schema_generator::cli::{self, commands::ValidateArgs};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "avro-schema-validator",
    version,
    about = "Check validity of Avro schema definition files"
)]
struct Cli {
    #[command(flatten)]
    args: ValidateArgs,
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    // The report goes to stdout; keep stderr for real problems
    cli::init_tracing("error");
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    let summary = cli::commands::handle_validate(&cli.args, &mut stdout)
        .context("validation run failed");

    match summary {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("ERROR {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
