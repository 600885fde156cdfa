//! Validate command implementation

use crate::cli::error::CliError;
use crate::cli::output;
use crate::validation::{AVRO_EXTENSION, validate_all_in_folder, validate_avro_schema_file};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Options of the validator
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Schema file or folder to validate (default: current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Only validate files whose path contains this text (folders only)
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Omit successful validations from the report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Counts from one validator run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub validated: usize,
    pub failed: usize,
    pub invalid_path: bool,
}

impl ValidationSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.invalid_path
    }
}

/// Handle the validate command
pub fn handle_validate(
    args: &ValidateArgs,
    out: &mut impl Write,
) -> Result<ValidationSummary, CliError> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    writeln!(out, "{}", output::STARTING)?;
    let mut summary = ValidationSummary::default();

    if path.is_file() {
        let validation = validate_avro_schema_file(&path);
        output::write_file_result(out, &validation, args.quiet)?;
        if validation.is_valid() {
            summary.validated = 1;
        } else {
            summary.failed = 1;
        }
    } else if path.is_dir() {
        let report = validate_all_in_folder(&path, args.filter.as_deref(), AVRO_EXTENSION);
        output::write_folder_report(out, &report, args.quiet)?;
        summary.validated = report.success_count();
        summary.failed = report.failure_count();
    } else {
        output::write_invalid_path(out, &path)?;
        summary.invalid_path = true;
    }

    writeln!(out, "{}", output::ALL_DONE)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(args: &ValidateArgs) -> (ValidationSummary, String) {
        let mut buf = Vec::new();
        let summary = handle_validate(args, &mut buf).unwrap();
        (summary, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_single_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("id.avsc");
        std::fs::write(&path, r#"{"type": "long"}"#).unwrap();

        let (summary, text) = run(&ValidateArgs {
            path: Some(path),
            ..ValidateArgs::default()
        });
        assert!(summary.is_success());
        assert_eq!(
            text,
            "STARTING...\nSUCCESS: AVRO schema in file id.avsc is valid.\nALL DONE!\n"
        );
    }

    #[test]
    fn test_folder_quiet() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("good.avsc"), r#"{"type": "long"}"#).unwrap();
        std::fs::write(temp.path().join("bad.avsc"), r#"{"type": "banana"}"#).unwrap();

        let (summary, text) = run(&ValidateArgs {
            path: Some(temp.path().to_path_buf()),
            quiet: true,
            ..ValidateArgs::default()
        });
        assert_eq!(summary.validated, 1);
        assert_eq!(summary.failed, 1);
        assert!(!text.contains("SUCCESS"));
        assert!(text.contains("FAIL: file bad.avsc is not valid."));
        assert!(text.contains("1 files successfully validated\nALL DONE!\n"));
    }

    #[test]
    fn test_invalid_path() {
        let (summary, text) = run(&ValidateArgs {
            path: Some(PathBuf::from("/nonexistent/schemas")),
            ..ValidateArgs::default()
        });
        assert!(summary.invalid_path);
        assert!(!summary.is_success());
        assert_eq!(
            text,
            "STARTING...\nERROR Invalid path: /nonexistent/schemas\nALL DONE!\n"
        );
    }
}
