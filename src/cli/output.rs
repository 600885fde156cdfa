//! Output formatting for CLI
//!
//! Reports go to any `io::Write` so the binaries print to stdout and tests
//! capture into a buffer.

use crate::validation::{FileValidation, FolderReport};
use std::io::{self, Write};
use std::path::PathBuf;

pub const STARTING: &str = "STARTING...";
pub const ALL_DONE: &str = "ALL DONE!";

/// One line per file; successes are omitted when `quiet`
pub fn write_file_result(
    out: &mut impl Write,
    validation: &FileValidation,
    quiet: bool,
) -> io::Result<()> {
    match &validation.result {
        Err(e) => writeln!(
            out,
            "FAIL: file {} is not valid.\n\t{}",
            validation.file_name(),
            e
        ),
        Ok(()) if !quiet => writeln!(
            out,
            "SUCCESS: AVRO schema in file {} is valid.",
            validation.file_name()
        ),
        Ok(()) => Ok(()),
    }
}

/// Every file result followed by the success count
pub fn write_folder_report(
    out: &mut impl Write,
    report: &FolderReport,
    quiet: bool,
) -> io::Result<()> {
    for validation in &report.files {
        write_file_result(out, validation, quiet)?;
    }
    writeln!(out, "{} files successfully validated", report.success_count())
}

pub fn write_invalid_path(out: &mut impl Write, path: &std::path::Path) -> io::Result<()> {
    writeln!(out, "ERROR Invalid path: {}", path.display())
}

/// List written schema files
pub fn write_generated(out: &mut impl Write, paths: &[PathBuf]) -> io::Result<()> {
    for path in paths {
        writeln!(out, "Wrote {}", path.display())?;
    }
    writeln!(out, "{} schema files generated", paths.len())
}
