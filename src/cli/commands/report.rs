//! `ocrv report` command.

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::error::ValidatorError;
use crate::output::format_result_log;
use crate::results::ResultLog;

/// Render a saved result log.
///
/// # Errors
///
/// Returns an error if the log cannot be read or has an unsupported version.
pub fn report(path: &Path, format: OutputFormat) -> Result<String, ValidatorError> {
    let log = ResultLog::load(path)?;
    format_result_log(&log, format)
}
