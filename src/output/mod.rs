//! Output formatting for ocrv.
//!
//! This module provides formatters for review items, reports and result logs.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::ValidatorError;
use crate::results::ResultLog;
use crate::session::{ReviewItem, ReviewReport};

pub use json::*;
pub use pretty::*;

/// Format review items based on output format
///
/// # Errors
///
/// Returns `ValidatorError::Parse` if JSON serialization fails.
pub fn format_items(
    items: &[ReviewItem],
    source: &str,
    format: OutputFormat,
) -> Result<String, ValidatorError> {
    match format {
        OutputFormat::Pretty => Ok(format_items_pretty(items, source)),
        OutputFormat::Json => format_items_json(items, source),
    }
}

/// Format an end-of-review report based on output format
///
/// # Errors
///
/// Returns `ValidatorError::Parse` if JSON serialization fails.
pub fn format_report(report: &ReviewReport, format: OutputFormat) -> Result<String, ValidatorError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => format_report_json(report),
    }
}

/// Format a saved result log based on output format
///
/// # Errors
///
/// Returns `ValidatorError::Parse` if JSON serialization fails.
pub fn format_result_log(log: &ResultLog, format: OutputFormat) -> Result<String, ValidatorError> {
    match format {
        OutputFormat::Pretty => Ok(format_result_log_pretty(log)),
        OutputFormat::Json => to_json(log),
    }
}
