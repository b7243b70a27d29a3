//! JSON output formatting for ocrv.

use serde::Serialize;
use serde_json::json;

use crate::error::ValidatorError;
use crate::session::{ReviewItem, ReviewReport};

/// Format review items as JSON
///
/// # Errors
///
/// Returns `ValidatorError::Parse` if JSON serialization fails.
pub fn format_items_json(items: &[ReviewItem], source: &str) -> Result<String, ValidatorError> {
    let entries: Vec<_> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            json!({
                "index": i + 1,
                "filename": item.filename,
                "text": item.text,
            })
        })
        .collect();

    let output = json!({
        "source": source,
        "count": items.len(),
        "items": entries,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an end-of-review report as JSON
///
/// # Errors
///
/// Returns `ValidatorError::Parse` if JSON serialization fails.
pub fn format_report_json(report: &ReviewReport) -> Result<String, ValidatorError> {
    let details: Vec<_> = report
        .details
        .iter()
        .map(|(filename, outcome)| json!({ "filename": filename, "outcome": outcome }))
        .collect();

    let output = json!({
        "total": report.total,
        "correct": report.correct,
        "incorrect": report.incorrect,
        "details": details,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `ValidatorError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ValidatorError> {
    Ok(serde_json::to_string_pretty(value)?)
}
