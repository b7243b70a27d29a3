//! Loading of the OCR result file.
//!
//! The file is a single JSON object mapping image filename to recognized
//! text. Key order in the document is the review order.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::ValidatorError;
use crate::session::ReviewItem;

/// Load review items from a JSON mapping file.
///
/// # Errors
///
/// Returns `ValidatorError::MissingInputFile` if the file does not exist,
/// `ValidatorError::Io` if it cannot be read, and
/// `ValidatorError::InvalidInput` if it is not a filename -> text object.
pub fn load_items(path: &Path) -> Result<Vec<ReviewItem>, ValidatorError> {
    if !path.exists() {
        return Err(ValidatorError::MissingInputFile(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let items = parse_items(&contents)?;
    info!(path = %path.display(), items = items.len(), "Loaded OCR input");
    Ok(items)
}

/// Parse review items from JSON text.
///
/// # Errors
///
/// Returns `ValidatorError::InvalidInput` if the text is not valid JSON, is
/// not an object, or has a non-string value.
pub fn parse_items(contents: &str) -> Result<Vec<ReviewItem>, ValidatorError> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| ValidatorError::InvalidInput(format!("not valid JSON: {e}")))?;

    let Value::Object(map) = value else {
        return Err(ValidatorError::InvalidInput(
            "expected an object mapping filenames to text".to_string(),
        ));
    };

    map.into_iter()
        .map(|(filename, text)| match text {
            Value::String(text) => Ok(ReviewItem { filename, text }),
            other => Err(ValidatorError::InvalidInput(format!(
                "value for '{filename}' must be a string, found {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
