//! `ocrv list` command.

use crate::cli::args::{InputArgs, OutputFormat};
use crate::config::Config;
use crate::error::ValidatorError;
use crate::output::format_items;
use crate::source::load_items;

use super::resolve_input;

/// List the items of the input file.
///
/// # Errors
///
/// Returns an error if the input file is missing or malformed.
pub fn list(args: &InputArgs, config: &Config, format: OutputFormat) -> Result<String, ValidatorError> {
    let path = resolve_input(args, config);
    let items = load_items(&path)?;
    format_items(&items, &path.display().to_string(), format)
}
