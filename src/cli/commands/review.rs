//! Interactive review command.
//!
//! This module implements `ocrv review`: it loads the input, runs the TUI,
//! and prints the summary of every review completed during the run.

use std::fmt::Write;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, ReviewArgs};
use crate::config::{Config, Paths};
use crate::error::ValidatorError;
use crate::output::format_report;
use crate::session::{parse_range_expr, ReviewSession};
use crate::source::{load_items, DirectoryImageSource};
use crate::tui::{self, ReviewOptions, ReviewOutcome};

use super::resolve_input;

/// Execute the review command.
///
/// # Errors
///
/// Returns an error if the input file is missing or malformed, if `--range`
/// is invalid, or if the terminal cannot be driven.
pub fn review(
    args: &ReviewArgs,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, ValidatorError> {
    let input = resolve_input(&args.input, config);
    let items = load_items(&input)?;

    let mut session = ReviewSession::new(items);
    if let Some(expr) = &args.range {
        let (start, end) = parse_range_expr(expr)?;
        session.apply_range(start, end)?;
    }

    let images = DirectoryImageSource::new(
        args.images
            .clone()
            .unwrap_or_else(|| config.input.image_dir.clone()),
    );

    let results_dir = if args.no_save || !config.results.save {
        None
    } else {
        Some(
            args.results_dir
                .clone()
                .unwrap_or_else(|| config.results.directory_or(paths)),
        )
    };

    let options = ReviewOptions {
        input,
        results_dir,
        thumbnail_max: config.display.thumbnail_max,
    };

    let outcome = tui::run(session, &images, options)?;
    render_outcome(&outcome, format)
}

/// Render what happened during a TUI run.
fn render_outcome(outcome: &ReviewOutcome, format: OutputFormat) -> Result<String, ValidatorError> {
    match format {
        OutputFormat::Json => {
            let (position, len) = outcome.session.position();
            let (correct, incorrect) = outcome.session.stats();
            let completions: Vec<_> = outcome
                .completions
                .iter()
                .map(|c| {
                    json!({
                        "total": c.report.total,
                        "correct": c.report.correct,
                        "incorrect": c.report.incorrect,
                        "details": c.report.details.iter().map(|(filename, outcome)| {
                            json!({ "filename": filename, "outcome": outcome })
                        }).collect::<Vec<_>>(),
                        "saved_to": c.saved_to,
                        "save_error": c.save_error,
                    })
                })
                .collect();

            let output = json!({
                "status": if outcome.session.is_finished() { "complete" } else { "stopped" },
                "position": position,
                "items": len,
                "correct": correct,
                "incorrect": incorrect,
                "completions": completions,
            });
            serde_json::to_string_pretty(&output).map_err(ValidatorError::Parse)
        },
        OutputFormat::Pretty => {
            let mut output = String::new();
            for completion in &outcome.completions {
                output.push_str(&format_report(&completion.report, format)?);
                if let Some(path) = &completion.saved_to {
                    let _ = writeln!(output, "\nSaved results to {}", path.display());
                }
                if let Some(err) = &completion.save_error {
                    let _ = writeln!(output, "\n{} {err}", "Could not save results:".red());
                }
                output.push('\n');
            }

            if !outcome.session.is_finished() {
                let (position, len) = outcome.session.position();
                let (correct, incorrect) = outcome.session.stats();
                let _ = writeln!(
                    output,
                    "Review stopped at {position}/{len} (correct: {correct}, incorrect: {incorrect})"
                );
            }

            Ok(output.trim_end().to_string())
        },
    }
}
