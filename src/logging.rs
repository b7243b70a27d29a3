//! Diagnostic logging setup.
//!
//! The TUI owns the terminal while a review runs, so interactive sessions log
//! to a file. Every other command logs to stderr.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::ValidatorError;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, with ANSI colors.
    Stderr,
    /// Appended to a file, without ANSI colors.
    File(PathBuf),
}

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "ocrv=debug"
    } else {
        "ocrv=info"
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this twice leaves the
/// first subscriber in place.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(verbose: bool, target: &LogTarget) -> Result<(), ValidatorError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log(path)?))
            .try_init(),
    };
    // Already installed (tests, repeated calls)
    installed.ok();

    Ok(())
}

fn open_log(path: &Path) -> Result<File, ValidatorError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ValidatorError::Config(format!("Failed to open log file {}: {e}", path.display())))
}
