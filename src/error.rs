//! Error types for ocrv.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::{RangeError, SessionError};

/// Errors that can occur while loading, reviewing, or reporting.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The OCR input file does not exist.
    #[error("Input file {} not found", .0.display())]
    MissingInputFile(PathBuf),

    /// The OCR input file is not a filename -> text mapping.
    #[error("Invalid input file: {0}")]
    InvalidInput(String),

    /// An image could not be located in the image store.
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// An image could not be decoded.
    #[error("Failed to load image: {0}")]
    ImageDecode(String),

    /// A range restriction was rejected.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A session operation was rejected.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A result log has a version this build does not understand.
    #[error("Unsupported result log version {0}")]
    UnsupportedLogVersion(u32),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ValidatorError {
    /// Whether the error only affects the current action and the review can continue.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ImageNotFound(_) | Self::ImageDecode(_) | Self::Range(_) | Self::Session(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = ValidatorError::MissingInputFile(PathBuf::from("data.json"));
        assert_eq!(err.to_string(), "Input file data.json not found");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_range_error_is_transparent() {
        let err = ValidatorError::from(RangeError::NotANumber("x".to_string()));
        assert_eq!(err.to_string(), "Enter valid item numbers (got 'x')");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_decode_error_is_recoverable() {
        assert!(ValidatorError::ImageDecode("bad".to_string()).is_recoverable());
        assert!(!ValidatorError::Config("bad".to_string()).is_recoverable());
    }
}
