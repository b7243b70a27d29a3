//! Image lookup.
//!
//! The review loop never touches the filesystem directly; it asks an
//! [`ImageSource`] for the bytes behind a filename.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::ValidatorError;

/// Resolves review filenames to raw image bytes.
#[cfg_attr(test, mockall::automock)]
pub trait ImageSource {
    /// Fetch the encoded image for `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image does not exist or cannot be read.
    fn fetch(&self, filename: &str) -> Result<Vec<u8>, ValidatorError>;
}

/// Image store backed by a directory.
#[derive(Debug, Clone)]
pub struct DirectoryImageSource {
    root: PathBuf,
}

impl DirectoryImageSource {
    /// Create an image source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path for a filename.
    #[must_use]
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl ImageSource for DirectoryImageSource {
    fn fetch(&self, filename: &str) -> Result<Vec<u8>, ValidatorError> {
        let path = self.path_for(filename);
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ValidatorError::ImageNotFound(path),
            _ => ValidatorError::Io(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_for_joins_under_root() {
        let source = DirectoryImageSource::new("cropped_images");
        assert_eq!(
            source.path_for("a.png"),
            PathBuf::from("cropped_images").join("a.png")
        );
    }

    #[test]
    fn test_fetch_reads_bytes() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.png"), b"bytes").unwrap();

        let source = DirectoryImageSource::new(temp_dir.path());
        assert_eq!(source.fetch("a.png").unwrap(), b"bytes");
    }

    #[test]
    fn test_fetch_missing_image() {
        let temp_dir = TempDir::new().unwrap();
        let source = DirectoryImageSource::new(temp_dir.path());

        let err = source.fetch("nope.png").unwrap_err();
        assert!(matches!(err, ValidatorError::ImageNotFound(_)));
        assert!(err.is_recoverable());
    }
}
