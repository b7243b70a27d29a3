//! Path resolution for ocrv configuration and data files.
//!
//! All ocrv data is stored in `~/.ocrv/`:
//! - `config.yaml` - Main configuration file
//! - `results/` - Result logs of finished reviews
//! - `logs/` - Diagnostic log written while the TUI owns the terminal

use std::path::PathBuf;

use crate::error::ValidatorError;

/// Paths to ocrv configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.ocrv/`
    pub root: PathBuf,
    /// Config file: `~/.ocrv/config.yaml`
    pub config_file: PathBuf,
    /// Results directory: `~/.ocrv/results/`
    pub results: PathBuf,
    /// Logs directory: `~/.ocrv/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ValidatorError> {
        let home = std::env::var("HOME").map_err(|_| {
            ValidatorError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".ocrv")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            results: root.join("results"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Log file written during interactive sessions.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.logs.join("ocrv.log")
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), ValidatorError> {
        for dir in [&self.root, &self.results, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    ValidatorError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".ocrv"))
        })
    }
}
