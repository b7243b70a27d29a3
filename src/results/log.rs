//! Result log format.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ValidatorError;
use crate::session::{Outcome, ReviewReport, ReviewSession};

/// Current result log format version.
pub const RESULT_LOG_VERSION: u32 = 1;

/// One classified item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Image filename.
    pub filename: String,
    /// Recognized text that was judged.
    pub text: String,
    /// The verdict.
    pub outcome: Outcome,
    /// When the verdict was recorded.
    pub decided_at: DateTime<Utc>,
}

/// Reviewed range, one-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRange {
    /// First reviewed item.
    pub start: usize,
    /// Last reviewed item.
    pub end: usize,
}

/// A finished review as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLog {
    /// Format version.
    pub version: u32,
    /// Input file the items came from.
    pub input: PathBuf,
    /// When the reviewed pass began.
    pub started_at: DateTime<Utc>,
    /// When the log was produced.
    pub finished_at: DateTime<Utc>,
    /// Reviewed range of the loaded items.
    pub range: Option<ResultRange>,
    /// Number of classified items.
    pub total: usize,
    /// Items marked correct.
    pub correct: usize,
    /// Items marked incorrect.
    pub incorrect: usize,
    /// Per-item results in classification order.
    pub results: Vec<ResultRecord>,
}

impl ResultLog {
    /// Capture the state of a session.
    #[must_use]
    pub fn from_session(session: &ReviewSession, input: &Path) -> Self {
        let (correct, incorrect) = session.stats();
        let results = session
            .verdicts()
            .iter()
            .map(|v| ResultRecord {
                filename: v.filename.clone(),
                text: session.text_for(&v.filename).unwrap_or_default().to_string(),
                outcome: v.outcome,
                decided_at: v.decided_at,
            })
            .collect();

        Self {
            version: RESULT_LOG_VERSION,
            input: input.to_path_buf(),
            started_at: session.started_at(),
            finished_at: Utc::now(),
            range: session
                .active_range()
                .map(|(start, end)| ResultRange { start, end }),
            total: correct + incorrect,
            correct,
            incorrect,
            results,
        }
    }

    /// Summary view of the log.
    #[must_use]
    pub fn report(&self) -> ReviewReport {
        ReviewReport::new(
            self.correct,
            self.incorrect,
            self.results
                .iter()
                .map(|r| (r.filename.clone(), r.outcome))
                .collect(),
        )
    }

    /// File name used when saving into a results directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("review-{}.json", self.finished_at.format("%Y%m%d-%H%M%S"))
    }

    /// Write the log into `dir`, creating it if needed. Returns the file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, ValidatorError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        self.save_to_path(&path)?;
        Ok(path)
    }

    /// Write the log to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ValidatorError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        info!(path = %path.display(), total = self.total, "Saved result log");
        Ok(())
    }

    /// Read a log back from disk.
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::UnsupportedLogVersion` for logs written by a
    /// newer format, or an I/O / JSON error.
    pub fn load(path: &Path) -> Result<Self, ValidatorError> {
        #[derive(Deserialize)]
        struct Header {
            version: u32,
        }

        let contents = std::fs::read_to_string(path)?;
        let header: Header = serde_json::from_str(&contents)?;
        if header.version != RESULT_LOG_VERSION {
            return Err(ValidatorError::UnsupportedLogVersion(header.version));
        }

        Ok(serde_json::from_str(&contents)?)
    }
}
