//! Review session state machine.
//!
//! The session owns the item list in load order, a cursor into the active
//! range, and the recorded verdicts. Counters are maintained incrementally
//! and always agree with the verdict list.

use std::collections::HashMap;
use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::range::RangeError;
use super::report::ReviewReport;

/// One image/text pair awaiting a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Image filename, unique within the input.
    pub filename: String,
    /// Recognized text for the image.
    pub text: String,
}

impl ReviewItem {
    /// Create a new review item.
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// The reviewer's verdict on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The recognized text matches the image.
    Correct,
    /// The recognized text does not match the image.
    Incorrect,
}

impl Outcome {
    /// Lowercase name, as used in summaries and result logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of moving the cursor forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceResult {
    /// The cursor moved to the next item.
    Continued,
    /// The cursor was already on the last item; the review is complete.
    Completed,
}

/// A recorded verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Image filename.
    pub filename: String,
    /// The verdict.
    pub outcome: Outcome,
    /// When the verdict was recorded.
    pub decided_at: DateTime<Utc>,
}

/// Errors from session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session already reached its last item.
    #[error("Review is complete; apply a new range to review again")]
    Finished,
}

/// A review session over an ordered list of items.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    /// All items in load order. Never changes after construction.
    source: Vec<ReviewItem>,
    /// Filename -> position in `source`.
    source_index: HashMap<String, usize>,
    /// Active contiguous slice of `source`.
    active: Range<usize>,
    /// Index into the active slice.
    cursor: usize,
    /// Verdicts in the order they were recorded.
    verdicts: Vec<Verdict>,
    /// Filename -> position in `verdicts`.
    verdict_index: HashMap<String, usize>,
    correct: usize,
    incorrect: usize,
    finished: bool,
    started_at: DateTime<Utc>,
}

impl ReviewSession {
    /// Create a session over `items`, in the given order.
    #[must_use]
    pub fn new(items: Vec<ReviewItem>) -> Self {
        let len = items.len();
        let source_index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.filename.clone(), i))
            .collect();
        info!(items = len, "Review session created");
        Self {
            source: items,
            source_index,
            active: 0..len,
            cursor: 0,
            verdicts: Vec::new(),
            verdict_index: HashMap::new(),
            correct: 0,
            incorrect: 0,
            finished: false,
            started_at: Utc::now(),
        }
    }

    /// Items in the active range.
    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.source[self.active.clone()]
    }

    /// Number of items in the active range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether the active range holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of items originally loaded.
    #[must_use]
    pub fn total_loaded(&self) -> usize {
        self.source.len()
    }

    /// Cursor position within the active range (0-based).
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// One-based position and active length, for progress readouts.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        if self.is_empty() {
            (0, 0)
        } else {
            (self.cursor + 1, self.len())
        }
    }

    /// The active range as one-based inclusive bounds into the loaded items.
    #[must_use]
    pub fn active_range(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.active.start + 1, self.active.end))
        }
    }

    /// Whether the last item has been passed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// When the current pass over the active range began.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The item under the cursor.
    #[must_use]
    pub fn current_item(&self) -> Option<&ReviewItem> {
        self.items().get(self.cursor)
    }

    /// Recognized text for a loaded filename.
    #[must_use]
    pub fn text_for(&self, filename: &str) -> Option<&str> {
        self.source_index
            .get(filename)
            .map(|&i| self.source[i].text.as_str())
    }

    /// Outcome recorded for a filename, if any.
    #[must_use]
    pub fn outcome_of(&self, filename: &str) -> Option<Outcome> {
        self.verdict_index
            .get(filename)
            .map(|&i| self.verdicts[i].outcome)
    }

    /// Record a verdict for the current item and move to the next one.
    ///
    /// Re-classifying an item replaces its earlier verdict. On an empty
    /// session nothing is recorded and `Completed` is returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the review already completed.
    pub fn classify(&mut self, outcome: Outcome) -> Result<AdvanceResult, SessionError> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        let Some(item) = self.current_item() else {
            return Ok(AdvanceResult::Completed);
        };
        let filename = item.filename.clone();
        debug!(%filename, %outcome, cursor = self.cursor, "Classified item");
        self.record(filename, outcome);
        Ok(self.advance())
    }

    fn record(&mut self, filename: String, outcome: Outcome) {
        let verdict = Verdict {
            filename: filename.clone(),
            outcome,
            decided_at: Utc::now(),
        };

        if let Some(&i) = self.verdict_index.get(&filename) {
            let previous = self.verdicts[i].outcome;
            self.decrement(previous);
            self.verdicts[i] = verdict;
        } else {
            self.verdict_index.insert(filename, self.verdicts.len());
            self.verdicts.push(verdict);
        }

        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::Incorrect => self.incorrect += 1,
        }
    }

    fn decrement(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => self.correct -= 1,
            Outcome::Incorrect => self.incorrect -= 1,
        }
    }

    /// Move the cursor to the next item.
    ///
    /// Returns `Completed` when the cursor is already on the last item; the
    /// cursor stays put and the session is marked finished.
    pub fn advance(&mut self) -> AdvanceResult {
        if self.cursor + 1 < self.len() {
            self.cursor += 1;
            AdvanceResult::Continued
        } else {
            if !self.is_empty() && !self.finished {
                self.finished = true;
                info!(
                    correct = self.correct,
                    incorrect = self.incorrect,
                    "Review complete"
                );
            }
            AdvanceResult::Completed
        }
    }

    /// Restrict the review to items `start..=end` (one-based) of the loaded list.
    ///
    /// Bounds always refer to the full loaded list, not the currently active
    /// range. On success all progress is discarded.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::OutOfBounds` if `start < 1`, `end` exceeds the
    /// number of loaded items, or `start > end`. The session is unchanged.
    pub fn apply_range(&mut self, start: i64, end: i64) -> Result<(), RangeError> {
        let len = self.source.len();
        let out_of_bounds = RangeError::OutOfBounds { start, end, len };

        let first = usize::try_from(start).map_err(|_| out_of_bounds.clone())?;
        let last = usize::try_from(end).map_err(|_| out_of_bounds.clone())?;
        if first < 1 || last > len || first > last {
            return Err(out_of_bounds);
        }

        self.active = (first - 1)..last;
        self.reset();
        info!(start, end, items = self.len(), "Applied review range");
        Ok(())
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.verdicts.clear();
        self.verdict_index.clear();
        self.correct = 0;
        self.incorrect = 0;
        self.finished = false;
        self.started_at = Utc::now();
    }

    /// Counts of correct and incorrect verdicts.
    #[must_use]
    pub const fn stats(&self) -> (usize, usize) {
        (self.correct, self.incorrect)
    }

    /// Recorded verdicts in classification order.
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Filenames and outcomes in classification order.
    #[must_use]
    pub fn summary(&self) -> Vec<(String, Outcome)> {
        self.verdicts
            .iter()
            .map(|v| (v.filename.clone(), v.outcome))
            .collect()
    }

    /// Build the end-of-review report.
    #[must_use]
    pub fn report(&self) -> ReviewReport {
        ReviewReport::new(self.correct, self.incorrect, self.summary())
    }
}
