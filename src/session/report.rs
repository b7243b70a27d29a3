//! End-of-review report.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::review::Outcome;

/// Totals and per-item verdicts for a finished review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Number of classified items.
    pub total: usize,
    /// Items marked correct.
    pub correct: usize,
    /// Items marked incorrect.
    pub incorrect: usize,
    /// Filename and verdict, in classification order.
    pub details: Vec<(String, Outcome)>,
}

impl ReviewReport {
    /// Build a report from counters and details.
    #[must_use]
    pub fn new(correct: usize, incorrect: usize, details: Vec<(String, Outcome)>) -> Self {
        Self {
            total: correct + incorrect,
            correct,
            incorrect,
            details,
        }
    }

    /// Share of items marked correct, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy_percent(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 * 100.0 / self.total as f64)
        }
    }
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "Correct: {}", self.correct)?;
        writeln!(f, "Incorrect: {}", self.incorrect)?;
        writeln!(f)?;
        writeln!(f, "Details:")?;
        for (filename, outcome) in &self.details {
            writeln!(f, "{filename}: {outcome}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_text() {
        let report = ReviewReport::new(
            2,
            1,
            vec![
                ("a.png".to_string(), Outcome::Correct),
                ("b.png".to_string(), Outcome::Incorrect),
                ("c.png".to_string(), Outcome::Correct),
            ],
        );

        assert_eq!(
            report.to_string(),
            "Total: 3\nCorrect: 2\nIncorrect: 1\n\nDetails:\na.png: correct\nb.png: incorrect\nc.png: correct\n"
        );
    }

    #[test]
    fn test_empty_report() {
        let report = ReviewReport::new(0, 0, vec![]);
        assert_eq!(report.accuracy_percent(), None);
        assert!(report.to_string().ends_with("Details:\n"));
    }

    #[test]
    fn test_accuracy() {
        let report = ReviewReport::new(3, 1, vec![]);
        assert_eq!(report.accuracy_percent(), Some(75.0));
    }
}
