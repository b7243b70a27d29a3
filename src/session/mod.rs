//! OCR review session state.
//!
//! A review session walks an ordered list of (image filename, recognized
//! text) pairs, records a verdict for each one, and keeps running counters.
//! The session has no knowledge of terminals or the filesystem; the TUI
//! calls into it and re-renders after every mutation.

mod range;
mod report;
mod review;

pub use range::{parse_range_expr, parse_range_inputs, RangeError};
pub use report::ReviewReport;
pub use review::{AdvanceResult, Outcome, ReviewItem, ReviewSession, SessionError, Verdict};
