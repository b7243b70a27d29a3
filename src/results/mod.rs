//! Persisted review results.
//!
//! A finished review is written as a versioned JSON document holding one
//! record per classified item. Logs can be read back with `ocrv report`.

mod log;

pub use log::{ResultLog, ResultRange, ResultRecord, RESULT_LOG_VERSION};
