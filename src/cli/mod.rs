//! Command-line interface for ocrv.

pub mod args;
pub mod commands;
