//! ocrv - a terminal tool for validating OCR output
//!
//! This crate loads a JSON mapping of image filenames to recognized text and
//! lets a person step through it, marking each text correct or incorrect
//! while the source image is shown in the terminal.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod results;
pub mod session;
pub mod source;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::ValidatorError;
pub use session::ReviewSession;
