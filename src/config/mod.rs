//! Configuration management for ocrv.
//!
//! This module handles loading configuration from `~/.ocrv/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, DisplayConfig, GeneralConfig, InputConfig, ResultsConfig};
