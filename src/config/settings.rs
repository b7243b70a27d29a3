//! Configuration settings for ocrv.
//!
//! Settings are loaded from `~/.ocrv/config.yaml`. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::ValidatorError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Input locations.
    pub input: InputConfig,
    /// Image display settings.
    pub display: DisplayConfig,
    /// Result log settings.
    pub results: ResultsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Where review inputs live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON file mapping image filename to recognized text.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Directory the image filenames are resolved under.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
}

/// Image display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Images are thumbnailed to fit this many pixels on each side.
    #[serde(default = "default_thumbnail_max")]
    pub thumbnail_max: u32,
}

/// Result log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    /// Write a result log when a review completes.
    #[serde(default = "default_true")]
    pub save: bool,
    /// Directory for result logs. Defaults to `~/.ocrv/results/`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_data_file() -> PathBuf {
    PathBuf::from("yandex_ocr_data.json")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("cropped_images")
}

const fn default_thumbnail_max() -> u32 {
    600
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            image_dir: default_image_dir(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thumbnail_max: default_thumbnail_max(),
        }
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            save: default_true(),
            directory: None,
        }
    }
}

impl ResultsConfig {
    /// Directory result logs go to, falling back to the data directory.
    #[must_use]
    pub fn directory_or(&self, paths: &Paths) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| paths.results.clone())
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, ValidatorError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, ValidatorError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ValidatorError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            ValidatorError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }
}
