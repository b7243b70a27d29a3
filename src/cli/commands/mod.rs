//! Command implementations for ocrv.
//!
//! Each command returns the text to print on stdout.

mod completions;
mod list;
mod report;
mod review;

pub use completions::completions;
pub use list::list;
pub use report::report;
pub use review::review;

use std::path::PathBuf;

use crate::cli::args::InputArgs;
use crate::config::Config;

/// Input file from the command line, falling back to configuration.
fn resolve_input(args: &InputArgs, config: &Config) -> PathBuf {
    args.input
        .clone()
        .unwrap_or_else(|| config.input.data_file.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input_prefers_flag() {
        let config = Config::default();
        let args = InputArgs {
            input: Some(PathBuf::from("scans.json")),
        };
        assert_eq!(resolve_input(&args, &config), PathBuf::from("scans.json"));
    }

    #[test]
    fn test_resolve_input_falls_back_to_config() {
        let config = Config::default();
        assert_eq!(
            resolve_input(&InputArgs::default(), &config),
            PathBuf::from("yandex_ocr_data.json")
        );
    }
}
