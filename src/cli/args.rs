use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "ocrv")]
#[command(about = "Manually validate OCR output against its source images")]
#[command(long_about = "ocrv - OCR validator

Steps through a JSON file that maps image filenames to recognized text,
shows each image next to its text, and records whether the text is correct.

QUICK START:
  ocrv review                         Review yandex_ocr_data.json
  ocrv review -i ocr.json --range 10-40
  ocrv list                           List the items in the input file
  ocrv report ~/.ocrv/results/review-20240101-120000.json

KEYS (review):
  Right / l    mark correct
  Left / h     mark incorrect
  r            restrict to a range of items
  q            quit

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug detail (to ~/.ocrv/logs/ocrv.log during a review)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review OCR results interactively
    ///
    /// Opens a terminal UI showing one image and its recognized text at a
    /// time. Mark each item correct (Right) or incorrect (Left). When the
    /// last item is classified the summary is printed and a result log is
    /// written.
    ///
    /// # Examples
    ///
    ///   ocrv review
    ///   ocrv review --input scans.json --images scans/
    ///   ocrv review --range 50-100
    ///   ocrv review --no-save
    #[command(alias = "r")]
    Review(ReviewArgs),

    /// List the items in the input file
    ///
    /// # Examples
    ///
    ///   ocrv list
    ///   ocrv list -o json
    #[command(alias = "ls")]
    List(InputArgs),

    /// Show a saved result log
    ///
    /// # Examples
    ///
    ///   ocrv report ~/.ocrv/results/review-20240101-120000.json
    Report {
        /// Path to a result log written by 'ocrv review'
        path: PathBuf,
    },

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   ocrv completions zsh > ~/.zsh/completions/_ocrv
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Input file selection.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// JSON file mapping image filenames to recognized text
    #[arg(short, long, env = "OCRV_INPUT")]
    pub input: Option<PathBuf>,
}

/// Arguments for an interactive review.
#[derive(Args, Debug, Default)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory image filenames are resolved under
    #[arg(long, env = "OCRV_IMAGES")]
    pub images: Option<PathBuf>,

    /// Only review items START-END of the input (1-based, inclusive)
    #[arg(long, value_name = "START-END")]
    pub range: Option<String>,

    /// Directory to write the result log to
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Do not write a result log
    #[arg(long)]
    pub no_save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_review() {
        let cli = Cli::try_parse_from(["ocrv", "review"]).unwrap();
        assert!(matches!(cli.command, Commands::Review(_)));
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_review_alias() {
        let cli = Cli::try_parse_from(["ocrv", "r"]).unwrap();
        assert!(matches!(cli.command, Commands::Review(_)));
    }

    #[test]
    fn test_cli_review_options() {
        let cli = Cli::try_parse_from([
            "ocrv",
            "review",
            "--input",
            "scans.json",
            "--images",
            "scans",
            "--range",
            "2-5",
            "--no-save",
        ])
        .unwrap();

        let Commands::Review(args) = cli.command else {
            panic!("expected review command");
        };
        assert_eq!(args.input.input, Some(PathBuf::from("scans.json")));
        assert_eq!(args.images, Some(PathBuf::from("scans")));
        assert_eq!(args.range.as_deref(), Some("2-5"));
        assert!(args.no_save);
    }

    #[test]
    fn test_cli_list_alias() {
        let cli = Cli::try_parse_from(["ocrv", "ls", "-i", "x.json"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.input, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["ocrv", "--output", "json", "list"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_after_subcommand() {
        let cli = Cli::try_parse_from(["ocrv", "report", "log.json", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Report { .. }));
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["ocrv", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["ocrv"]).is_err());
    }

    #[test]
    fn test_output_format_default() {
        assert!(matches!(OutputFormat::default(), OutputFormat::Pretty));
    }
}
