use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use ocrv::cli::args::{Cli, Commands};
use ocrv::cli::commands;
use ocrv::config::{ColorSetting, Config, Paths};
use ocrv::logging::{init_logging, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::default();
    let config = Config::load(&paths).context("Failed to load configuration")?;

    match config.general.color {
        ColorSetting::Auto => {},
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
    }

    let format = cli.output.unwrap_or(config.general.default_output);

    let target = if matches!(cli.command, Commands::Review(_)) {
        paths.ensure_dirs()?;
        LogTarget::File(paths.log_file())
    } else {
        LogTarget::Stderr
    };
    init_logging(cli.verbose, &target)?;

    let output = match cli.command {
        Commands::Review(args) => commands::review(&args, &config, &paths, format)?,
        Commands::List(args) => commands::list(&args, &config, format)?,
        Commands::Report { path } => commands::report(&path, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
