//! Page QA CLI - OCR readiness scoring for scanned documents.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::check::CheckArgs;
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Check(args)) => check(args, &config),
        None => {
            // Default behavior: run check with flattened args
            if cli.check.paths.is_empty() {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            check(cli.check, &config)
        }
    };

    exit_code.into()
}

fn check(args: CheckArgs, config: &AppConfig) -> ExitCode {
    let args = CheckArgs::with_config(args, config);
    match commands::check::run(&args) {
        Ok(result) => {
            debug!(
                analyzed = result.analyzed,
                failed = result.failed,
                below_threshold = result.below_threshold,
                "check finished"
            );
            result.exit_code
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
