//! CLI command definitions and handlers.

pub mod check;

use clap::{Parser, Subcommand};

/// Page QA - OCR readiness scoring for scanned pages
#[derive(Parser)]
#[command(name = "page-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, scoring options, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score documents for OCR readiness
    Check(check::CheckArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every document scored at or above the minimum.
    Success = 0,
    /// At least one document scored below the minimum.
    BelowThreshold = 1,
    /// Nothing could be analyzed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
