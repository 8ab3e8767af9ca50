//! Check command - score documents for OCR readiness.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use page_qa_adapters::FsDocument;
use page_qa_core::{
    AnalyzerOptions, ClarityConfig, DocumentReport, NoiseConfig, PageAnalyzer, PageSource,
    ResultOutput, SkewConfig,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar, TextOutput};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per document)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
    /// Human-readable summary
    Text,
}

/// Hardcoded default values.
mod defaults {
    pub const MIN_SCORE: f64 = 75.0;
    pub const SCALE: f32 = 1.0;
}

/// Parse and validate a score value (0-100).
fn parse_score(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

/// Parse and validate a render scale (> 0).
fn parse_scale(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive scale"))
    }
}

/// Parse and validate a sample count (> 0).
fn parse_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("sample count must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{s}' is not a valid count")),
    }
}

/// Shared arguments for document analysis.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Documents to analyze: image files, or directories of page images
    pub paths: Vec<PathBuf>,

    /// Seed for random sampling (reproducible scores)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum acceptable document score (0-100)
    #[arg(long, value_parser = parse_score)]
    pub min_score: Option<f64>,

    /// Render scale applied to every page
    #[arg(long, value_parser = parse_scale)]
    pub scale: Option<f32>,

    /// Neighborhoods sampled per page for text clarity
    #[arg(long, value_parser = parse_count)]
    pub samples: Option<usize>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Scoring: CLI > config (accessor provides hardcoded fallback)
        args.seed = args.seed.or(config.analysis.seed);
        args.min_score = args.min_score.or(config.analysis.min_score);
        args.scale = args.scale.or(config.analysis.scale);
        args.samples = args.samples.or(config.clarity.sample_count);

        // Output format: CLI > config (accessor provides fallback)
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Keep config for module settings without CLI flags
        args.config = Some(config.clone());

        args
    }

    /// Get minimum score with fallback to hardcoded default.
    fn min_score(&self) -> f64 {
        self.min_score.unwrap_or(defaults::MIN_SCORE)
    }

    /// Get render scale with fallback to hardcoded default.
    fn scale(&self) -> f32 {
        self.scale.unwrap_or(defaults::SCALE)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Builds analyzer options from merged args (CLI + config).
    fn analyzer_options(&self) -> AnalyzerOptions {
        let config = self.config.as_ref();

        let mut clarity = ClarityConfig::default();
        if let Some(samples) = self.samples {
            clarity.sample_count = samples;
        }

        let mut noise = NoiseConfig::default();
        if let Some(stride) = config.and_then(|c| c.noise.sample_stride) {
            noise.sample_stride = stride;
        }

        let mut skew = SkewConfig::default();
        if let Some(max_angle) = config.and_then(|c| c.skew.max_angle) {
            skew.max_angle = max_angle;
        }
        if let Some(step) = config.and_then(|c| c.skew.angle_step) {
            skew.angle_step = step;
        }

        AnalyzerOptions {
            seed: self.seed,
            clarity,
            noise,
            skew,
        }
    }
}

/// Result of running the check command.
pub struct CheckResult {
    /// Number of documents scored.
    pub analyzed: usize,
    /// Number of documents that could not be scored.
    pub failed: usize,
    /// Number of scored documents below the minimum score.
    pub below_threshold: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let analyzer = PageAnalyzer::new(args.analyzer_options());
    if let Some(seed) = args.seed {
        debug!("Sampling with seed {seed}");
    }

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());

    let format = args.format();
    let json = JsonOutput::stdout();
    let text = TextOutput::stdout();
    let output: &dyn ResultOutput = match format {
        OutputFormat::Text => &text,
        OutputFormat::Jsonl | OutputFormat::Json => &json,
    };

    let min_score = args.min_score();
    let mut analyzed = 0usize;
    let mut failed = 0usize;
    let mut below_threshold = 0usize;
    let mut all_reports: Vec<DocumentReport> = Vec::new();

    for path in &args.paths {
        let report = match analyze_path(&analyzer, path, args.scale(), args.quiet, show_progress) {
            Ok(report) => report,
            Err(e) => {
                warn!("Skipping {}: {e:#}", path.display());
                failed += 1;
                continue;
            }
        };

        if report.result.overall_score < min_score {
            below_threshold += 1;
        }

        match format {
            OutputFormat::Json => all_reports.push(report),
            OutputFormat::Jsonl | OutputFormat::Text => output.write(&report)?,
        }

        analyzed += 1;
    }

    // For JSON format, output all reports as array
    if format == OutputFormat::Json {
        json.write_array(&all_reports, args.pretty)?;
    }

    output.flush()?;

    let exit_code = if analyzed == 0 {
        ExitCode::Error
    } else if below_threshold > 0 {
        ExitCode::BelowThreshold
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        analyzed,
        failed,
        below_threshold,
        exit_code,
    })
}

/// Scores one document.
fn analyze_path(
    analyzer: &PageAnalyzer,
    path: &Path,
    scale: f32,
    quiet: bool,
    show_progress: bool,
) -> Result<DocumentReport> {
    let document = FsDocument::open(path)?.with_scale(scale);
    let progress = ProgressBar::new(document.name(), quiet, show_progress);

    let result = analyzer
        .analyze_document(&document, &progress)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    Ok(DocumentReport::new(document.name(), iso_timestamp(), result))
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn parse(argv: &[&str]) -> CheckArgs {
        Harness::try_parse_from(std::iter::once("page-qa").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    fn config(toml: &str) -> AppConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("0"), Ok(0.0));
        assert_eq!(parse_score("75.5"), Ok(75.5));
        assert!(parse_score("100.1").is_err());
        assert!(parse_score("-1").is_err());
        assert!(parse_score("abc").is_err());
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("0.5"), Ok(0.5));
        assert!(parse_scale("0").is_err());
        assert!(parse_scale("-2").is_err());
        assert!(parse_scale("inf").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("100"), Ok(100));
        assert!(parse_count("0").is_err());
        assert!(parse_count("-5").is_err());
    }

    #[test]
    fn test_defaults_without_config() {
        let args = CheckArgs::with_config(parse(&["scan.png"]), &AppConfig::default());
        assert!((args.min_score() - 75.0).abs() < f64::EPSILON);
        assert!((args.scale() - 1.0).abs() < f32::EPSILON);
        assert_eq!(args.format(), OutputFormat::Jsonl);

        let options = args.analyzer_options();
        assert_eq!(options.seed, None);
        assert_eq!(options.clarity.sample_count, 5000);
        assert_eq!(options.noise.sample_stride, 8);
    }

    #[test]
    fn test_config_fills_unset_args() {
        let config = config(
            r"
[analysis]
seed = 9
min_score = 60.0

[clarity]
sample_count = 1000

[noise]
sample_stride = 2

[skew]
max_angle = 10.0

[output]
format = 'text'
pretty = true
",
        );
        let args = CheckArgs::with_config(parse(&["scan.png"]), &config);

        assert_eq!(args.seed, Some(9));
        assert!((args.min_score() - 60.0).abs() < f64::EPSILON);
        assert_eq!(args.format(), OutputFormat::Text);
        assert!(args.pretty);

        let options = args.analyzer_options();
        assert_eq!(options.clarity.sample_count, 1000);
        assert_eq!(options.noise.sample_stride, 2);
        assert!((options.skew.max_angle - 10.0).abs() < f64::EPSILON);
        assert!((options.skew.angle_step - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = config(
            r"
[analysis]
seed = 9
min_score = 60.0

[clarity]
sample_count = 1000

[output]
format = 'text'
",
        );
        let args = CheckArgs::with_config(
            parse(&[
                "--seed",
                "1",
                "--min-score",
                "90",
                "--samples",
                "200",
                "--format",
                "json",
                "scan.png",
            ]),
            &config,
        );

        assert_eq!(args.seed, Some(1));
        assert!((args.min_score() - 90.0).abs() < f64::EPSILON);
        assert_eq!(args.format(), OutputFormat::Json);
        assert_eq!(args.analyzer_options().clarity.sample_count, 200);
    }
}
