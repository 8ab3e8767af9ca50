//! Configuration file support for page-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/page-qa/config.toml` (lowest priority)
//! - Project-local: `.page-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Project-local config file name.
const PROJECT_FILE: &str = ".page-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Run-wide analysis settings.
    pub analysis: AnalysisSettings,
    /// Text clarity settings.
    pub clarity: ClaritySettings,
    /// Noise settings.
    pub noise: NoiseSettings,
    /// Skew settings.
    pub skew: SkewSettings,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Run-wide analysis options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Seed for the sampling generator.
    pub seed: Option<u64>,
    /// Document score below which the run exits with status 1 (0-100).
    pub min_score: Option<f64>,
    /// Render scale applied to every page.
    pub scale: Option<f32>,
}

/// Text clarity configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClaritySettings {
    /// Random neighborhoods sampled per page.
    pub sample_count: Option<usize>,
}

/// Noise configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Sample every n-th pixel.
    pub sample_stride: Option<usize>,
}

/// Skew configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SkewSettings {
    /// Largest tilt searched, in degrees.
    pub max_angle: Option<f64>,
    /// Spacing of candidate angles, in degrees.
    pub angle_step: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json", "jsonl" or "text".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/page-qa/config.toml`
    /// 2. Project-local: `.page-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are dropped with a
    /// warning.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            warn!("Ignoring config value: {problem}");
        }

        config
    }

    /// Drops values outside their accepted ranges.
    ///
    /// Returns one message per dropped value.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(s) = self.analysis.min_score {
            if !(0.0..=100.0).contains(&s) {
                problems.push(format!("analysis.min_score must be 0-100, got {s}"));
                self.analysis.min_score = None;
            }
        }
        if let Some(s) = self.analysis.scale {
            if !(s.is_finite() && s > 0.0) {
                problems.push(format!("analysis.scale must be positive, got {s}"));
                self.analysis.scale = None;
            }
        }
        if self.clarity.sample_count == Some(0) {
            problems.push("clarity.sample_count must be positive, got 0".into());
            self.clarity.sample_count = None;
        }
        if self.noise.sample_stride == Some(0) {
            problems.push("noise.sample_stride must be positive, got 0".into());
            self.noise.sample_stride = None;
        }
        if let Some(a) = self.skew.max_angle {
            if !(a.is_finite() && a > 0.0) {
                problems.push(format!("skew.max_angle must be positive, got {a}"));
                self.skew.max_angle = None;
            }
        }
        if let Some(a) = self.skew.angle_step {
            if !(a.is_finite() && a > 0.0) {
                problems.push(format!("skew.angle_step must be positive, got {a}"));
                self.skew.angle_step = None;
            }
        }

        if let Some(ref f) = self.output.format {
            if !matches!(f.as_str(), "json" | "jsonl" | "text") {
                problems.push(format!(
                    "output.format must be 'json', 'jsonl' or 'text', got '{f}'"
                ));
                self.output.format = None;
            }
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Analysis
        self.analysis.seed = other.analysis.seed.or(self.analysis.seed);
        self.analysis.min_score = other.analysis.min_score.or(self.analysis.min_score);
        self.analysis.scale = other.analysis.scale.or(self.analysis.scale);

        // Modules
        self.clarity.sample_count = other.clarity.sample_count.or(self.clarity.sample_count);
        self.noise.sample_stride = other.noise.sample_stride.or(self.noise.sample_stride);
        self.skew.max_angle = other.skew.max_angle.or(self.skew.max_angle);
        self.skew.angle_step = other.skew.angle_step.or(self.skew.angle_step);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("page-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.page-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
