//! Skew detection.
//!
//! The page is binarized and its ink projected onto a rotated vertical axis
//! for each candidate angle. Text lines aligned with the projection produce
//! sharp peaks in the profile, so the angle whose profile has the highest
//! variance is taken as the page skew.

use rand::RngCore;
use tracing::trace;

use crate::domain::{MetricKind, PageModule, PixelBuffer};

/// Configuration for skew detection.
#[derive(Debug, Clone)]
pub struct SkewConfig {
    /// Largest rotation tried in either direction, in degrees.
    pub max_angle: f64,
    /// Spacing of candidate angles, in degrees.
    pub angle_step: f64,
    /// Luma below which a pixel is ink.
    pub ink_threshold: f64,
    /// Score points lost per degree of skew.
    pub penalty_per_degree: f64,
}

impl Default for SkewConfig {
    fn default() -> Self {
        Self {
            max_angle: 5.0,
            angle_step: 0.5,
            ink_threshold: 128.0,
            penalty_per_degree: 15.0,
        }
    }
}

impl SkewConfig {
    /// Candidate angles in ascending order, always including 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn candidate_angles(&self) -> Vec<f64> {
        let usable = self.angle_step > 0.0 && self.max_angle > 0.0;
        if !usable {
            return vec![0.0];
        }
        let steps = (self.max_angle / self.angle_step).round() as i64;
        (-steps..=steps)
            .map(|i| i as f64 * self.angle_step)
            .collect()
    }
}

/// Skew analysis results.
#[derive(Debug, Clone)]
pub struct SkewAnalysis {
    /// Best-fit skew in degrees.
    pub angle: f64,
    /// Projection variance at the best-fit angle.
    pub variance: f64,
    /// Number of ink pixels.
    pub ink_pixels: usize,
    /// Skew score (0.0-100.0).
    pub score: f64,
}

impl SkewAnalysis {
    /// Analyze skew of a page.
    #[must_use]
    pub fn analyze(page: &PixelBuffer<'_>, config: &SkewConfig) -> Self {
        let ink = ink_coordinates(page, config.ink_threshold);
        let height = page.height() as usize;

        let (angle, variance) = if ink.is_empty() || height == 0 {
            // Every profile is flat; resolve to upright.
            (0.0, 0.0)
        } else {
            best_angle(&ink, height, &config.candidate_angles())
        };

        let score = (100.0 - angle.abs() * config.penalty_per_degree).max(0.0);
        trace!(angle, variance, ink = ink.len(), "skew analysis");

        Self {
            angle,
            variance,
            ink_pixels: ink.len(),
            score,
        }
    }
}

/// Coordinates of every pixel darker than `threshold`.
#[allow(clippy::cast_precision_loss)]
fn ink_coordinates(page: &PixelBuffer<'_>, threshold: f64) -> Vec<(f64, f64)> {
    let width = page.width() as usize;
    if width == 0 {
        return Vec::new();
    }
    page.lumas()
        .enumerate()
        .filter(|&(_, luma)| luma < threshold)
        .map(|(i, _)| ((i % width) as f64, (i / width) as f64))
        .collect()
}

/// Picks the angle with the highest projection variance.
///
/// Angles are tried in the given order and only a strictly higher variance
/// replaces the current best, so an exact tie keeps the earlier angle. A
/// search where no angle beats zero variance stays at 0 degrees.
fn best_angle(ink: &[(f64, f64)], height: usize, angles: &[f64]) -> (f64, f64) {
    let mut best = (0.0, 0.0);
    for &angle in angles {
        let variance = projection_variance(ink, height, angle);
        if variance > best.1 {
            best = (angle, variance);
        }
    }
    best
}

/// Variance of the ink profile projected at `angle` degrees.
///
/// Each ink pixel lands in bin `round(x sin θ + y cos θ)`; bins outside
/// `[0, height)` are dropped.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn projection_variance(ink: &[(f64, f64)], height: usize, angle: f64) -> f64 {
    let (sin, cos) = angle.to_radians().sin_cos();
    let mut profile = vec![0u64; height];

    for &(x, y) in ink {
        let p = (x * sin + y * cos).round();
        if p >= 0.0 && (p as usize) < height {
            profile[p as usize] += 1;
        }
    }

    let n = height as f64;
    let mean = profile.iter().sum::<u64>() as f64 / n;
    profile
        .iter()
        .map(|&count| {
            let diff = count as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n
}

/// Skew / rotation module.
pub struct SkewModule {
    config: SkewConfig,
}

impl SkewModule {
    /// Creates a new skew module with the given configuration.
    #[must_use]
    pub const fn new(config: SkewConfig) -> Self {
        Self { config }
    }

    /// Returns the module configuration.
    #[must_use]
    pub const fn config(&self) -> &SkewConfig {
        &self.config
    }
}

impl Default for SkewModule {
    fn default() -> Self {
        Self::new(SkewConfig::default())
    }
}

impl PageModule for SkewModule {
    fn kind(&self) -> MetricKind {
        MetricKind::SkewRotation
    }

    fn score(&self, page: &PixelBuffer<'_>, _rng: &mut dyn RngCore) -> f64 {
        SkewAnalysis::analyze(page, &self.config).score
    }
}

/// Scores skew with the default configuration.
#[must_use]
pub fn analyze_skew(page: &PixelBuffer<'_>) -> f64 {
    SkewAnalysis::analyze(page, &SkewConfig::default()).score
}
