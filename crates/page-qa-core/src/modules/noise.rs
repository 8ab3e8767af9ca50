//! Noise analysis.
//!
//! A clean scan is close to bi-tonal: one background and one ink color.
//! Sampled pixels whose quantized color is neither of the two dominant
//! colors are counted as speckle, bleed-through or compression artifacts.

use std::collections::HashMap;

use rand::RngCore;
use tracing::trace;

use crate::domain::{MetricKind, PageModule, PixelBuffer};

/// Configuration for noise analysis.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    /// Sample every n-th pixel.
    pub sample_stride: usize,
    /// Channel values per quantization bucket.
    pub quantization_step: f64,
    /// Score points lost per percent of noisy samples.
    pub penalty_per_percent: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            sample_stride: 8,
            quantization_step: 16.0,
            penalty_per_percent: 3.0,
        }
    }
}

/// Noise analysis results.
#[derive(Debug, Clone)]
pub struct NoiseAnalysis {
    /// Pixels sampled.
    pub sampled: u64,
    /// Distinct quantized colors among the samples.
    pub distinct_colors: usize,
    /// Samples of the most frequent color.
    pub background: u64,
    /// Samples of the second most frequent color.
    pub foreground: u64,
    /// Samples of every other color.
    pub noisy: u64,
    /// Noisy samples as a percentage of all samples.
    pub noise_percentage: f64,
    /// Noise score (0.0-100.0, higher is cleaner).
    pub score: f64,
}

impl NoiseAnalysis {
    /// Analyze noise of a page.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn analyze(page: &PixelBuffer<'_>, config: &NoiseConfig) -> Self {
        let mut counts: HashMap<[u8; 3], u64> = HashMap::new();
        let mut sampled = 0u64;

        for index in (0..page.pixel_count()).step_by(config.sample_stride.max(1)) {
            let [r, g, b] = page.rgb_at(index);
            let key = [
                quantize(r, config.quantization_step),
                quantize(g, config.quantization_step),
                quantize(b, config.quantization_step),
            ];
            *counts.entry(key).or_insert(0) += 1;
            sampled += 1;
        }

        let (background, foreground) = top_two(counts.values().copied());
        let distinct_colors = counts.len();

        if distinct_colors < 2 {
            // Blank or uniform page.
            return Self {
                sampled,
                distinct_colors,
                background,
                foreground,
                noisy: 0,
                noise_percentage: 0.0,
                score: 100.0,
            };
        }

        let noisy = sampled - background - foreground;
        let noise_percentage = noisy as f64 / sampled as f64 * 100.0;
        let score = (100.0 - noise_percentage * config.penalty_per_percent).max(0.0);
        trace!(sampled, distinct_colors, noisy, noise_percentage, "noise analysis");

        Self {
            sampled,
            distinct_colors,
            background,
            foreground,
            noisy,
            noise_percentage,
            score,
        }
    }
}

/// Reduces a channel value to its bucket index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(value: u8, step: f64) -> u8 {
    (f64::from(value) / step).round() as u8
}

/// The two largest counts, largest first.
fn top_two(counts: impl Iterator<Item = u64>) -> (u64, u64) {
    let mut first = 0;
    let mut second = 0;
    for count in counts {
        if count > first {
            second = first;
            first = count;
        } else if count > second {
            second = count;
        }
    }
    (first, second)
}

/// Noise level module.
pub struct NoiseModule {
    config: NoiseConfig,
}

impl NoiseModule {
    /// Creates a new noise module with the given configuration.
    #[must_use]
    pub const fn new(config: NoiseConfig) -> Self {
        Self { config }
    }

    /// Returns the module configuration.
    #[must_use]
    pub const fn config(&self) -> &NoiseConfig {
        &self.config
    }
}

impl Default for NoiseModule {
    fn default() -> Self {
        Self::new(NoiseConfig::default())
    }
}

impl PageModule for NoiseModule {
    fn kind(&self) -> MetricKind {
        MetricKind::NoiseLevel
    }

    fn score(&self, page: &PixelBuffer<'_>, _rng: &mut dyn RngCore) -> f64 {
        NoiseAnalysis::analyze(page, &self.config).score
    }
}

/// Scores noise with the default configuration.
#[must_use]
pub fn analyze_noise(page: &PixelBuffer<'_>) -> f64 {
    NoiseAnalysis::analyze(page, &NoiseConfig::default()).score
}
