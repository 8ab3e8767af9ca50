//! Text clarity analysis.
//!
//! Combines two sub-scores:
//! - Sharpness from the mean local variance of randomly sampled 3x3 luma
//!   neighborhoods
//! - Stroke uniformity from the orientation histogram of strong Sobel
//!   edges, which penalizes the isotropic strokes of handwriting

use image::GrayImage;
use rand::{Rng, RngCore};

use crate::domain::{MetricKind, PageModule, PixelBuffer};

/// Number of orientation bins (45 degrees each).
const ORIENTATION_BINS: usize = 8;

/// Configuration for clarity analysis.
#[derive(Debug, Clone)]
pub struct ClarityConfig {
    /// Number of random interior points sampled for sharpness.
    pub sample_count: usize,
    /// Mean neighborhood variance that maps to a raw score of 100.
    pub variance_scale: f64,
    /// Sobel magnitude above which a pixel counts as a strong edge.
    pub edge_threshold: f64,
    /// Strong edges required before uniformity is measured.
    pub min_strong_edges: u64,
    /// Share of sharpness in the combined score; uniformity gets the rest.
    pub sharpness_weight: f64,
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            sample_count: 5000,
            variance_scale: 150.0,
            edge_threshold: 50.0,
            min_strong_edges: 1000,
            sharpness_weight: 0.7,
        }
    }
}

/// Histogram of strong-edge gradient directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationHistogram {
    bins: [u64; ORIENTATION_BINS],
    strong_edges: u64,
}

impl OrientationHistogram {
    /// Runs a 3x3 Sobel operator over every interior pixel and bins the
    /// direction of each edge stronger than `threshold`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_gray(gray: &GrayImage, threshold: f64) -> Self {
        let mut bins = [0u64; ORIENTATION_BINS];
        let mut strong_edges = 0u64;

        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let px = gray.as_raw();
        let at = |x: usize, y: usize| i32::from(px[y * width + x]);

        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let gx = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
                let gy = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));

                let (gx, gy) = (f64::from(gx), f64::from(gy));
                if gx.hypot(gy) <= threshold {
                    continue;
                }

                strong_edges += 1;
                let mut angle = gy.atan2(gx).to_degrees();
                if angle < 0.0 {
                    angle += 360.0;
                }
                let bin = ((angle / 45.0).floor() as usize).min(ORIENTATION_BINS - 1);
                bins[bin] += 1;
            }
        }

        Self { bins, strong_edges }
    }

    /// Number of strong edges binned.
    #[must_use]
    pub const fn strong_edges(&self) -> u64 {
        self.strong_edges
    }

    /// Raw bin counts.
    #[must_use]
    pub const fn bins(&self) -> &[u64; ORIENTATION_BINS] {
        &self.bins
    }

    /// How far the normalized histogram is from uniform, scaled so a single
    /// occupied bin scores 100.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn peakedness(&self) -> f64 {
        if self.strong_edges == 0 {
            return 0.0;
        }
        let total = self.strong_edges as f64;
        let uniform = 1.0 / ORIENTATION_BINS as f64;
        let variance = self
            .bins
            .iter()
            .map(|&count| {
                let diff = count as f64 / total - uniform;
                diff * diff
            })
            .sum::<f64>()
            / ORIENTATION_BINS as f64;

        // Variance of a histogram with one occupied bin.
        let max_variance = 7.0 / 64.0;
        (variance / max_variance * 100.0).min(100.0)
    }
}

/// Clarity analysis results.
#[derive(Debug, Clone)]
pub struct ClarityAnalysis {
    /// Mean variance of the sampled 3x3 neighborhoods.
    pub mean_local_variance: f64,
    /// Remapped sharpness score (0.0-100.0).
    pub sharpness: f64,
    /// Edge orientation histogram.
    pub orientations: OrientationHistogram,
    /// Stroke uniformity score (0.0-100.0).
    pub uniformity: f64,
    /// Combined clarity score (0.0-100.0).
    pub score: f64,
}

impl ClarityAnalysis {
    /// Analyze clarity of a page.
    #[must_use]
    pub fn analyze(page: &PixelBuffer<'_>, config: &ClarityConfig, rng: &mut dyn RngCore) -> Self {
        let mean_local_variance = mean_local_variance(page, config.sample_count, rng);
        let sharpness = remap_sharpness(mean_local_variance / config.variance_scale * 100.0);

        let orientations = OrientationHistogram::from_gray(&page.to_gray(), config.edge_threshold);
        let uniformity = if orientations.strong_edges() < config.min_strong_edges {
            // Too little signal to judge; treat as printed.
            100.0
        } else {
            orientations.peakedness()
        };

        let score = (sharpness * config.sharpness_weight
            + uniformity * (1.0 - config.sharpness_weight))
            .clamp(0.0, 100.0);

        Self {
            mean_local_variance,
            sharpness,
            orientations,
            uniformity,
            score,
        }
    }
}

/// Spreads the useful range of the raw variance score.
///
/// Raw scores saturate quickly on sharp scans: `[0, 80)` maps to `[0, 40)`
/// and `[80, 100]` to `[40, 100]`.
#[must_use]
pub fn remap_sharpness(raw: f64) -> f64 {
    let sharpness = if raw >= 80.0 {
        40.0 + (raw - 80.0) * 3.0
    } else {
        raw * 0.5
    };
    sharpness.clamp(0.0, 100.0)
}

/// Mean luma variance over `samples` random interior 3x3 neighborhoods.
///
/// Pages without an interior (narrower or shorter than 3 pixels) have no
/// measurable local contrast and yield 0.
#[allow(clippy::cast_precision_loss)]
fn mean_local_variance(page: &PixelBuffer<'_>, samples: usize, rng: &mut dyn RngCore) -> f64 {
    let (width, height) = (page.width(), page.height());
    if width < 3 || height < 3 || samples == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    for _ in 0..samples {
        let x = rng.gen_range(1..width - 1);
        let y = rng.gen_range(1..height - 1);
        total += neighborhood_variance(page, x, y);
    }
    total / samples as f64
}

/// Population variance of the 3x3 luma neighborhood centered on `(x, y)`.
fn neighborhood_variance(page: &PixelBuffer<'_>, x: u32, y: u32) -> f64 {
    let mut values = [0.0f64; 9];
    let mut i = 0;
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            values[i] = page.luma_at(nx, ny);
            i += 1;
        }
    }
    let mean = values.iter().sum::<f64>() / 9.0;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / 9.0
}

/// Text clarity module.
pub struct ClarityModule {
    config: ClarityConfig,
}

impl ClarityModule {
    /// Creates a new clarity module with the given configuration.
    #[must_use]
    pub const fn new(config: ClarityConfig) -> Self {
        Self { config }
    }

    /// Returns the module configuration.
    #[must_use]
    pub const fn config(&self) -> &ClarityConfig {
        &self.config
    }
}

impl Default for ClarityModule {
    fn default() -> Self {
        Self::new(ClarityConfig::default())
    }
}

impl PageModule for ClarityModule {
    fn kind(&self) -> MetricKind {
        MetricKind::TextClarity
    }

    fn score(&self, page: &PixelBuffer<'_>, rng: &mut dyn RngCore) -> f64 {
        ClarityAnalysis::analyze(page, &self.config, rng).score
    }
}

/// Scores text clarity with the default configuration.
#[must_use]
pub fn analyze_clarity(page: &PixelBuffer<'_>, rng: &mut dyn RngCore) -> f64 {
    ClarityModule::default().score(page, rng)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn analyze(image: &RgbaImage) -> ClarityAnalysis {
        let page = PixelBuffer::from_rgba(image).expect("valid page");
        ClarityAnalysis::analyze(&page, &ClarityConfig::default(), &mut rng())
    }

    fn horizontal_bars(width: u32, height: u32, bar: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |_, y| {
            if (y / bar) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_default_config() {
        let config = ClarityConfig::default();
        assert_eq!(config.sample_count, 5000);
        assert_eq!(config.min_strong_edges, 1000);
        assert!((config.variance_scale - 150.0).abs() < f64::EPSILON);
        assert!((config.edge_threshold - 50.0).abs() < f64::EPSILON);
        assert!((config.sharpness_weight - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_module_kind() {
        assert_eq!(ClarityModule::default().kind(), MetricKind::TextClarity);
    }

    #[test]
    fn test_remap_sharpness() {
        assert!(remap_sharpness(0.0).abs() < f64::EPSILON);
        assert!((remap_sharpness(40.0) - 20.0).abs() < 1e-9);
        assert!((remap_sharpness(79.9) - 39.95).abs() < 1e-9);
        assert!((remap_sharpness(80.0) - 40.0).abs() < 1e-9);
        assert!((remap_sharpness(90.0) - 70.0).abs() < 1e-9);
        assert!((remap_sharpness(100.0) - 100.0).abs() < 1e-9);
        assert!((remap_sharpness(500.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_page() {
        let image = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        let analysis = analyze(&image);

        assert_eq!(analysis.orientations.strong_edges(), 0);
        assert!((analysis.uniformity - 100.0).abs() < f64::EPSILON);
        assert!(analysis.sharpness.abs() < f64::EPSILON);
        // Only the uniformity share remains.
        assert!((analysis.score - 30.0).abs() < 1e-9, "score={}", analysis.score);
    }

    #[test]
    fn test_single_pixel_is_finite() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        let analysis = analyze(&image);
        assert!(analysis.score.is_finite());
        assert!((0.0..=100.0).contains(&analysis.score));
    }

    #[test]
    fn test_two_by_two_is_finite() {
        let image = RgbaImage::from_fn(2, 2, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let analysis = analyze(&image);
        assert!(analysis.score.is_finite());
        assert!(analysis.sharpness.abs() < f64::EPSILON);
    }

    #[test]
    fn test_pixel_checkerboard_is_sharp() {
        let image = RgbaImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let analysis = analyze(&image);
        assert!(
            (analysis.sharpness - 100.0).abs() < f64::EPSILON,
            "sharpness={}",
            analysis.sharpness
        );
    }

    #[test]
    fn test_horizontal_bars_two_orientations() {
        // 48 boundaries: as many dark-to-light as light-to-dark.
        let image = horizontal_bars(200, 196, 4);
        let analysis = analyze(&image);

        assert!(analysis.orientations.strong_edges() >= 1000);
        // Every edge points straight up or straight down.
        let bins = analysis.orientations.bins();
        let occupied = bins.iter().filter(|&&c| c > 0).count();
        assert_eq!(occupied, 2, "bins={bins:?}");

        // Two equal peaks: variance 3/64 of a possible 7/64.
        let expected = 300.0 / 7.0;
        assert!(
            (analysis.uniformity - expected).abs() < 1e-6,
            "uniformity={}",
            analysis.uniformity
        );
    }

    #[test]
    fn test_single_orientation_scores_full_uniformity() {
        let mut histogram = OrientationHistogram {
            bins: [0; ORIENTATION_BINS],
            strong_edges: 2000,
        };
        histogram.bins[2] = 2000;
        assert!((histogram.peakedness() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_orientations_score_zero_uniformity() {
        let histogram = OrientationHistogram {
            bins: [250; ORIENTATION_BINS],
            strong_edges: 2000,
        };
        assert!(histogram.peakedness().abs() < 1e-9);
    }

    #[test]
    fn test_isotropic_noise_is_less_uniform_than_bars() {
        let mut state = rng();
        let noise = RgbaImage::from_fn(200, 200, |_, _| {
            let v: u8 = state.gen();
            Rgba([v, v, v, 255])
        });
        let noisy = analyze(&noise);
        let bars = analyze(&horizontal_bars(200, 200, 4));

        assert!(noisy.orientations.strong_edges() >= 1000);
        assert!(
            noisy.uniformity < bars.uniformity,
            "noise={} bars={}",
            noisy.uniformity,
            bars.uniformity
        );
        assert!(noisy.uniformity < 20.0, "uniformity={}", noisy.uniformity);
    }

    #[test]
    fn test_too_few_edges_assumes_printed() {
        // A single dark square yields far fewer than 1000 strong edges.
        let image = RgbaImage::from_fn(100, 100, |x, y| {
            if (40..50).contains(&x) && (40..50).contains(&y) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let analysis = analyze(&image);
        assert!(analysis.orientations.strong_edges() < 1000);
        assert!((analysis.uniformity - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_seed_same_score() {
        let image = horizontal_bars(120, 90, 3);
        let page = PixelBuffer::from_rgba(&image).expect("valid page");

        let first = analyze_clarity(&page, &mut StdRng::seed_from_u64(42));
        let second = analyze_clarity(&page, &mut StdRng::seed_from_u64(42));
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_sample_count_zero() {
        let image = horizontal_bars(50, 50, 2);
        let page = PixelBuffer::from_rgba(&image).expect("valid page");
        let config = ClarityConfig {
            sample_count: 0,
            ..Default::default()
        };
        let analysis = ClarityAnalysis::analyze(&page, &config, &mut rng());
        assert!(analysis.mean_local_variance.abs() < f64::EPSILON);
        assert!(analysis.score.is_finite());
    }
}
