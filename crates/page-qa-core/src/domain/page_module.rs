//! Trait for per-page metric analyzers.

use rand::RngCore;

use super::{MetricKind, PixelBuffer};

/// A single page-quality heuristic.
///
/// Modules are stateless between calls and never mutate the page.
pub trait PageModule: Send + Sync {
    /// The metric this module produces.
    fn kind(&self) -> MetricKind;

    /// Scores a page from 0.0 (unusable) to 100.0 (ideal).
    ///
    /// `rng` is the run's randomness source; modules that sample the page
    /// draw from it so a seeded run is reproducible.
    fn score(&self, page: &PixelBuffer<'_>, rng: &mut dyn RngCore) -> f64;
}
