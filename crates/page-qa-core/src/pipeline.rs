//! Document analysis orchestration.
//!
//! Pages are processed strictly in order, one at a time. Each page is
//! scored by the clarity, noise and skew modules, and the page results are
//! aggregated into the document result once every page is done.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::aggregate;
use crate::domain::{AnalysisResult, Metric, PageAnalysisResult, PageModule, PixelBuffer};
use crate::error::AnalysisError;
use crate::modules::{
    ClarityConfig, ClarityModule, NoiseConfig, NoiseModule, SkewConfig, SkewModule,
};
use crate::ports::{PageSource, ProgressEvent, ProgressSink};

/// Options for a [`PageAnalyzer`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    /// Seed for the sampling generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Clarity module settings.
    pub clarity: ClarityConfig,
    /// Noise module settings.
    pub noise: NoiseConfig,
    /// Skew module settings.
    pub skew: SkewConfig,
}

/// Scores pages and documents.
pub struct PageAnalyzer {
    clarity: ClarityModule,
    noise: NoiseModule,
    skew: SkewModule,
    seed: Option<u64>,
}

impl PageAnalyzer {
    /// Creates an analyzer with the given options.
    #[must_use]
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            clarity: ClarityModule::new(options.clarity),
            noise: NoiseModule::new(options.noise),
            skew: SkewModule::new(options.skew),
            seed: options.seed,
        }
    }

    /// Modules in metric order.
    fn modules(&self) -> [&dyn PageModule; 3] {
        [&self.clarity, &self.noise, &self.skew]
    }

    /// Generator for one run.
    fn rng(&self) -> StdRng {
        self.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    /// Scores a single page.
    pub fn analyze_page(
        &self,
        page_number: u32,
        page: &PixelBuffer<'_>,
        rng: &mut dyn RngCore,
    ) -> PageAnalysisResult {
        let mut metrics = Vec::with_capacity(3);
        for module in self.modules() {
            metrics.push(Metric::new(module.kind(), module.score(page, rng)));
        }
        let overall_score = aggregate::page_score(&metrics);

        debug!(
            page = page_number,
            width = page.width(),
            height = page.height(),
            score = overall_score,
            "page analyzed"
        );

        PageAnalysisResult {
            page_number,
            overall_score,
            metrics,
        }
    }

    /// Renders and scores every page of a document.
    ///
    /// `progress` receives a [`ProgressEvent::Page`] before each page is
    /// rendered. No result is produced unless every page succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoPages`] for an empty document,
    /// [`AnalysisError::RenderingUnavailable`] if a page fails to render,
    /// and [`AnalysisError::InvalidBuffer`] if a rendered page is malformed.
    pub fn analyze_document(
        &self,
        source: &dyn PageSource,
        progress: &dyn ProgressSink,
    ) -> Result<AnalysisResult, AnalysisError> {
        let total = source.page_count();
        info!(document = source.name(), pages = total, "analyzing document");

        self.run(total, progress, |page_number, rng| {
            let image = source.render_page(page_number).map_err(|e| {
                AnalysisError::RenderingUnavailable {
                    page: page_number,
                    source: e.into(),
                }
            })?;
            let buffer = PixelBuffer::from_rgba(&image)?;
            Ok(self.analyze_page(page_number, &buffer, rng))
        })
    }

    /// Scores already rasterized pages, in order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoPages`] if `pages` is empty.
    pub fn analyze_buffers(
        &self,
        pages: &[PixelBuffer<'_>],
        progress: &dyn ProgressSink,
    ) -> Result<AnalysisResult, AnalysisError> {
        let total = u32::try_from(pages.len()).unwrap_or(u32::MAX);
        self.run(total, progress, |page_number, rng| {
            let page = &pages[(page_number - 1) as usize];
            Ok(self.analyze_page(page_number, page, rng))
        })
    }

    fn run<F>(
        &self,
        total: u32,
        progress: &dyn ProgressSink,
        mut analyze: F,
    ) -> Result<AnalysisResult, AnalysisError>
    where
        F: FnMut(u32, &mut dyn RngCore) -> Result<PageAnalysisResult, AnalysisError>,
    {
        if total == 0 {
            return Err(AnalysisError::NoPages);
        }

        let mut rng = self.rng();
        let mut pages = Vec::with_capacity(total as usize);

        for page_number in 1..=total {
            progress.on_event(ProgressEvent::Page {
                current_page: page_number,
                total_pages: total,
            });
            let result = analyze(page_number, &mut rng)?;
            progress.on_event(ProgressEvent::PageCompleted {
                result: result.clone(),
            });
            pages.push(result);
        }

        let result = aggregate::document_result(pages)?;
        progress.on_event(ProgressEvent::Finished {
            overall_score: result.overall_score,
            page_count: result.page_count,
        });
        Ok(result)
    }
}

impl Default for PageAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}
