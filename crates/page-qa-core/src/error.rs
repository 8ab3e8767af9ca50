//! Error types for page analysis.

use thiserror::Error;

/// Errors that abort an analysis run.
///
/// Degenerate pages (blank, uniform, too few edges) are not errors; every
/// analyzer has a defined fallback score for them.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("invalid pixel buffer: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Required sample count.
        expected: usize,
        /// Supplied sample count.
        actual: usize,
    },

    /// The document has no pages to analyze.
    #[error("document has no pages")]
    NoPages,

    /// The page source could not produce a bitmap for a page.
    #[error("page {page} could not be rendered")]
    RenderingUnavailable {
        /// 1-based page number.
        page: u32,
        /// Underlying rasterizer failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
