//! Page QA Core - OCR readiness heuristics for document pages
//!
//! This crate contains the domain types, the clarity, noise and skew
//! modules, score aggregation, and the page-by-page analysis pipeline.

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod ports;

pub use domain::{
    AnalysisResult, DocumentReport, Metric, MetricKind, PageAnalysisResult, PageModule,
    PixelBuffer, ScoreBand,
};
pub use error::AnalysisError;
pub use modules::{
    analyze_clarity, analyze_noise, analyze_skew, ClarityConfig, NoiseConfig, SkewConfig,
};
pub use pipeline::{AnalyzerOptions, PageAnalyzer};
pub use ports::{NoProgress, PageSource, ProgressEvent, ProgressSink, ResultOutput};
