//! Core domain types for page quality analysis.

mod metric;
mod page_module;
mod pixel;
mod report;
mod result;

pub use metric::{Metric, MetricKind};
pub use page_module::PageModule;
pub use pixel::{luma, PixelBuffer, CHANNELS};
pub use report::DocumentReport;
pub use result::{AnalysisResult, PageAnalysisResult, ScoreBand};
