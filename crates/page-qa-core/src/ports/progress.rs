//! Progress reporting port for UI integration.

use crate::domain::PageAnalysisResult;

/// Events emitted while a document is analyzed.
///
/// `Page` is sent exactly once per page, in page order, before the page is
/// rendered. `PageCompleted` and `Finished` are additional events for
/// front ends that show per-page scores or a summary.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A page is about to be rendered and analyzed.
    Page {
        /// 1-based page number.
        current_page: u32,
        /// Pages in the document.
        total_pages: u32,
    },
    /// A page has been scored.
    PageCompleted {
        /// The page result.
        result: PageAnalysisResult,
    },
    /// Every page has been scored.
    Finished {
        /// Document score.
        overall_score: f64,
        /// Pages analyzed.
        page_count: u32,
    },
}

/// Port for receiving progress events.
///
/// A run over `n` pages sends `n` `Page` events. Counting every call to
/// `on_event` also includes the `n` `PageCompleted` events and one
/// `Finished`.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}
