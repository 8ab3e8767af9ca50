//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use image::RgbaImage;
use page_qa_core::domain::DocumentReport;
use page_qa_core::ports::{PageSource, ProgressEvent, ProgressSink, ResultOutput};

/// Mock implementation of `PageSource` for testing.
///
/// Serves pre-built pages and records which pages were rendered.
pub struct MockPageSource {
    name: String,
    pages: Vec<RgbaImage>,
    failing_page: Option<u32>,
    rendered: Arc<Mutex<Vec<u32>>>,
}

impl MockPageSource {
    /// Creates a new mock document with the given pages.
    #[must_use]
    pub fn new(pages: Vec<RgbaImage>) -> Self {
        Self {
            name: "mock.pdf".into(),
            pages,
            failing_page: None,
            rendered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates an empty mock document.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Makes rendering of `page_number` (1-based) fail.
    #[must_use]
    pub fn failing_at(mut self, page_number: u32) -> Self {
        self.failing_page = Some(page_number);
        self
    }

    /// Returns the page numbers rendered so far, in call order.
    #[must_use]
    pub fn rendered_pages(&self) -> Vec<u32> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PageSource for MockPageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    fn render_page(&self, page_number: u32) -> anyhow::Result<RgbaImage> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(page_number);

        if self.failing_page == Some(page_number) {
            anyhow::bail!("renderer crashed on page {page_number}");
        }

        let index = usize::try_from(page_number.saturating_sub(1))?;
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("page {page_number} out of range"))
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<DocumentReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<DocumentReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &DocumentReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `(current_page, total_pages)` of every `Page` event, in order.
    #[must_use]
    pub fn page_events(&self) -> Vec<(u32, u32)> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Page {
                    current_page,
                    total_pages,
                } => Some((*current_page, *total_pages)),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of `PageCompleted` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::PageCompleted { .. }))
            .count()
    }

    /// Returns whether a `Finished` event was received.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Finished { .. }))
    }

    /// Returns the score and page count from the `Finished` event, if any.
    #[must_use]
    pub fn finished(&self) -> Option<(f64, u32)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                overall_score,
                page_count,
            } => Some((*overall_score, *page_count)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::SyntheticPageBuilder;
    use page_qa_core::domain::AnalysisResult;

    #[test]
    fn test_mock_page_source_empty() {
        let source = MockPageSource::empty();
        assert_eq!(source.page_count(), 0);
        assert!(source.render_page(1).is_err());
    }

    #[test]
    fn test_mock_page_source_records_renders() {
        let source = MockPageSource::new(vec![
            SyntheticPageBuilder::blank(10, 10),
            SyntheticPageBuilder::blank(20, 20),
        ]);

        assert_eq!(source.page_count(), 2);
        assert_eq!(source.render_page(2).unwrap().dimensions(), (20, 20));
        assert_eq!(source.render_page(1).unwrap().dimensions(), (10, 10));
        assert_eq!(source.rendered_pages(), vec![2, 1]);
    }

    #[test]
    fn test_mock_page_source_failing_page() {
        let source =
            MockPageSource::new(vec![SyntheticPageBuilder::blank(10, 10)]).failing_at(1);
        let err = source.render_page(1).unwrap_err();
        assert!(err.to_string().contains("page 1"));
    }

    #[test]
    fn test_mock_result_output() {
        let output = MockResultOutput::new();
        let result = AnalysisResult {
            overall_score: 80.0,
            page_count: 1,
            average_metrics: vec![],
            page_results: vec![],
        };
        let report = DocumentReport::new("scan.pdf", "2024-01-01T00:00:00Z", result);

        output.write(&report).unwrap();
        output.flush().unwrap();

        assert_eq!(output.reports().len(), 1);
        assert_eq!(output.reports()[0].path, "scan.pdf");
        assert_eq!(output.flush_count(), 1);
    }

    #[test]
    fn test_mock_progress_sink() {
        let sink = MockProgressSink::new();

        sink.on_event(ProgressEvent::Page {
            current_page: 1,
            total_pages: 1,
        });
        sink.on_event(ProgressEvent::Finished {
            overall_score: 50.0,
            page_count: 1,
        });

        assert_eq!(sink.page_events(), vec![(1, 1)]);
        assert_eq!(sink.completed_count(), 0);
        assert!(sink.has_finished());
        assert_eq!(sink.finished(), Some((50.0, 1)));
    }
}
