//! Page- and document-level score aggregation.

use crate::domain::{AnalysisResult, Metric, MetricKind, PageAnalysisResult};
use crate::error::AnalysisError;

/// Weighted mean of metric scores.
///
/// Returns 0 for an empty metric list.
#[must_use]
pub fn page_score(metrics: &[Metric]) -> f64 {
    let total_weight: f64 = metrics.iter().map(|m| m.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    metrics.iter().map(|m| m.score * m.weight).sum::<f64>() / total_weight
}

/// Running score totals for the closed metric set.
#[derive(Debug, Default)]
struct MetricTotals {
    sums: [f64; MetricKind::ALL.len()],
    counts: [u32; MetricKind::ALL.len()],
    first_seen: Vec<MetricKind>,
}

impl MetricTotals {
    fn add(&mut self, metric: &Metric) {
        let i = metric.kind.index();
        if self.counts[i] == 0 {
            self.first_seen.push(metric.kind);
        }
        self.sums[i] += metric.score;
        self.counts[i] += 1;
    }

    fn averages(&self) -> Vec<Metric> {
        self.first_seen
            .iter()
            .map(|&kind| {
                let i = kind.index();
                Metric::new(kind, self.sums[i] / f64::from(self.counts[i]))
            })
            .collect()
    }
}

/// Averages each metric's score across pages.
///
/// Metrics appear in the order they were first seen; weight and
/// description come from the metric kind.
#[must_use]
pub fn average_metrics(pages: &[PageAnalysisResult]) -> Vec<Metric> {
    let mut totals = MetricTotals::default();
    for metric in pages.iter().flat_map(|p| &p.metrics) {
        totals.add(metric);
    }
    totals.averages()
}

/// Builds the document result from per-page results.
///
/// The document score is the unweighted mean of the page scores.
///
/// # Errors
///
/// Returns [`AnalysisError::NoPages`] if `pages` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn document_result(pages: Vec<PageAnalysisResult>) -> Result<AnalysisResult, AnalysisError> {
    if pages.is_empty() {
        return Err(AnalysisError::NoPages);
    }

    let overall_score =
        pages.iter().map(|p| p.overall_score).sum::<f64>() / pages.len() as f64;
    let average_metrics = average_metrics(&pages);
    let page_count = u32::try_from(pages.len()).unwrap_or(u32::MAX);

    Ok(AnalysisResult {
        overall_score,
        page_count,
        average_metrics,
        page_results: pages,
    })
}
