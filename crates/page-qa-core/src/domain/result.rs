//! Page and document analysis results.

use serde::{Deserialize, Serialize};

use super::{Metric, MetricKind};

/// Result for a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysisResult {
    /// 1-based page number.
    pub page_number: u32,
    /// Weighted mean of the metric scores (0.0-100.0).
    pub overall_score: f64,
    /// Metrics in [`MetricKind::ALL`] order.
    pub metrics: Vec<Metric>,
}

impl PageAnalysisResult {
    /// Returns the metric of the given kind, if present.
    #[must_use]
    pub fn metric(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.kind == kind)
    }

    /// Quality band of the page score.
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }
}

/// Result for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unweighted mean of the page scores.
    pub overall_score: f64,
    /// Number of pages analyzed.
    pub page_count: u32,
    /// Per-metric scores averaged over all pages.
    pub average_metrics: Vec<Metric>,
    /// Page results ordered by page number.
    pub page_results: Vec<PageAnalysisResult>,
}

impl AnalysisResult {
    /// Returns the averaged metric of the given kind, if present.
    #[must_use]
    pub fn average(&self, kind: MetricKind) -> Option<&Metric> {
        self.average_metrics.iter().find(|m| m.kind == kind)
    }

    /// Quality band of the document score.
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }
}

/// Coarse quality band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// Below 40: OCR output is likely unreliable.
    Poor,
    /// 40 up to 75: usable with errors expected.
    Fair,
    /// 75 and above.
    Good,
}

impl ScoreBand {
    /// Upper bound (exclusive) of [`ScoreBand::Poor`].
    pub const FAIR_FROM: f64 = 40.0;
    /// Upper bound (exclusive) of [`ScoreBand::Fair`].
    pub const GOOD_FROM: f64 = 75.0;

    /// Classifies a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < Self::FAIR_FROM {
            Self::Poor
        } else if score < Self::GOOD_FROM {
            Self::Fair
        } else {
            Self::Good
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
