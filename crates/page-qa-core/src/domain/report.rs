//! Document report emitted by front ends.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, ScoreBand};

/// An analysis result tagged with its source and time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Path or name of the analyzed document.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Quality band of the document score.
    pub rating: ScoreBand,
    /// The analysis result.
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl DocumentReport {
    /// Wraps a result, deriving the rating from its score.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        timestamp: impl Into<String>,
        result: AnalysisResult,
    ) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            rating: result.band(),
            result,
        }
    }
}
