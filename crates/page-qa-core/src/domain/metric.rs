//! Metric identities and scores.

use serde::{Deserialize, Serialize};

/// The closed set of page metrics.
///
/// Weight and description are fixed per kind; only the score varies per
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Sharpness and stroke uniformity.
    #[serde(rename = "Text Clarity")]
    TextClarity,
    /// Speckle and artifact density.
    #[serde(rename = "Noise Level")]
    NoiseLevel,
    /// Page rotation.
    #[serde(rename = "Skew / Rotation")]
    SkewRotation,
}

impl MetricKind {
    /// All metrics in page order.
    pub const ALL: [Self; 3] = [Self::TextClarity, Self::NoiseLevel, Self::SkewRotation];

    /// Display name. Consumers match on these strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TextClarity => "Text Clarity",
            Self::NoiseLevel => "Noise Level",
            Self::SkewRotation => "Skew / Rotation",
        }
    }

    /// Relative weight in the page score.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::TextClarity => 55.0,
            Self::NoiseLevel => 20.0,
            Self::SkewRotation => 25.0,
        }
    }

    /// Human-readable explanation of the metric.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::TextClarity => {
                "Measures sharpness, contrast, and text uniformity. A high score indicates \
                 clear, printed text. Lower scores can be due to blur, low contrast, or \
                 handwritten text."
            }
            Self::NoiseLevel => {
                "Estimates the amount of random speckles or marks on the page. Lower noise \
                 results in a higher score."
            }
            Self::SkewRotation => {
                "Detects if the document is tilted. A perfectly aligned document scores \
                 higher, as skew can confuse OCR engines."
            }
        }
    }

    /// Position in [`MetricKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::TextClarity => 0,
            Self::NoiseLevel => 1,
            Self::SkewRotation => 2,
        }
    }

    /// Looks up a metric by display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scored metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric identity, serialized as its display name.
    #[serde(rename = "name")]
    pub kind: MetricKind,
    /// Score from 0.0 (unusable) to 100.0 (ideal).
    pub score: f64,
    /// Relative weight in the page score.
    pub weight: f64,
    /// Human-readable explanation.
    pub description: String,
}

impl Metric {
    /// Builds a metric with the fixed weight and description of `kind`.
    #[must_use]
    pub fn new(kind: MetricKind, score: f64) -> Self {
        Self {
            kind,
            score,
            weight: kind.weight(),
            description: kind.description().to_owned(),
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}
