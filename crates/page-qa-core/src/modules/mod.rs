//! Page quality modules.
//!
//! Each module implements the `PageModule` trait for one metric.

mod clarity;
mod noise;
mod skew;

pub use clarity::{
    analyze_clarity, remap_sharpness, ClarityAnalysis, ClarityConfig, ClarityModule,
    OrientationHistogram,
};
pub use noise::{analyze_noise, NoiseAnalysis, NoiseConfig, NoiseModule};
pub use skew::{analyze_skew, SkewAnalysis, SkewConfig, SkewModule};
