//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the analysis core and external adapters.

mod page_source;
mod progress;
mod result_output;

pub use page_source::PageSource;
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
