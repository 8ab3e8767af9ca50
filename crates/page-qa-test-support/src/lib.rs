//! Test support utilities for page-qa.
//!
//! Provides mocks, synthetic page builders, and utilities for testing
//! the page-qa analysis pipeline.
//!
//! # Example
//!
//! ```
//! use page_qa_test_support::{MockPageSource, SyntheticPageBuilder};
//!
//! // Create synthetic pages
//! let printed = SyntheticPageBuilder::text_lines(400, 300);
//! let blank = SyntheticPageBuilder::blank(400, 300);
//!
//! // Create a two-page mock document
//! let source = MockPageSource::new(vec![printed, blank]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticPageBuilder;
pub use mocks::{MockPageSource, MockProgressSink, MockResultOutput};
