//! Page QA Adapters - External adapters for page-qa.
//!
//! This crate provides adapters for:
//! - Filesystem documents (single images or directories of page images)

pub mod fs;

pub use fs::{is_supported_image, FsDocument};
