//! Page source port for obtaining rasterized pages.

use image::RgbaImage;

/// Port for a rasterized document.
///
/// Decoding and rasterization live behind this trait; the core only sees
/// the resulting RGBA bitmaps.
pub trait PageSource: Send + Sync {
    /// Name of the document, for logging and reports.
    fn name(&self) -> &str;

    /// Total number of pages, known before any page is rendered.
    fn page_count(&self) -> u32;

    /// Renders a page to RGBA.
    ///
    /// # Arguments
    ///
    /// * `page_number` - 1-based page number, at most `page_count()`
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be rasterized.
    fn render_page(&self, page_number: u32) -> anyhow::Result<RgbaImage>;
}
