//! Filesystem adapter for loading page images.

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use page_qa_core::PageSource;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// A document stored on disk.
///
/// A single image file is a one-page document. A directory is a document
/// whose pages are the images directly inside it, ordered by file name.
pub struct FsDocument {
    name: String,
    pages: Vec<PathBuf>,
    scale: f32,
}

impl FsDocument {
    /// Opens a document from a file or directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist, is a file with an
    /// unsupported extension, or is a directory that cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let pages = if path.is_file() {
            if !is_supported_image(path) {
                bail!("Unsupported file type: {}", path.display());
            }
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            collect_pages(path)?
        } else {
            bail!("Path does not exist: {}", path.display());
        };

        debug!("{} has {} page(s)", path.display(), pages.len());

        Ok(Self {
            name: path.to_string_lossy().into_owned(),
            pages,
            scale: 1.0,
        })
    }

    /// Sets the rasterization scale applied to every page.
    ///
    /// Non-positive or non-finite scales are ignored.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            warn!("Ignoring invalid scale {scale}");
        }
        self
    }

    /// Page image paths in page order.
    #[must_use]
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }
}

impl PageSource for FsDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    fn render_page(&self, page_number: u32) -> Result<RgbaImage> {
        let path = page_number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .with_context(|| format!("Page {page_number} out of range for {}", self.name))?;

        let image = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?
            .to_rgba8();

        Ok(scale_page(image, self.scale))
    }
}

/// Checks if a path has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

/// Lists the supported images directly inside `dir`, sorted by file name.
fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut pages: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if pages.is_empty() {
        warn!("No page images in {}", dir.display());
    }

    Ok(pages)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn scale_page(image: RgbaImage, scale: f32) -> RgbaImage {
    if scale == 1.0 {
        return image;
    }
    let width = ((image.width() as f32 * scale).round() as u32).max(1);
    let height = ((image.height() as f32 * scale).round() as u32).max(1);
    image::imageops::resize(&image, width, height, FilterType::Triangle)
}
