//! Borrowed RGBA page bitmaps.

use image::{GrayImage, Luma, RgbaImage};

use crate::error::AnalysisError;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Perceptual grayscale value of an RGB triple (0.0-255.0).
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// Immutable view of a rasterized page.
///
/// Samples are row-major RGBA, exactly `width * height * 4` bytes. The
/// analyzers only ever read from it.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    samples: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wraps raw RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidBuffer`] if the sample count does not
    /// match the declared dimensions.
    pub fn new(width: u32, height: u32, samples: &'a [u8]) -> Result<Self, AnalysisError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS));

        match expected {
            Some(expected) if expected == samples.len() => Ok(Self {
                width,
                height,
                samples,
            }),
            _ => Err(AnalysisError::InvalidBuffer {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: samples.len(),
            }),
        }
    }

    /// Wraps a decoded RGBA image.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidBuffer`] if the image container holds
    /// more samples than its dimensions describe.
    pub fn from_rgba(image: &'a RgbaImage) -> Result<Self, AnalysisError> {
        Self::new(image.width(), image.height(), image.as_raw())
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA samples.
    #[must_use]
    pub const fn samples(&self) -> &'a [u8] {
        self.samples
    }

    /// Number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.samples.len() / CHANNELS
    }

    /// RGB of the pixel at row-major `index`, ignoring alpha.
    ///
    /// # Panics
    ///
    /// Panics if `index >= pixel_count()`.
    #[must_use]
    pub fn rgb_at(&self, index: usize) -> [u8; 3] {
        let i = index * CHANNELS;
        [self.samples[i], self.samples[i + 1], self.samples[i + 2]]
    }

    /// Luma of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    #[must_use]
    pub fn luma_at(&self, x: u32, y: u32) -> f64 {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        luma(self.samples[i], self.samples[i + 1], self.samples[i + 2])
    }

    /// Iterates over the luma of every pixel in row-major order.
    pub fn lumas(&self) -> impl Iterator<Item = f64> + 'a {
        self.samples
            .chunks_exact(CHANNELS)
            .map(|px| luma(px[0], px[1], px[2]))
    }

    /// Full-page 8-bit grayscale, truncating each luma value.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn to_gray(&self) -> GrayImage {
        let mut gray = GrayImage::new(self.width, self.height);
        for (dst, value) in gray.pixels_mut().zip(self.lumas()) {
            *dst = Luma([value as u8]);
        }
        gray
    }
}
