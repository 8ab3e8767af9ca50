//! Synthetic page builders for testing.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Paper white.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Ink black.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Builder for creating synthetic test pages.
///
/// Provides convenience methods for generating RGBA pages with specific
/// characteristics (blank, printed lines, rotated, speckled, etc.).
pub struct SyntheticPageBuilder;

impl SyntheticPageBuilder {
    // === Degenerate Pages ===

    /// Creates an all-white page.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, WHITE)
    }

    /// Creates a page of a single color.
    #[must_use]
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    /// Creates a 1x1 page (edge case).
    #[must_use]
    pub fn single_pixel(rgb: [u8; 3]) -> RgbaImage {
        Self::uniform(1, 1, rgb)
    }

    // === Printed-Like Pages ===

    /// Creates black horizontal lines on white, 4 px thick every 20 px.
    #[must_use]
    pub fn text_lines(width: u32, height: u32) -> RgbaImage {
        Self::lines(width, height, 0.0, 20.0, 4.0)
    }

    /// Creates the text-line page rotated by `angle` degrees.
    #[must_use]
    pub fn rotated_text_lines(width: u32, height: u32, angle: f64) -> RgbaImage {
        Self::lines(width, height, angle, 20.0, 4.0)
    }

    /// Creates parallel black lines on white.
    ///
    /// A pixel is ink when `x sin(angle) + y cos(angle)` falls within
    /// `thickness` of a multiple of `spacing`.
    #[must_use]
    pub fn lines(width: u32, height: u32, angle: f64, spacing: f64, thickness: f64) -> RgbaImage {
        let (sin, cos) = angle.to_radians().sin_cos();
        RgbaImage::from_fn(width, height, |x, y| {
            let d = f64::from(x) * sin + f64::from(y) * cos;
            if d.rem_euclid(spacing) < thickness {
                BLACK
            } else {
                WHITE
            }
        })
    }

    /// Creates a black and white checkerboard.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, cell_size: u32) -> RgbaImage {
        let cell = cell_size.max(1);
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                WHITE
            } else {
                BLACK
            }
        })
    }

    // === Degraded Pages ===

    /// Creates concentric rings around the page center.
    ///
    /// Stroke edges point in every direction, like handwriting.
    #[must_use]
    pub fn rings(width: u32, height: u32) -> RgbaImage {
        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        RgbaImage::from_fn(width, height, |x, y| {
            let r = (f64::from(x) - cx).hypot(f64::from(y) - cy);
            if r.rem_euclid(12.0) < 3.0 {
                BLACK
            } else {
                WHITE
            }
        })
    }

    /// Creates the text-line page with mid-gray speckles on roughly
    /// `fraction` of the pixels.
    #[must_use]
    pub fn speckled(width: u32, height: u32, fraction: f64, seed: u64) -> RgbaImage {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut page = Self::text_lines(width, height);
        for pixel in page.pixels_mut() {
            if rng.gen_bool(fraction.clamp(0.0, 1.0)) {
                *pixel = Rgba([128, 128, 128, 255]);
            }
        }
        page
    }

    /// Creates a page of uniformly random RGB values.
    #[must_use]
    pub fn random_noise(width: u32, height: u32, seed: u64) -> RgbaImage {
        let mut rng = StdRng::seed_from_u64(seed);
        RgbaImage::from_fn(width, height, |_, _| Rgba([rng.gen(), rng.gen(), rng.gen(), 255]))
    }
}

/// Convenience functions for common test pages.
impl SyntheticPageBuilder {
    /// Returns a standard printed page (400x300 horizontal lines).
    #[must_use]
    pub fn printed_page() -> RgbaImage {
        Self::text_lines(400, 300)
    }

    /// Returns a standard blank page (400x300 white).
    #[must_use]
    pub fn blank_page() -> RgbaImage {
        Self::blank(400, 300)
    }

    /// Returns a standard skewed page (400x300 lines at 3 degrees).
    #[must_use]
    pub fn skewed_page() -> RgbaImage {
        Self::rotated_text_lines(400, 300, 3.0)
    }
}
