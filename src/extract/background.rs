//! Background estimation strategies for garment photos.

use tracing::debug;

use super::PixelBuffer;
use crate::color::Rgb;

/// Default sampling stride along each border.
pub const BORDER_STRIDE: u32 = 10;

/// Estimates the backdrop color of a photo. Implementations return
/// `None` only for a zero-area buffer.
pub trait BackgroundEstimator {
    fn estimate(&self, pixels: &PixelBuffer) -> Option<Rgb>;
}

/// Averages pixels sampled along all four borders at a fixed stride.
///
/// Corner pixels sit on two borders and get sampled by both passes, so
/// they weigh double. Alpha is not consulted; a transparent border
/// still contributes its RGB values.
#[derive(Debug, Clone, Copy)]
pub struct BorderSampler {
    pub stride: u32,
}

impl Default for BorderSampler {
    fn default() -> Self {
        Self {
            stride: BORDER_STRIDE,
        }
    }
}

impl BackgroundEstimator for BorderSampler {
    fn estimate(&self, pixels: &PixelBuffer) -> Option<Rgb> {
        if pixels.is_empty() {
            return None;
        }
        let stride = self.stride.max(1);
        let (width, height) = (pixels.width(), pixels.height());

        let mut sums = [0u64; 3];
        let mut samples = 0u64;
        let mut take = |x: u32, y: u32| {
            let (color, _alpha) = pixels.rgba_at(x, y);
            sums[0] += color.r as u64;
            sums[1] += color.g as u64;
            sums[2] += color.b as u64;
            samples += 1;
        };

        let mut x = 0;
        while x < width {
            take(x, 0);
            take(x, height - 1);
            x += stride;
        }
        let mut y = 0;
        while y < height {
            take(0, y);
            take(width - 1, y);
            y += stride;
        }

        let average = |sum: u64| (sum as f64 / samples as f64).round() as u8;
        let estimate = Rgb::new(average(sums[0]), average(sums[1]), average(sums[2]));
        debug!(samples, estimate = %estimate.to_hex(), "estimated background");
        Some(estimate)
    }
}
