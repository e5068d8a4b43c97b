//! Dominant color extraction from garment photos.
//!
//! The pipeline: estimate the backdrop from the image borders, keep the
//! opaque pixels that differ enough from it, then frequency-rank the
//! survivors in coarse color buckets. Decoding happens only in
//! [`load_pixels`]; everything else is pure over a [`PixelBuffer`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::color::Rgb;

mod background;
mod fallback;

pub use background::{BackgroundEstimator, BorderSampler};
pub use fallback::fallback_palette;

/// Minimum alpha for a pixel to participate in segmentation.
pub const ALPHA_OPAQUE_MIN: u8 = 128;
/// Foreground pixels closer than this to the background estimate are
/// discarded no matter what the sensitivity says.
pub const NEAR_BACKGROUND_CUTOFF: f32 = 30.0;
/// Channel bucket width for frequency counting.
pub const QUANT_STEP: u8 = 32;

pub const SENSITIVITY_MIN: u32 = 10;
pub const SENSITIVITY_MAX: u32 = 100;
pub const DEFAULT_SENSITIVITY: u32 = 50;
pub const DEFAULT_TOP_COLORS: usize = 5;

/// Errors from image loading and pixel access.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read image {}: {source}", path.display())]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} image")]
    CoordinateOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// RGBA8 pixel data, row major.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Zero-area buffers count as "no image": extraction returns empty
    /// results for them rather than erroring.
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub(crate) fn rgba(&self, idx: usize) -> (Rgb, u8) {
        let base = idx * 4;
        (
            Rgb::new(self.data[base], self.data[base + 1], self.data[base + 2]),
            self.data[base + 3],
        )
    }

    pub(crate) fn rgba_at(&self, x: u32, y: u32) -> (Rgb, u8) {
        self.rgba(y as usize * self.width as usize + x as usize)
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}

/// Tunables for [`extract_dominant_colors`].
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Background removal threshold, 10-100. The inherited name reads
    /// inverted: higher values demand a bigger distance from the
    /// background estimate, so less of the image counts as garment.
    pub sensitivity: f32,
    /// Maximum number of dominant colors returned.
    pub top_colors: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY as f32,
            top_colors: DEFAULT_TOP_COLORS,
        }
    }
}

/// Decodes an image file into a [`PixelBuffer`].
pub fn load_pixels(path: &Path) -> Result<PixelBuffer, ExtractError> {
    let img = image::open(path).map_err(|source| ExtractError::ImageUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let buffer: PixelBuffer = img.to_rgba8().into();
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        "decoded {}",
        path.display()
    );
    Ok(buffer)
}

/// Indices of pixels that read as garment rather than backdrop: opaque
/// (alpha >= [`ALPHA_OPAQUE_MIN`]) and strictly farther than
/// `sensitivity` from the background estimate. Order follows the scan
/// order of the buffer.
pub fn segment_foreground(pixels: &PixelBuffer, background: Rgb, sensitivity: f32) -> Vec<usize> {
    (0..pixels.pixel_count())
        .into_par_iter()
        .filter_map(|idx| {
            let (color, alpha) = pixels.rgba(idx);
            if alpha < ALPHA_OPAQUE_MIN {
                return None;
            }
            (color.distance(background) > sensitivity).then_some(idx)
        })
        .collect()
}

/// Top garment colors by frequency, background removed.
///
/// Foreground pixels still within [`NEAR_BACKGROUND_CUTOFF`] of the
/// background estimate are dropped, the rest collapse into
/// [`QUANT_STEP`]-wide buckets, and buckets rank by descending count
/// with first-seen scan order breaking ties. Deterministic for a given
/// buffer and options; empty when nothing survives, which includes
/// solid-color images whose foreground matches the border estimate.
pub fn extract_dominant_colors(pixels: &PixelBuffer, opts: &ExtractOptions) -> Vec<Rgb> {
    extract_dominant_colors_with(&BorderSampler::default(), pixels, opts)
}

/// Same as [`extract_dominant_colors`] with a caller-chosen estimator.
pub fn extract_dominant_colors_with<E: BackgroundEstimator>(
    estimator: &E,
    pixels: &PixelBuffer,
    opts: &ExtractOptions,
) -> Vec<Rgb> {
    let Some(background) = estimator.estimate(pixels) else {
        return Vec::new();
    };
    let foreground = segment_foreground(pixels, background, opts.sensitivity);
    debug!(
        background = %background.to_hex(),
        foreground = foreground.len(),
        total = pixels.pixel_count(),
        "segmented foreground"
    );

    let mut counts: HashMap<Rgb, (usize, usize)> = HashMap::new();
    for (order, &idx) in foreground.iter().enumerate() {
        let (color, _) = pixels.rgba(idx);
        if color.distance(background) < NEAR_BACKGROUND_CUTOFF {
            continue;
        }
        let entry = counts
            .entry(color.quantized(QUANT_STEP))
            .or_insert((0, order));
        entry.0 += 1;
    }

    let mut buckets: Vec<(Rgb, usize, usize)> = counts
        .into_iter()
        .map(|(color, (count, first_seen))| (color, count, first_seen))
        .collect();
    buckets.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    buckets
        .into_iter()
        .take(opts.top_colors)
        .map(|(color, _, _)| color)
        .collect()
}

/// Reads the color under a single pixel, e.g. a user click. Alpha is
/// ignored, matching a raw canvas read; scaling display coordinates to
/// image coordinates is the caller's job.
pub fn pick_color_at_point(pixels: &PixelBuffer, x: u32, y: u32) -> Result<Rgb, ExtractError> {
    if x >= pixels.width() || y >= pixels.height() {
        return Err(ExtractError::CoordinateOutOfBounds {
            x,
            y,
            width: pixels.width(),
            height: pixels.height(),
        });
    }
    Ok(pixels.rgba_at(x, y).0)
}
