//! K-means fallback palette for images where segmentation removes
//! every pixel (solid product shots, tight crops).

use kmeans_colors::get_kmeans_hamerly;
use palette::{IntoColor, Lab, Srgb};
use rayon::prelude::*;
use tracing::debug;

use super::{PixelBuffer, ALPHA_OPAQUE_MIN};
use crate::color::Rgb;

const MAX_ITERATIONS: usize = 30;
const CONVERGENCE_THRESHOLD: f32 = 5.0;
/// Cap on pixels fed to k-means; larger buffers get stride-subsampled.
const MAX_SAMPLES: usize = 16_384;
const KMEANS_SEED: u64 = 0;

/// Clusters the opaque pixels in Lab space and returns up to `k` colors
/// ordered by cluster size, empty clusters dropped. Deterministic for a
/// given buffer: fixed seed, fixed stride.
pub fn fallback_palette(pixels: &PixelBuffer, k: usize) -> Vec<Rgb> {
    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }

    let stride = (pixels.pixel_count() / MAX_SAMPLES).max(1);
    let sampled: Vec<usize> = (0..pixels.pixel_count())
        .step_by(stride)
        .filter(|&idx| pixels.rgba(idx).1 >= ALPHA_OPAQUE_MIN)
        .collect();
    if sampled.is_empty() {
        return Vec::new();
    }

    let lab: Vec<Lab> = sampled
        .par_iter()
        .map(|&idx| {
            let (color, _) = pixels.rgba(idx);
            let rgb = Srgb::new(
                color.r as f32 / 255.0,
                color.g as f32 / 255.0,
                color.b as f32 / 255.0,
            );
            rgb.into_color()
        })
        .collect();

    let k = k.min(lab.len());
    debug!(samples = lab.len(), k, "running k-means fallback");
    let result = get_kmeans_hamerly(k, MAX_ITERATIONS, CONVERGENCE_THRESHOLD, false, &lab, KMEANS_SEED);

    let mut counts = vec![0usize; k];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let mut ranked: Vec<(Rgb, usize)> = result
        .centroids
        .iter()
        .zip(counts)
        .map(|(centroid, members)| {
            let rgb: Srgb = (*centroid).into_color();
            let color = Rgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            );
            (color, members)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .filter(|(_, members)| *members > 0)
        .map(|(color, _)| color)
        .collect()
}
