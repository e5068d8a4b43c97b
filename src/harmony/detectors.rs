//! Hue-pattern detectors, evaluated in fixed priority order.

use super::HarmonyType;

const CONF_MONOCHROMATIC: f32 = 0.9;
const CONF_ANALOGOUS: f32 = 0.85;
const CONF_COMPLEMENTARY: f32 = 0.8;
const CONF_TRIADIC: f32 = 0.75;
const CONF_TETRADIC: f32 = 0.7;
const CONF_SPLIT_COMPLEMENTARY: f32 = 0.75;

const HUE_BIN_WIDTH: f32 = 30.0;
const OPPOSITION_TOLERANCE: f32 = 30.0;
const TRIADIC_SPACING: f32 = 120.0;
const TETRADIC_SPACING: f32 = 90.0;
const SPACING_TOLERANCE: f32 = 30.0;
const SPLIT_OFFSETS: [f32; 2] = [150.0, 210.0];

/// Runs every detector and returns the strongest match. Comparison is
/// strictly greater, so earlier entries win ties; when nothing matches
/// the result is `Mixed` at zero confidence.
pub(super) fn best_match(hues: &[f32]) -> (HarmonyType, f32) {
    let candidates = [
        (HarmonyType::Monochromatic, monochromatic(hues)),
        (HarmonyType::Analogous, analogous(hues)),
        (HarmonyType::Complementary, complementary(hues)),
        (HarmonyType::Triadic, triadic(hues)),
        (HarmonyType::Tetradic, tetradic(hues)),
        (HarmonyType::SplitComplementary, split_complementary(hues)),
    ];

    let mut best = (HarmonyType::Mixed, 0.0);
    for (kind, confidence) in candidates {
        if confidence > best.1 {
            best = (kind, confidence);
        }
    }
    best
}

/// Every hue falls into the same 30-degree bin. Bins round to the
/// nearest multiple, so 14.9 and 15.1 land in different ones.
fn monochromatic(hues: &[f32]) -> f32 {
    let mut bins: Vec<i32> = hues
        .iter()
        .map(|hue| (hue / HUE_BIN_WIDTH).round() as i32)
        .collect();
    bins.sort_unstable();
    bins.dedup();
    if bins.len() == 1 {
        CONF_MONOCHROMATIC
    } else {
        0.0
    }
}

/// Sorted hues sit close together: mean gap at most 60 degrees and no
/// single gap over 90, gaps measured the short way around the wheel.
fn analogous(hues: &[f32]) -> f32 {
    if hues.len() < 2 {
        return 0.0;
    }
    let gaps = consecutive_gaps(hues);
    let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
    if mean <= 60.0 && gaps.iter().all(|&gap| gap <= 90.0) {
        CONF_ANALOGOUS
    } else {
        0.0
    }
}

/// Some pair of hues lies within 30 degrees of direct opposition.
fn complementary(hues: &[f32]) -> f32 {
    if hues.len() < 2 {
        return 0.0;
    }
    for (i, &a) in hues.iter().enumerate() {
        for &b in &hues[i + 1..] {
            if ((a - b).abs() - 180.0).abs() <= OPPOSITION_TOLERANCE {
                return CONF_COMPLEMENTARY;
            }
        }
    }
    0.0
}

/// Mean gap between sorted hues within 30 degrees of 120.
fn triadic(hues: &[f32]) -> f32 {
    if hues.len() < 3 {
        return 0.0;
    }
    if mean_gap_near(hues, TRIADIC_SPACING) {
        CONF_TRIADIC
    } else {
        0.0
    }
}

/// Mean gap between sorted hues within 30 degrees of 90.
fn tetradic(hues: &[f32]) -> f32 {
    if hues.len() < 4 {
        return 0.0;
    }
    if mean_gap_near(hues, TETRADIC_SPACING) {
        CONF_TETRADIC
    } else {
        0.0
    }
}

/// Some hue has another sitting within 30 degrees of its +150 or +210
/// mark. The marks are not wrapped past 360, which leaves exactly the
/// pairs whose second hue runs 120 to 240 degrees above the first.
fn split_complementary(hues: &[f32]) -> f32 {
    if hues.len() < 3 {
        return 0.0;
    }
    for (i, &base) in hues.iter().enumerate() {
        let hit = hues.iter().enumerate().any(|(j, &other)| {
            if j == i {
                return false;
            }
            SPLIT_OFFSETS
                .iter()
                .any(|offset| (other - (base + offset)).abs() <= OPPOSITION_TOLERANCE)
        });
        if hit {
            return CONF_SPLIT_COMPLEMENTARY;
        }
    }
    0.0
}

fn mean_gap_near(hues: &[f32], target: f32) -> bool {
    let gaps = consecutive_gaps(hues);
    let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
    (mean - target).abs() <= SPACING_TOLERANCE
}

/// Gaps between consecutive sorted hues, wrapped the short way around
/// the wheel when a gap exceeds 180 degrees.
fn consecutive_gaps(hues: &[f32]) -> Vec<f32> {
    let mut sorted = hues.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
        .windows(2)
        .map(|pair| {
            let gap = pair[1] - pair[0];
            if gap > 180.0 {
                360.0 - gap
            } else {
                gap
            }
        })
        .collect()
}
