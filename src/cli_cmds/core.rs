use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use super::palette_cmds::print_analysis;
use crate::extract::{self, ExtractOptions};
use crate::harmony;
use crate::utils;

pub fn cmd_extract(image: &Path, opts: &ExtractOptions, json: bool, fallback: bool) -> Result<()> {
    let pixels = extract::load_pixels(image)?;
    let mut palette = extract::extract_dominant_colors(&pixels, opts);

    if palette.is_empty() && fallback {
        debug!(image = %image.display(), "segmentation left nothing, clustering whole image");
        palette = extract::fallback_palette(&pixels, opts.top_colors);
    }

    if palette.is_empty() {
        eprintln!("No garment colors found in: {}", image.display());
        eprintln!("Try a lower --sensitivity (current: {}).", opts.sensitivity);
    }

    let hex: Vec<String> = palette.iter().map(|c| c.to_hex()).collect();
    if json {
        println!("{}", serde_json::to_string(&hex)?);
    } else {
        for color in &hex {
            println!("{color}");
        }
    }

    Ok(())
}

pub fn cmd_pick(image: &Path, x: u32, y: u32) -> Result<()> {
    let pixels = extract::load_pixels(image)?;
    let color = extract::pick_color_at_point(&pixels, x, y)?;
    println!("{}", color.to_hex());
    Ok(())
}

/// Rates how well a set of garment photos work together: each image
/// contributes its main color, then the set gets the full color
/// analysis.
pub fn cmd_look(images: &[PathBuf], opts: &ExtractOptions, json: bool) -> Result<()> {
    let mut colors: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for path in images {
        if !utils::is_image_file(path) {
            eprintln!("Skipping {} (not an image)", path.display());
            continue;
        }
        let pixels = match extract::load_pixels(path) {
            Ok(pixels) => pixels,
            Err(err) => {
                eprintln!("Skipping {}: {err}", path.display());
                continue;
            }
        };

        let mut palette = extract::extract_dominant_colors(&pixels, opts);
        if palette.is_empty() {
            // Solid crops never survive segmentation; one cluster is
            // still a usable main color.
            palette = extract::fallback_palette(&pixels, 1);
        }
        let Some(main) = palette.first() else {
            eprintln!("Skipping {} (no usable pixels)", path.display());
            continue;
        };

        let hex = main.to_hex();
        lines.push(format!("{}: {hex}", path.display()));
        colors.push(hex);
    }

    let analysis = harmony::analyze_colors(&colors);
    if json {
        println!("{}", serde_json::to_string(&analysis)?);
    } else {
        for line in &lines {
            println!("{line}");
        }
        if !lines.is_empty() {
            println!();
        }
        print_analysis(&analysis);
    }

    Ok(())
}
