//! Commands that take hex color lists instead of image files.

use anyhow::Result;

use crate::harmony::{self, ColorAnalysis, HarmonyResult};

pub fn cmd_harmony(colors: &[String], json: bool) -> Result<()> {
    let result = harmony::analyze_color_harmony(colors);
    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        print_harmony(&result);
    }
    Ok(())
}

pub fn cmd_analyze(colors: &[String], json: bool) -> Result<()> {
    let analysis = harmony::analyze_colors(colors);
    if json {
        println!("{}", serde_json::to_string(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

pub fn cmd_contrast(color_a: &str, color_b: &str) -> Result<()> {
    let ratio = harmony::calculate_contrast(color_a, color_b);
    println!("{ratio:.2}:1");
    Ok(())
}

fn print_harmony(result: &HarmonyResult) {
    println!(
        "{} ({:.0}% confidence)",
        result.kind.display_name(),
        result.confidence * 100.0
    );
    println!("{}", result.description);
    if !result.suggestions.is_empty() {
        println!();
        for suggestion in &result.suggestions {
            println!("  - {suggestion}");
        }
    }
}

pub(super) fn print_analysis(analysis: &ColorAnalysis) {
    println!("Primary:    {}", analysis.primary);
    if !analysis.secondary.is_empty() {
        println!("Secondary:  {}", analysis.secondary.join(", "));
    }
    println!("Contrast:   {:.2}:1", analysis.contrast);
    println!("Saturation: {:.0}%", analysis.saturation * 100.0);
    println!("Brightness: {:.0}%", analysis.brightness * 100.0);
    println!();
    print_harmony(&analysis.harmony);
}
