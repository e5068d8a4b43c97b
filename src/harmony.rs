//! Color harmony classification and whole-set analysis.
//!
//! Operates on hex color strings so catalog values pass straight
//! through; entries that fail to parse degrade to documented neutral
//! defaults instead of failing the call.

use serde::Serialize;
use tracing::debug;

use crate::color::{Hsl, Rgb};

mod detectors;

/// Stand-in for colors that fail to parse. The 0-degree hue is real and
/// participates in hue analysis.
const FALLBACK_GRAY: Hsl = Hsl {
    hue: Some(0.0),
    saturation: 0.0,
    lightness: 0.5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyType {
    Monochromatic,
    Analogous,
    Complementary,
    Triadic,
    Tetradic,
    SplitComplementary,
    Neutral,
    Mixed,
}

impl HarmonyType {
    pub fn display_name(&self) -> &'static str {
        match self {
            HarmonyType::Monochromatic => "Monochromatic",
            HarmonyType::Analogous => "Analogous",
            HarmonyType::Complementary => "Complementary",
            HarmonyType::Triadic => "Triadic",
            HarmonyType::Tetradic => "Tetradic",
            HarmonyType::SplitComplementary => "Split-complementary",
            HarmonyType::Neutral => "Neutral",
            HarmonyType::Mixed => "Mixed",
        }
    }
}

/// Outcome of [`analyze_color_harmony`]. Serializes to the shape the
/// wardrobe UI consumes: a `type` key with kebab-case values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonyResult {
    #[serde(rename = "type")]
    pub kind: HarmonyType,
    pub confidence: f32,
    pub description: String,
    pub suggestions: Vec<String>,
    /// The input colors, echoed verbatim.
    pub colors: Vec<String>,
}

/// Outcome of [`analyze_colors`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAnalysis {
    /// Most saturated input color, canonical lowercase hex.
    pub primary: String,
    /// Remaining colors; duplicates of the primary are dropped.
    pub secondary: Vec<String>,
    pub harmony: HarmonyResult,
    /// Mean pairwise WCAG contrast ratio, 0 with fewer than two colors.
    pub contrast: f32,
    /// Mean HSL saturation.
    pub saturation: f32,
    /// Mean HSL lightness.
    pub brightness: f32,
}

/// Classifies a set of colors into the best-matching harmony category.
///
/// Never fails: empty input reads as neutral at zero confidence,
/// unparseable colors degrade to [`FALLBACK_GRAY`], and parsed
/// achromatic colors contribute no hue at all.
pub fn analyze_color_harmony(colors: &[String]) -> HarmonyResult {
    if colors.is_empty() {
        return HarmonyResult {
            kind: HarmonyType::Neutral,
            confidence: 0.0,
            description: "No colors to analyze".to_string(),
            suggestions: vec!["Add colors to the look to get a harmony reading".to_string()],
            colors: Vec::new(),
        };
    }

    let hues: Vec<f32> = colors
        .iter()
        .filter_map(|color| hsl_or_gray(color).hue)
        .collect();

    if hues.is_empty() {
        return HarmonyResult {
            kind: HarmonyType::Neutral,
            confidence: 0.8,
            description: description_for(HarmonyType::Neutral).to_string(),
            suggestions: suggestions_for(HarmonyType::Neutral),
            colors: colors.to_vec(),
        };
    }

    let (kind, confidence) = detectors::best_match(&hues);
    HarmonyResult {
        kind,
        confidence,
        description: description_for(kind).to_string(),
        suggestions: suggestions_for(kind),
        colors: colors.to_vec(),
    }
}

/// Full analysis of a color set: the dominant (most saturated) color,
/// the rest as secondaries, the harmony classification, and average
/// contrast, saturation, and brightness.
pub fn analyze_colors(colors: &[String]) -> ColorAnalysis {
    if colors.is_empty() {
        return ColorAnalysis {
            primary: Rgb::BLACK.to_hex(),
            secondary: Vec::new(),
            harmony: analyze_color_harmony(colors),
            contrast: 0.0,
            saturation: 0.0,
            brightness: 0.0,
        };
    }

    let parsed: Vec<Rgb> = colors
        .iter()
        .map(|color| Rgb::from_hex(color).unwrap_or(Rgb::BLACK))
        .collect();
    let hsls: Vec<Hsl> = parsed.iter().map(|rgb| rgb.to_hsl()).collect();

    // Most saturated color wins; the first one on ties.
    let mut primary = parsed[0];
    let mut best_saturation = hsls[0].saturation;
    for (rgb, hsl) in parsed.iter().zip(&hsls).skip(1) {
        if hsl.saturation > best_saturation {
            primary = *rgb;
            best_saturation = hsl.saturation;
        }
    }

    let secondary: Vec<String> = parsed
        .iter()
        .filter(|rgb| **rgb != primary)
        .map(|rgb| rgb.to_hex())
        .collect();

    let mut contrast_total = 0.0;
    let mut pairs = 0u32;
    for i in 0..parsed.len() {
        for j in (i + 1)..parsed.len() {
            contrast_total += parsed[i].contrast_ratio(parsed[j]);
            pairs += 1;
        }
    }
    let contrast = if pairs > 0 {
        contrast_total / pairs as f32
    } else {
        0.0
    };

    let saturation = hsls.iter().map(|hsl| hsl.saturation).sum::<f32>() / hsls.len() as f32;
    let brightness = hsls.iter().map(|hsl| hsl.lightness).sum::<f32>() / hsls.len() as f32;

    ColorAnalysis {
        primary: primary.to_hex(),
        secondary,
        harmony: analyze_color_harmony(colors),
        contrast,
        saturation,
        brightness,
    }
}

/// WCAG contrast ratio between two hex colors, in `[1, 21]`. Returns 1
/// when either color fails to parse.
pub fn calculate_contrast(color_a: &str, color_b: &str) -> f32 {
    match (Rgb::from_hex(color_a), Rgb::from_hex(color_b)) {
        (Some(a), Some(b)) => a.contrast_ratio(b),
        _ => 1.0,
    }
}

fn hsl_or_gray(color: &str) -> Hsl {
    match Rgb::from_hex(color) {
        Some(rgb) => rgb.to_hsl(),
        None => {
            debug!(color, "unparseable color, substituting neutral gray");
            FALLBACK_GRAY
        }
    }
}

fn description_for(kind: HarmonyType) -> &'static str {
    match kind {
        HarmonyType::Monochromatic => "Shades of a single hue, a safe and cohesive look",
        HarmonyType::Analogous => "Neighboring hues on the color wheel, harmonious and relaxed",
        HarmonyType::Complementary => {
            "Opposing hues that heighten each other, bold and high energy"
        }
        HarmonyType::Triadic => "Three evenly spaced hues, vibrant yet balanced",
        HarmonyType::Tetradic => "Four hues in two complementary pairs, rich and varied",
        HarmonyType::SplitComplementary => {
            "A base hue with the two neighbors of its complement, contrast without tension"
        }
        HarmonyType::Neutral => "Neutral tones without a dominant hue, versatile and understated",
        HarmonyType::Mixed => "No clear harmony pattern between these hues",
    }
}

fn suggestions_for(kind: HarmonyType) -> Vec<String> {
    let lines: &[&str] = match kind {
        HarmonyType::Monochromatic => &[
            "Vary lightness between pieces to add depth",
            "Mix textures so the single hue does not flatten",
            "A neutral accessory breaks up the uniformity",
        ],
        HarmonyType::Analogous => &[
            "Let one hue dominate and use the others as accents",
            "Keep saturation similar across pieces",
            "Add a neutral base to ground the palette",
        ],
        HarmonyType::Complementary => &[
            "Use one color for the main piece and the other for accents",
            "Soften the clash with muted shades of either hue",
            "Neutral shoes or outerwear keep the pair from competing",
        ],
        HarmonyType::Triadic => &[
            "Pick one hue as the anchor and dose the other two sparingly",
            "Lower the saturation on two of the three hues",
            "White or black basics give the triad room to breathe",
        ],
        HarmonyType::Tetradic => &[
            "Balance warm and cool pairs across the outfit",
            "Keep two of the four hues as small accents only",
            "Ground the palette with one neutral piece",
        ],
        HarmonyType::SplitComplementary => &[
            "Wear the base hue largest and the split pair as details",
            "Match the split pair in saturation so neither dominates",
            "Metallic or neutral accents bridge the three hues",
        ],
        HarmonyType::Neutral => &["Add one saturated accent piece for contrast"],
        HarmonyType::Mixed => &[],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(colors: &[&str]) -> Vec<String> {
        colors.iter().map(|s| s.to_string()).collect()
    }

    // --- analyze_color_harmony ---

    #[test]
    fn test_empty_input_is_neutral_zero() {
        let result = analyze_color_harmony(&[]);
        assert_eq!(result.kind, HarmonyType::Neutral);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.colors.is_empty());
    }

    #[test]
    fn test_identical_colors_are_monochromatic() {
        let result = analyze_color_harmony(&strings(&["#ff0000", "#ff0000", "#ff0000"]));
        assert_eq!(result.kind, HarmonyType::Monochromatic);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_achromatic_set_is_neutral() {
        let input = strings(&["#000000", "#808080", "#ffffff"]);
        let result = analyze_color_harmony(&input);
        assert_eq!(result.kind, HarmonyType::Neutral);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.colors, input);
    }

    #[test]
    fn test_opposing_hues_are_complementary() {
        let result = analyze_color_harmony(&strings(&["#ff0000", "#00ffff"]));
        assert_eq!(result.kind, HarmonyType::Complementary);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_rgb_primaries_are_triadic() {
        let result = analyze_color_harmony(&strings(&["#ff0000", "#00ff00", "#0000ff"]));
        assert_eq!(result.kind, HarmonyType::Triadic);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_four_spread_hues_are_tetradic() {
        // Hues 0, 80, ~330, ~350: wrapped gaps average near 90 while
        // every earlier detector misses.
        let result =
            analyze_color_harmony(&strings(&["#ff0000", "#aaff00", "#ff0080", "#ff002b"]));
        assert_eq!(result.kind, HarmonyType::Tetradic);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_split_complementary_triple() {
        // Hues 0, 60, 140: 140 sits within 30 of 0 + 150 and nothing
        // stronger matches.
        let result = analyze_color_harmony(&strings(&["#ff0000", "#ffff00", "#00ff55"]));
        assert_eq!(result.kind, HarmonyType::SplitComplementary);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_neighboring_hues_are_analogous() {
        let result = analyze_color_harmony(&strings(&["#ff0000", "#ff8000", "#ffff00"]));
        assert_eq!(result.kind, HarmonyType::Analogous);
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn test_unrelated_pair_is_mixed_with_no_suggestions() {
        // Hues 0 and 140: too far apart for analogous, short of
        // complementary, too few for the rest.
        let result = analyze_color_harmony(&strings(&["#ff0000", "#00ff55"]));
        assert_eq!(result.kind, HarmonyType::Mixed);
        assert_eq!(result.confidence, 0.0);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_unparseable_color_counts_as_zero_hue() {
        // The gray substitute carries a live 0-degree hue: alone it reads
        // monochromatic, and against cyan it reads complementary.
        let alone = analyze_color_harmony(&strings(&["not-a-color"]));
        assert_eq!(alone.kind, HarmonyType::Monochromatic);

        let with_cyan = analyze_color_harmony(&strings(&["not-a-color", "#00ffff"]));
        assert_eq!(with_cyan.kind, HarmonyType::Complementary);
    }

    #[test]
    fn test_parsed_achromatics_contribute_no_hue() {
        // Gray drops out of the hue list, so red + gray is monochromatic.
        let result = analyze_color_harmony(&strings(&["#ff0000", "#808080"]));
        assert_eq!(result.kind, HarmonyType::Monochromatic);
    }

    #[test]
    fn test_input_is_echoed_verbatim() {
        let input = strings(&["#FF0000", "#00FFFF"]);
        let result = analyze_color_harmony(&input);
        assert_eq!(result.colors, input);
    }

    // --- analyze_colors ---

    #[test]
    fn test_analyze_empty_input() {
        let analysis = analyze_colors(&[]);
        assert_eq!(analysis.primary, "#000000");
        assert!(analysis.secondary.is_empty());
        assert_eq!(analysis.harmony.kind, HarmonyType::Neutral);
        assert_eq!(analysis.contrast, 0.0);
        assert_eq!(analysis.saturation, 0.0);
        assert_eq!(analysis.brightness, 0.0);
    }

    #[test]
    fn test_primary_is_most_saturated() {
        let analysis = analyze_colors(&strings(&["#808080", "#ff0000", "#404040"]));
        assert_eq!(analysis.primary, "#ff0000");
        assert_eq!(analysis.secondary, strings(&["#808080", "#404040"]));
    }

    #[test]
    fn test_primary_tie_keeps_first() {
        let analysis = analyze_colors(&strings(&["#ff0000", "#00ff00"]));
        assert_eq!(analysis.primary, "#ff0000");
    }

    #[test]
    fn test_secondary_drops_duplicates_of_primary() {
        let analysis = analyze_colors(&strings(&["#ff0000", "#FF0000", "#0000ff"]));
        assert_eq!(analysis.primary, "#ff0000");
        assert_eq!(analysis.secondary, strings(&["#0000ff"]));
    }

    #[test]
    fn test_primary_emits_canonical_lowercase() {
        let analysis = analyze_colors(&strings(&["#FF8000"]));
        assert_eq!(analysis.primary, "#ff8000");
    }

    #[test]
    fn test_malformed_colors_read_as_black() {
        let analysis = analyze_colors(&strings(&["definitely-not", "#ffffff"]));
        assert_eq!(analysis.primary, "#000000");
        assert_eq!(analysis.secondary, strings(&["#ffffff"]));
        assert!((analysis.contrast - 21.0).abs() < 1e-4);
        assert!((analysis.brightness - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_contrast_zero_for_single_color() {
        let analysis = analyze_colors(&strings(&["#ff0000"]));
        assert_eq!(analysis.contrast, 0.0);
    }

    #[test]
    fn test_metric_means() {
        // Red: s = 1, l = 0.5. White: s = 0, l = 1. Ratio ~3.9985.
        let analysis = analyze_colors(&strings(&["#ff0000", "#ffffff"]));
        assert!((analysis.saturation - 0.5).abs() < 1e-6);
        assert!((analysis.brightness - 0.75).abs() < 1e-6);
        assert!((analysis.contrast - 3.9985).abs() < 0.01);
    }

    #[test]
    fn test_analyze_colors_is_idempotent() {
        let input = strings(&["#ff0000", "#00aaff", "#112233"]);
        assert_eq!(analyze_colors(&input), analyze_colors(&input));
    }

    // --- calculate_contrast ---

    #[test]
    fn test_contrast_black_white() {
        assert!((calculate_contrast("#000000", "#ffffff") - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_contrast_parse_failure_is_one() {
        assert_eq!(calculate_contrast("nope", "#ffffff"), 1.0);
        assert_eq!(calculate_contrast("#ffffff", ""), 1.0);
    }

    #[test]
    fn test_contrast_is_symmetric() {
        assert_eq!(
            calculate_contrast("#123456", "#fedcba"),
            calculate_contrast("#fedcba", "#123456")
        );
    }

    // --- serialization ---

    #[test]
    fn test_harmony_serializes_to_ui_contract() {
        let result = analyze_color_harmony(&strings(&["#ff0000", "#00ffff"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "complementary");
        assert_eq!(json["colors"][0], "#ff0000");
        assert!(json["confidence"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_split_complementary_kebab_case_name() {
        let json = serde_json::to_value(HarmonyType::SplitComplementary).unwrap();
        assert_eq!(json, "split-complementary");
    }

    #[test]
    fn test_analysis_serializes_expected_fields() {
        let analysis = analyze_colors(&strings(&["#ff0000", "#0000ff"]));
        let json = serde_json::to_value(&analysis).unwrap();
        for key in [
            "primary",
            "secondary",
            "harmony",
            "contrast",
            "saturation",
            "brightness",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
