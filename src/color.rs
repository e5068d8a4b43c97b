//! RGB and HSL color values with the conversions the extraction and
//! harmony engines rely on: hex parsing, HSL, Euclidean distance,
//! channel quantization, and WCAG luminance/contrast.

/// An 8-bit RGB color. Hashable so quantized values can key frequency maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Cylindrical form of an [`Rgb`] value.
///
/// `hue` is `None` for achromatic colors (all channels equal); harmony
/// detection skips those entirely instead of treating them as red.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees, within `[0, 360)`.
    pub hue: Option<f32>,
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Lightness in `[0, 1]`.
    pub lightness: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`, upper or lower case. Six hex digits
    /// only; anything else (including non-ASCII input) returns `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Canonical lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if (max - min).abs() < f32::EPSILON {
            return Hsl {
                hue: None,
                saturation: 0.0,
                lightness,
            };
        }

        let d = max - min;
        let saturation = if lightness > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if (max - r).abs() < f32::EPSILON {
            let mut h = (g - b) / d;
            if g < b {
                h += 6.0;
            }
            h
        } else if (max - g).abs() < f32::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            hue: Some(h * 60.0),
            saturation,
            lightness,
        }
    }

    /// Euclidean distance in RGB space, in `[0, ~441.67]`.
    pub fn distance(self, other: Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Floors each channel to a multiple of `step`, collapsing nearby
    /// shades into one bucket.
    pub fn quantized(self, step: u8) -> Rgb {
        debug_assert!(step > 0);
        Rgb {
            r: (self.r / step) * step,
            g: (self.g / step) * step,
            b: (self.b / step) * step,
        }
    }

    /// WCAG 2.x relative luminance in `[0, 1]`.
    pub fn relative_luminance(self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// WCAG contrast ratio against `other`, in `[1, 21]`. Symmetric.
    pub fn contrast_ratio(self, other: Rgb) -> f32 {
        let la = self.relative_luminance();
        let lb = other.relative_luminance();
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(hex: &str) -> f32 {
        Rgb::from_hex(hex)
            .and_then(|c| c.to_hsl().hue)
            .unwrap_or_else(|| panic!("expected a chromatic color: {hex}"))
    }

    // --- from_hex / to_hex ---

    #[test]
    fn test_from_hex_accepts_both_cases() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#FF8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("ff8000"), Some(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn test_from_hex_rejects_malformed_input() {
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#1234567"), None);
        assert_eq!(Rgb::from_hex("not-a-color"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
    }

    #[test]
    fn test_from_hex_rejects_non_ascii_without_panicking() {
        // "féf00" is six bytes; slicing it at byte 2 would split the é.
        assert_eq!(Rgb::from_hex("féf00"), None);
        assert_eq!(Rgb::from_hex("#ffé000"), None);
        assert_eq!(Rgb::from_hex("######"), None);
    }

    #[test]
    fn test_to_hex_is_lowercase() {
        assert_eq!(Rgb::new(255, 0, 128).to_hex(), "#ff0080");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#e00000", "#1a2b3c"] {
            let parsed = Rgb::from_hex(hex).unwrap();
            assert_eq!(parsed.to_hex(), hex);
        }
    }

    // --- to_hsl ---

    #[test]
    fn test_hsl_primary_hues() {
        assert_eq!(hue_of("#ff0000"), 0.0);
        assert_eq!(hue_of("#00ff00"), 120.0);
        assert_eq!(hue_of("#0000ff"), 240.0);
        assert_eq!(hue_of("#00ffff"), 180.0);
    }

    #[test]
    fn test_hsl_negative_branch_wraps_forward() {
        // Red-dominant with more blue than green lands in [300, 360).
        let hue = hue_of("#ff0080");
        assert!((hue - 329.88).abs() < 0.1, "got {hue}");
    }

    #[test]
    fn test_hsl_achromatic_has_no_hue() {
        for hex in ["#000000", "#ffffff", "#808080"] {
            let hsl = Rgb::from_hex(hex).unwrap().to_hsl();
            assert_eq!(hsl.hue, None);
            assert_eq!(hsl.saturation, 0.0);
        }
    }

    #[test]
    fn test_hsl_saturation_and_lightness() {
        let red = Rgb::from_hex("#ff0000").unwrap().to_hsl();
        assert!((red.saturation - 1.0).abs() < 1e-6);
        assert!((red.lightness - 0.5).abs() < 1e-6);

        let white = Rgb::from_hex("#ffffff").unwrap().to_hsl();
        assert!((white.lightness - 1.0).abs() < 1e-6);
    }

    // --- distance / quantized ---

    #[test]
    fn test_distance_extremes() {
        let black = Rgb::BLACK;
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.distance(black), 0.0);
        assert!((black.distance(white) - 441.6729).abs() < 0.001);
    }

    #[test]
    fn test_quantized_floors_to_step() {
        assert_eq!(Rgb::new(255, 32, 31).quantized(32), Rgb::new(224, 32, 0));
        assert_eq!(Rgb::new(0, 63, 64).quantized(32), Rgb::new(0, 32, 64));
    }

    // --- luminance / contrast ---

    #[test]
    fn test_relative_luminance_extremes() {
        assert_eq!(Rgb::BLACK.relative_luminance(), 0.0);
        assert!((Rgb::new(255, 255, 255).relative_luminance() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_contrast_black_on_white_is_21() {
        let ratio = Rgb::BLACK.contrast_ratio(Rgb::new(255, 255, 255));
        assert!((ratio - 21.0).abs() < 1e-4, "got {ratio}");
    }

    #[test]
    fn test_contrast_is_symmetric_and_one_for_self() {
        let a = Rgb::new(30, 144, 255);
        let b = Rgb::new(200, 40, 10);
        assert_eq!(a.contrast_ratio(b), b.contrast_ratio(a));
        assert!((a.contrast_ratio(a) - 1.0).abs() < 1e-6);
    }
}
