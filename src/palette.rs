//! Nine-slot palettes derived from a single source color.
//!
//! Derivation only uses the RGB approximations from [`crate::color`], so the
//! same source always yields the same palette.

use serde::{Deserialize, Serialize};

use crate::color::{adjust_brightness, adjust_saturation, analogous, complement, distance, Color};

/// Brightness shift (percent) for the dark/light variants.
const VARIANT_BRIGHTNESS: f64 = 30.0;

/// Saturation shift (percent) for the muted variants.
const MUTED_SATURATION: f64 = -40.0;

/// Palette derived from one source color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPalette {
    /// The source color itself.
    pub vibrant: Color,
    /// Source darkened by 30%.
    pub dark_vibrant: Color,
    /// Source brightened by 30%.
    pub light_vibrant: Color,
    /// Source desaturated by 40%.
    pub muted: Color,
    /// Muted variant darkened by 30%.
    pub dark_muted: Color,
    /// Muted variant brightened by 30%.
    pub light_muted: Color,
    /// Per-channel inversion of the source.
    pub complementary: Color,
    /// Source brightened by 15%.
    pub analogous1: Color,
    /// Source darkened by 15%.
    pub analogous2: Color,
}

impl DerivedPalette {
    /// The nine colors in slot order.
    #[must_use]
    pub const fn colors(&self) -> [Color; 9] {
        [
            self.vibrant,
            self.dark_vibrant,
            self.light_vibrant,
            self.muted,
            self.dark_muted,
            self.light_muted,
            self.complementary,
            self.analogous1,
            self.analogous2,
        ]
    }

    /// Smallest distance between any palette color and any of `swatches`.
    ///
    /// Returns `None` when `swatches` is empty.
    #[must_use]
    pub fn min_distance_to(&self, swatches: &[Color]) -> Option<f64> {
        self.colors()
            .iter()
            .flat_map(|&color| swatches.iter().map(move |&swatch| distance(color, swatch)))
            .min_by(f64::total_cmp)
    }
}

/// Derives the [`DerivedPalette`] of `source`.
///
/// ```
/// use swatchmatch::color::Color;
/// use swatchmatch::palette::derive;
///
/// let source = Color::new(255, 0, 0);
/// let palette = derive(source);
/// assert_eq!(palette.vibrant, source);
/// assert_eq!(palette.complementary, Color::new(0, 255, 255));
/// ```
#[must_use]
pub fn derive(source: Color) -> DerivedPalette {
    let muted = adjust_saturation(source, MUTED_SATURATION);
    let (analogous1, analogous2) = analogous(source);

    DerivedPalette {
        vibrant: source,
        dark_vibrant: adjust_brightness(source, -VARIANT_BRIGHTNESS),
        light_vibrant: adjust_brightness(source, VARIANT_BRIGHTNESS),
        muted,
        dark_muted: adjust_brightness(muted, -VARIANT_BRIGHTNESS),
        light_muted: adjust_brightness(muted, VARIANT_BRIGHTNESS),
        complementary: complement(source),
        analogous1,
        analogous2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibrant_is_source() {
        for source in [
            Color::BLACK,
            Color::WHITE,
            Color::new(139, 92, 246),
            Color::new(12, 200, 180),
        ] {
            assert_eq!(derive(source).vibrant, source);
        }
    }

    #[test]
    fn test_derive_known_values() {
        let palette = derive(Color::new(200, 100, 50));
        assert_eq!(palette.dark_vibrant, Color::new(140, 70, 35));
        assert_eq!(palette.light_vibrant, Color::new(255, 130, 65));
        // Mean 116.67; deviations scaled by 0.6
        assert_eq!(palette.muted, Color::new(167, 107, 77));
        assert_eq!(palette.complementary, Color::new(55, 155, 205));
        assert_eq!(palette.analogous1, Color::new(230, 115, 57));
        assert_eq!(palette.analogous2, Color::new(170, 85, 43));
    }

    #[test]
    fn test_derive_is_deterministic() {
        let source = Color::new(77, 140, 201);
        assert_eq!(derive(source), derive(source));
    }

    #[test]
    fn test_serializes_camel_case_slots() {
        let json = serde_json::to_value(derive(Color::new(255, 0, 0))).unwrap();
        assert_eq!(json["vibrant"], "#ff0000");
        assert_eq!(json["darkVibrant"], "#b30000");
        assert!(json.get("analogous2").is_some());
        assert!(json.get("lightMuted").is_some());
    }

    #[test]
    fn test_min_distance_to() {
        let palette = derive(Color::new(255, 0, 0));
        assert_eq!(palette.min_distance_to(&[Color::new(255, 0, 0)]), Some(0.0));
        // Complementary slot is exactly cyan
        assert_eq!(palette.min_distance_to(&[Color::new(0, 255, 255)]), Some(0.0));
        assert_eq!(palette.min_distance_to(&[]), None);
    }
}
