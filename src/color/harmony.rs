//! Color harmonies built from true HSL hue and lightness rotations.

use serde::Serialize;

use super::Color;

/// Hue offsets (degrees) for the three analogous colors.
const ANALOGOUS_OFFSETS: [f64; 3] = [-30.0, 30.0, 60.0];

/// Lightness offsets (percentage points) for the monochromatic ramp.
const MONOCHROMATIC_OFFSETS: [f64; 5] = [-30.0, -15.0, 0.0, 15.0, 30.0];

/// A set of colors related to a base color by hue/lightness rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Harmony {
    /// Opposite hue (+180°).
    pub complementary: Color,
    /// Neighbouring hues (-30°, +30°, +60°).
    pub analogous: [Color; 3],
    /// Hues spaced evenly around the wheel (+120°, +240°).
    pub triadic: [Color; 2],
    /// The complement's neighbours (+150°, +210°).
    pub split_complementary: [Color; 2],
    /// Same hue at five lightness steps, darkest first.
    pub monochromatic: [Color; 5],
}

/// Computes the full [`Harmony`] of `color`.
///
/// ```
/// use swatchmatch::color::{harmony, Color};
///
/// let red = Color::new(255, 0, 0);
/// let h = harmony(red);
/// assert_eq!(h.complementary, Color::new(0, 255, 255));
/// assert_eq!(h.triadic, [Color::new(0, 255, 0), Color::new(0, 0, 255)]);
/// ```
#[must_use]
pub fn harmony(color: Color) -> Harmony {
    let hsl = color.to_hsl();
    let rotated = |degrees: f64| hsl.rotate(degrees).to_color();

    Harmony {
        complementary: rotated(180.0),
        analogous: ANALOGOUS_OFFSETS.map(rotated),
        triadic: [rotated(120.0), rotated(240.0)],
        split_complementary: [rotated(150.0), rotated(210.0)],
        monochromatic: MONOCHROMATIC_OFFSETS.map(|offset| hsl.with_lightness(hsl.l + offset).to_color()),
    }
}
