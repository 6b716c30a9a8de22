//! HSL (hue, saturation, lightness) representation of [`Color`].

// Allow float comparisons in HSL conversion (standard algorithms)
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

use serde::Serialize;

use super::Color;

/// A color in HSL space.
///
/// - `h` (Hue): 0.0-360.0 degrees (0.0 for grayscale)
/// - `s` (Saturation): 0.0-100.0 percent
/// - `l` (Lightness): 0.0-100.0 percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f64,
    /// Saturation in percent
    pub s: f64,
    /// Lightness in percent
    pub l: f64,
}

impl Hsl {
    /// Creates a new `Hsl`, wrapping hue into 0-360 and clamping `s`/`l` into 0-100.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Returns a copy with the hue rotated by `degrees`.
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        Self::new(self.h + degrees, self.s, self.l)
    }

    /// Returns a copy with a new lightness (clamped).
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Returns a copy with a new saturation (clamped).
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    /// Converts back to RGB, rounding each channel.
    #[must_use]
    pub fn to_color(self) -> Color {
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = self.h / 60.0;
        let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h_prime < 1.0 {
            (c, x, 0.0)
        } else if h_prime < 2.0 {
            (x, c, 0.0)
        } else if h_prime < 3.0 {
            (0.0, c, x)
        } else if h_prime < 4.0 {
            (0.0, x, c)
        } else if h_prime < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Color::from_channels([(r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0])
    }
}

impl Color {
    /// Converts the color to HSL.
    ///
    /// ```
    /// use swatchmatch::color::Color;
    ///
    /// let hsl = Color::new(255, 0, 0).to_hsl();
    /// assert!((hsl.h - 0.0).abs() < 0.01);
    /// assert!((hsl.s - 100.0).abs() < 0.01);
    /// assert!((hsl.l - 50.0).abs() < 0.01);
    /// ```
    #[must_use]
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());

        let h = if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        Hsl::new(h, s * 100.0, l * 100.0)
    }

    /// Creates a `Color` from HSL components (see [`Hsl::new`] for ranges).
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        Hsl::new(h, s, l).to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors_to_hsl() {
        let green = Color::new(0, 255, 0).to_hsl();
        assert!((green.h - 120.0).abs() < 0.01);
        assert!((green.s - 100.0).abs() < 0.01);
        assert!((green.l - 50.0).abs() < 0.01);

        let blue = Color::new(0, 0, 255).to_hsl();
        assert!((blue.h - 240.0).abs() < 0.01);
    }

    #[test]
    fn test_grayscale_has_no_hue() {
        let gray = Color::new(128, 128, 128).to_hsl();
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.l - 50.2).abs() < 0.1);
    }

    #[test]
    fn test_from_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 100.0, 50.0), Color::new(255, 0, 0));
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0), Color::new(0, 255, 0));
        assert_eq!(Color::from_hsl(240.0, 100.0, 50.0), Color::new(0, 0, 255));
        assert_eq!(Color::from_hsl(42.0, 80.0, 100.0), Color::WHITE);
        assert_eq!(Color::from_hsl(42.0, 80.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(Hsl::new(400.0, 50.0, 50.0).h, 40.0);
        assert_eq!(Hsl::new(-90.0, 50.0, 50.0).h, 270.0);
        assert_eq!(Hsl::new(0.0, 150.0, -5.0).s, 100.0);
    }

    #[test]
    fn test_hsl_roundtrip() {
        let colors = [
            Color::new(139, 92, 246),
            Color::new(200, 100, 50),
            Color::new(12, 200, 180),
            Color::new(255, 255, 0),
            Color::new(1, 2, 3),
        ];

        for color in colors {
            let back = color.to_hsl().to_color();
            assert!(
                (i16::from(color.r) - i16::from(back.r)).abs() <= 1
                    && (i16::from(color.g) - i16::from(back.g)).abs() <= 1
                    && (i16::from(color.b) - i16::from(back.b)).abs() <= 1,
                "{color} round-tripped to {back}"
            );
        }
    }
}
