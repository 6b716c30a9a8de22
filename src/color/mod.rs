//! Color values and the arithmetic the rest of the crate builds on.
//!
//! Two fidelities coexist:
//! - [`adjust_brightness`], [`adjust_saturation`] and [`analogous`] are cheap
//!   per-channel approximations operating directly on RGB.
//! - [`harmony`] and [`Hsl`] perform genuine hue/saturation/lightness rotations.
//!
//! Callers pick one or the other explicitly; their outputs differ and must not be
//! substituted for each other.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod contrast;
pub mod harmony;
pub mod hsl;
pub mod naming;

use std::fmt;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use contrast::{contrast_ratio, ensure_contrast, relative_luminance, MAX_CONTRAST_STEPS};
pub use harmony::{harmony, Harmony};
pub use hsl::Hsl;
pub use naming::ColorName;

/// Largest possible Euclidean distance between two colors in RGB space (√(3·255²)).
pub const MAX_DISTANCE: f64 = 441.672_955_930_063_7;

/// Normalized RGB color.
///
/// Always holds exactly three 8-bit channels, so every value round-trips through
/// its `#rrggbb` form without loss. Serializes as that hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new `Color` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `Color` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB" (any case).
    ///
    /// # Examples
    ///
    /// ```
    /// use swatchmatch::color::Color;
    ///
    /// let color = Color::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, Color::new(255, 0, 0));
    ///
    /// let color = Color::from_hex("abc").unwrap();
    /// assert_eq!(color, Color::new(0xaa, 0xbb, 0xcc));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a 3- or 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        normalize(hex).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid hex color format '{}'. Expected 3 or 6 hex digits (RGB or RRGGBB)",
                hex.trim()
            )
        })
    }

    /// Converts the color to a hex string in the format "#rrggbb" (lowercase).
    ///
    /// ```
    /// use swatchmatch::color::Color;
    ///
    /// assert_eq!(Color::new(0, 128, 255).to_hex(), "#0080ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as floats in 0.0-255.0.
    fn channels(&self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Builds a color from float channels, rounding and clamping each into 0-255.
    pub(crate) fn from_channels(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels.map(clamp_channel);
        Self::new(r, g, b)
    }
}

fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Normalizes a 3- or 6-digit hex string, with or without a leading `#`.
///
/// Returns `None` for any other shape. The 3-digit form expands each digit
/// (`abc` becomes `aabbcc`).
#[must_use]
pub fn normalize(input: &str) -> Option<Color> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&expanded[range], 16).ok();
    Some(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

static HEX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#?[0-9A-Za-z]+").expect("hex token pattern is valid"));

/// Extracts every valid hex color from free-form text.
///
/// Tokens that do not normalize are dropped. A token without a leading `#`
/// must contain a digit, so words such as "bad" or "decade" are never read as
/// colors. Order of first appearance is kept and repeated colors are only
/// reported once, so the first element is the primary swatch.
///
/// ```
/// use swatchmatch::color::{parse_all, Color};
///
/// let swatches = parse_all("brand: #FF0000, accent 0af, a bad add-on, junk: zzz");
/// assert_eq!(swatches, vec![Color::new(255, 0, 0), Color::new(0, 0xaa, 0xff)]);
/// ```
#[must_use]
pub fn parse_all(text: &str) -> Vec<Color> {
    let mut swatches = Vec::new();
    for token in HEX_TOKEN.find_iter(text).map(|m| m.as_str()) {
        if !token.starts_with('#') && !token.bytes().any(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Some(color) = normalize(token) {
            if !swatches.contains(&color) {
                swatches.push(color);
            }
        }
    }
    swatches
}

/// Euclidean distance between two colors in RGB space, in `[0, MAX_DISTANCE]`.
#[must_use]
pub fn distance(a: Color, b: Color) -> f64 {
    let [ar, ag, ab] = a.channels();
    let [br, bg, bb] = b.channels();
    ((ar - br).powi(2) + (ag - bg).powi(2) + (ab - bb).powi(2)).sqrt()
}

/// Scales every channel by `1 + percent / 100`.
///
/// An RGB approximation of a brightness change, not an HSB transform.
#[must_use]
pub fn adjust_brightness(color: Color, percent: f64) -> Color {
    let factor = 1.0 + percent / 100.0;
    Color::from_channels(color.channels().map(|c| c * factor))
}

/// Scales each channel's deviation from the channel mean by `1 + percent / 100`.
///
/// An RGB approximation of a saturation change, not an HSL transform.
#[must_use]
pub fn adjust_saturation(color: Color, percent: f64) -> Color {
    let factor = 1.0 + percent / 100.0;
    let channels = color.channels();
    let mean = channels.iter().sum::<f64>() / 3.0;
    Color::from_channels(channels.map(|c| mean + (c - mean) * factor))
}

/// Per-channel inversion (`255 - channel`).
#[must_use]
pub const fn complement(color: Color) -> Color {
    Color::new(255 - color.r, 255 - color.g, 255 - color.b)
}

/// Brightness-shifted neighbours (+15% and -15%).
///
/// Stand-in for a hue rotation; see [`harmony`] for the real thing.
#[must_use]
pub fn analogous(color: Color) -> (Color, Color) {
    (adjust_brightness(color, 15.0), adjust_brightness(color, -15.0))
}

/// Perceived-brightness heuristic: `(299R + 587G + 114B) / 1000 < 128`.
#[must_use]
pub fn is_dark(color: Color) -> bool {
    let brightness =
        (299 * u32::from(color.r) + 587 * u32::from(color.g) + 114 * u32::from(color.b)) / 1000;
    brightness < 128
}
