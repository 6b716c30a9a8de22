//! Coarse human-readable color names used to build provider search queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Color;

/// Approximate name of a color from a small fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    /// Lightness below 12%.
    Black,
    /// Lightness above 92%.
    White,
    /// Saturation below 15%.
    Gray,
    /// Hue below 15 or from 345.
    Red,
    /// Hue 15-45.
    Orange,
    /// Hue 45-70.
    Yellow,
    /// Hue 70-160.
    Green,
    /// Hue 160-195.
    Teal,
    /// Hue 195-250.
    Blue,
    /// Hue 250-290.
    Purple,
    /// Hue 290-345.
    Pink,
}

impl ColorName {
    /// Buckets `color` by HSL lightness, then saturation, then hue.
    ///
    /// ```
    /// use swatchmatch::color::{Color, ColorName};
    ///
    /// assert_eq!(ColorName::of(Color::new(255, 0, 0)), ColorName::Red);
    /// assert_eq!(ColorName::of(Color::new(139, 92, 246)), ColorName::Purple);
    /// ```
    #[must_use]
    pub fn of(color: Color) -> Self {
        let hsl = color.to_hsl();

        if hsl.l < 12.0 {
            return Self::Black;
        }
        if hsl.l > 92.0 {
            return Self::White;
        }
        if hsl.s < 15.0 {
            return Self::Gray;
        }

        match hsl.h {
            h if h < 15.0 => Self::Red,
            h if h < 45.0 => Self::Orange,
            h if h < 70.0 => Self::Yellow,
            h if h < 160.0 => Self::Green,
            h if h < 195.0 => Self::Teal,
            h if h < 250.0 => Self::Blue,
            h if h < 290.0 => Self::Purple,
            h if h < 345.0 => Self::Pink,
            _ => Self::Red,
        }
    }

    /// Lowercase name, e.g. `"teal"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
