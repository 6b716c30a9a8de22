//! Contrast-aware UI role palettes.
//!
//! [`assign_roles`] turns one base color plus a [`Vibe`], a [`Brightness`]
//! preference and a target contrast ratio into a [`RolePalette`]. The
//! computation is pure; [`RoleAssigner`] wraps it for callers that keep a
//! palette around and update it as inputs change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{
    adjust_brightness, adjust_saturation, contrast_ratio, ensure_contrast, harmony, is_dark, Color,
    Hsl,
};

/// Number of steps in each shade/tint ramp.
pub const RAMP_STEPS: usize = 8;

/// Percentage of the remaining lightness range covered per ramp step.
const RAMP_STEP_PERCENT: f64 = 12.0;

/// Minimum ratio the accent must reach regardless of the text target.
pub const MIN_ACCENT_RATIO: f64 = 3.0;

/// Ramp index used for heading text.
const HEADING_RAMP_INDEX: usize = 7;
/// Ramp index used for body text.
const BODY_RAMP_INDEX: usize = 5;
/// Tint index used for illustrations on dark backgrounds.
const ILLUSTRATION_TINT_INDEX: usize = 2;

/// Light neutral used for "mixed" backgrounds without a dedicated entry.
const NEUTRAL_BACKGROUND: Color = Color::new(0xf5, 0xf5, 0xf5);

/// Valid range for target contrast ratios.
const RATIO_RANGE: (f64, f64) = (1.0, 21.0);

/// Stylistic modifier applied to the base color before deriving roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    /// Muted and slightly lighter.
    #[default]
    Minimal,
    /// Much more saturated.
    Vibrant,
    /// Saturated, with a triadic accent instead of the complement.
    Playful,
    /// Slightly muted and darker.
    Professional,
    /// Muted and darkest.
    Elegant,
    /// Saturated and slightly darker.
    Bold,
}

/// Saturation and brightness shifts (percent) associated with a vibe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibeShift {
    /// Passed to [`adjust_saturation`].
    pub saturation: f64,
    /// Passed to [`adjust_brightness`].
    pub brightness: f64,
}

impl Vibe {
    /// All vibes in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Minimal,
            Self::Vibrant,
            Self::Playful,
            Self::Professional,
            Self::Elegant,
            Self::Bold,
        ]
    }

    /// Lowercase identifier, e.g. `"playful"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Vibrant => "vibrant",
            Self::Playful => "playful",
            Self::Professional => "professional",
            Self::Elegant => "elegant",
            Self::Bold => "bold",
        }
    }

    /// Shift applied to the base color for this vibe.
    #[must_use]
    pub const fn shift(self) -> VibeShift {
        let (saturation, brightness) = match self {
            Self::Minimal => (-20.0, 10.0),
            Self::Vibrant => (30.0, 5.0),
            Self::Playful => (20.0, 10.0),
            Self::Professional => (-10.0, -5.0),
            Self::Elegant => (-15.0, -10.0),
            Self::Bold => (25.0, -5.0),
        };
        VibeShift {
            saturation,
            brightness,
        }
    }

    /// Literal background used with [`Brightness::Mixed`].
    #[must_use]
    pub const fn mixed_background(self) -> Color {
        match self {
            Self::Minimal => Color::new(0xf8, 0xf9, 0xfa),
            Self::Vibrant => Color::new(0xff, 0xf8, 0xf0),
            Self::Playful => Color::new(0xff, 0xf5, 0xfb),
            Self::Elegant => Color::new(0xfa, 0xf8, 0xf5),
            Self::Professional | Self::Bold => NEUTRAL_BACKGROUND,
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vibe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::all()
            .into_iter()
            .find(|vibe| vibe.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown vibe '{s}'. Expected one of: minimal, vibrant, playful, professional, elegant, bold"
                )
            })
    }
}

/// Background brightness preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brightness {
    /// Near-black background tinted toward the base hue.
    Dark,
    /// Near-white background tinted toward the base hue.
    #[default]
    Light,
    /// Per-vibe literal background.
    Mixed,
}

impl Brightness {
    /// Lowercase identifier, e.g. `"dark"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Mixed => "mixed",
        }
    }

    fn background_for(self, base: Hsl, vibe: Vibe) -> Color {
        match self {
            Self::Dark => Hsl::new(base.h, base.s.min(20.0), 8.0).to_color(),
            Self::Light => Hsl::new(base.h, base.s.min(10.0), 98.0).to_color(),
            Self::Mixed => vibe.mixed_background(),
        }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brightness {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "mixed" => Ok(Self::Mixed),
            _ => anyhow::bail!("Unknown brightness '{s}'. Expected one of: dark, light, mixed"),
        }
    }
}

/// Inputs to role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSettings {
    /// Base brand color.
    pub base: Color,
    /// Stylistic modifier.
    pub vibe: Vibe,
    /// Background preference.
    pub brightness: Brightness,
    /// Minimum contrast ratio for text roles (clamped to 1.0-21.0).
    pub target_ratio: f64,
    /// Run contrast correction on accent and text roles.
    pub correct_contrast: bool,
}

impl RoleSettings {
    /// Settings with the default vibe, brightness and a 4.5:1 (WCAG AA) target.
    #[must_use]
    pub const fn new(base: Color) -> Self {
        Self {
            base,
            vibe: Vibe::Minimal,
            brightness: Brightness::Light,
            target_ratio: 4.5,
            correct_contrast: true,
        }
    }

    fn clamped_ratio(&self) -> f64 {
        if self.target_ratio.is_finite() {
            self.target_ratio.clamp(RATIO_RANGE.0, RATIO_RANGE.1)
        } else {
            RATIO_RANGE.0
        }
    }
}

/// Achieved contrast for one role against the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    /// Contrast ratio against the background.
    pub ratio: f64,
    /// Ratio the role was required to reach.
    pub target: f64,
    /// Whether `ratio >= target`.
    pub meets_target: bool,
}

impl ContrastCheck {
    fn measure(fg: Color, bg: Color, target: f64) -> Self {
        let ratio = contrast_ratio(fg, bg);
        Self {
            ratio,
            target,
            meets_target: ratio >= target,
        }
    }
}

/// Contrast achieved by the corrected roles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    /// Accent against the background, targeting at least 3:1.
    pub accent: ContrastCheck,
    /// Heading text against the background.
    pub text_heading: ContrastCheck,
    /// Body text against the background.
    pub text_body: ContrastCheck,
}

/// Role palette with the settings that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePalette {
    /// Base color after the vibe shift.
    pub base: Color,
    /// Page background.
    pub background: Color,
    /// Fill for illustrations and decorative shapes.
    pub illustration: Color,
    /// Buttons, links and highlights.
    pub accent: Color,
    /// Heading text.
    pub text_heading: Color,
    /// Body text.
    pub text_body: Color,
    /// Inputs used to compute this palette.
    pub settings: RoleSettings,
    /// Contrast achieved against the background.
    pub contrast: ContrastReport,
}

/// Lightness ramps around a color: `tints` move toward white, `shades` toward black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramps {
    /// Lighter steps, nearest first.
    pub tints: [Color; RAMP_STEPS],
    /// Darker steps, nearest first.
    pub shades: [Color; RAMP_STEPS],
}

/// Builds tint and shade ramps where step `i` covers `12 * (i + 1)` percent of
/// the distance to full/zero lightness.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ramps(color: Color) -> Ramps {
    let hsl = color.to_hsl();
    let fraction = |i: usize| RAMP_STEP_PERCENT * (i as f64 + 1.0) / 100.0;

    Ramps {
        tints: std::array::from_fn(|i| hsl.with_lightness(hsl.l + (100.0 - hsl.l) * fraction(i)).to_color()),
        shades: std::array::from_fn(|i| hsl.with_lightness(hsl.l * (1.0 - fraction(i))).to_color()),
    }
}

/// Computes the role palette for `settings`.
///
/// Identical settings always produce an identical palette.
#[must_use]
pub fn assign_roles(settings: &RoleSettings) -> RolePalette {
    let target = settings.clamped_ratio();
    let accent_target = target.max(MIN_ACCENT_RATIO);

    let shift = settings.vibe.shift();
    let base = adjust_brightness(adjust_saturation(settings.base, shift.saturation), shift.brightness);

    let harmonies = harmony(base);
    let ramps = ramps(base);

    let background = settings.brightness.background_for(base.to_hsl(), settings.vibe);
    let dark = is_dark(background);

    let illustration = if dark {
        ramps.tints[ILLUSTRATION_TINT_INDEX]
    } else {
        base
    };

    let raw_accent = match settings.vibe {
        Vibe::Playful => harmonies.triadic[1],
        _ => harmonies.complementary,
    };
    let text_ramp = if dark { ramps.tints } else { ramps.shades };
    let raw_heading = text_ramp[HEADING_RAMP_INDEX];
    let raw_body = text_ramp[BODY_RAMP_INDEX];

    let (accent, text_heading, text_body) = if settings.correct_contrast {
        (
            ensure_contrast(raw_accent, background, accent_target),
            ensure_contrast(raw_heading, background, target),
            ensure_contrast(raw_body, background, target),
        )
    } else {
        (raw_accent, raw_heading, raw_body)
    };

    RolePalette {
        base,
        background,
        illustration,
        accent,
        text_heading,
        text_body,
        settings: RoleSettings {
            target_ratio: target,
            ..*settings
        },
        contrast: ContrastReport {
            accent: ContrastCheck::measure(accent, background, accent_target),
            text_heading: ContrastCheck::measure(text_heading, background, target),
            text_body: ContrastCheck::measure(text_body, background, target),
        },
    }
}

/// Holds role settings and the palette derived from them.
///
/// Every setter recomputes the palette in place.
#[derive(Debug, Clone)]
pub struct RoleAssigner {
    palette: RolePalette,
}

impl RoleAssigner {
    /// Creates an assigner and computes the initial palette.
    #[must_use]
    pub fn new(settings: RoleSettings) -> Self {
        Self {
            palette: assign_roles(&settings),
        }
    }

    /// Current palette.
    #[must_use]
    pub const fn palette(&self) -> &RolePalette {
        &self.palette
    }

    /// Current settings (with the target ratio as clamped).
    #[must_use]
    pub const fn settings(&self) -> &RoleSettings {
        &self.palette.settings
    }

    /// Replaces the base color and recomputes every role.
    pub fn set_base(&mut self, base: Color) -> &RolePalette {
        self.update(|s| s.base = base)
    }

    /// Switches the vibe.
    pub fn set_vibe(&mut self, vibe: Vibe) -> &RolePalette {
        self.update(|s| s.vibe = vibe)
    }

    /// Switches the background mode.
    pub fn set_brightness(&mut self, brightness: Brightness) -> &RolePalette {
        self.update(|s| s.brightness = brightness)
    }

    /// Changes the contrast target. Out-of-range values are clamped to 1-21.
    pub fn set_target_ratio(&mut self, target_ratio: f64) -> &RolePalette {
        self.update(|s| s.target_ratio = target_ratio)
    }

    /// Turns contrast correction of accent and text on or off.
    pub fn set_correct_contrast(&mut self, correct_contrast: bool) -> &RolePalette {
        self.update(|s| s.correct_contrast = correct_contrast)
    }

    fn update(&mut self, change: impl FnOnce(&mut RoleSettings)) -> &RolePalette {
        let mut settings = self.palette.settings;
        change(&mut settings);
        self.palette = assign_roles(&settings);
        &self.palette
    }
}
