//! WCAG contrast computation and best-effort contrast correction.

use super::{is_dark, Color};

/// Upper bound on lightness steps taken by [`ensure_contrast`].
pub const MAX_CONTRAST_STEPS: usize = 100;

/// Lightness change (percentage points) per correction step.
const LIGHTNESS_STEP: f64 = 1.0;

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance in 0.0-1.0.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// WCAG contrast ratio between two colors, in 1.0-21.0. Symmetric.
#[must_use]
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let a = relative_luminance(fg);
    let b = relative_luminance(bg);
    (a.max(b) + 0.05) / (a.min(b) + 0.05)
}

/// Nudges `fg` until it reaches `target` contrast against `bg`.
///
/// Returns `fg` untouched when it already complies. Otherwise the direction is
/// chosen once (lighten on dark backgrounds, darken on light ones) and the HSL
/// lightness of `fg` moves one point per step for at most
/// [`MAX_CONTRAST_STEPS`] steps.
///
/// The result is the best candidate seen, so its contrast is never lower than
/// the input's. It may still fall short of `target`; callers that care should
/// check [`contrast_ratio`] on the result.
#[must_use]
pub fn ensure_contrast(fg: Color, bg: Color, target: f64) -> Color {
    let mut best = fg;
    let mut best_ratio = contrast_ratio(fg, bg);
    if best_ratio >= target {
        return fg;
    }

    let step = if is_dark(bg) { LIGHTNESS_STEP } else { -LIGHTNESS_STEP };
    let mut hsl = fg.to_hsl();

    for _ in 0..MAX_CONTRAST_STEPS {
        hsl = hsl.with_lightness(hsl.l + step);
        let candidate = hsl.to_color();
        let ratio = contrast_ratio(candidate, bg);

        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
        if best_ratio >= target {
            break;
        }
    }

    best
}
