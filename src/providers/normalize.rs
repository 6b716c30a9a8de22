//! Maps provider-native images into one unified shape.

use serde::{Deserialize, Serialize};

use super::{ProviderImage, ProviderTag};
use crate::color::Color;
use crate::palette::{derive, DerivedPalette};

/// Image URLs from smallest to largest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Roughly 200px wide.
    pub thumb: String,
    /// Roughly 400px wide.
    pub small: String,
    /// Roughly 1080px wide.
    pub regular: String,
    /// Original resolution, or the largest the provider offers.
    pub full: String,
}

/// Credit for an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Photographer or uploader display name.
    pub photographer: String,
    /// Photographer profile page.
    pub photographer_url: String,
    /// Image page on the provider's site.
    pub source_url: String,
}

/// Provider-agnostic image with the palette used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedImage {
    /// Provider-prefixed identifier, e.g. `"pexels-2014422"`.
    pub id: String,
    /// Image URLs at several resolutions.
    pub urls: ImageUrls,
    /// Credit to show next to the image.
    pub attribution: Attribution,
    /// Color the provider reported for the image.
    pub color: Color,
    /// Palette derived from `color`.
    pub dominant_colors: DerivedPalette,
    /// Where the image came from.
    pub provider: ProviderTag,
    /// Alt text or description, when the provider has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pixel width of the original.
    pub width: u32,
    /// Pixel height of the original.
    pub height: u32,
}

/// Converts a provider image, or returns `None` when it carries no base color.
///
/// Images without a color cannot be matched, so they are excluded rather than
/// emitted with an empty palette.
#[must_use]
pub fn normalize(image: ProviderImage, provider: ProviderTag) -> Option<UnifiedImage> {
    let color = image.base_color?;

    Some(UnifiedImage {
        id: format!("{provider}-{}", image.id),
        urls: image.urls,
        attribution: image.attribution,
        color,
        dominant_colors: derive(color),
        provider,
        description: image.description,
        width: image.width,
        height: image.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(base_color: Option<Color>) -> ProviderImage {
        ProviderImage {
            id: "abc123".to_string(),
            urls: ImageUrls {
                thumb: "https://img.test/t.jpg".to_string(),
                small: "https://img.test/s.jpg".to_string(),
                regular: "https://img.test/r.jpg".to_string(),
                full: "https://img.test/f.jpg".to_string(),
            },
            attribution: Attribution {
                photographer: "Ada".to_string(),
                photographer_url: "https://img.test/@ada".to_string(),
                source_url: "https://img.test/photos/abc123".to_string(),
            },
            base_color,
            description: Some("red door".to_string()),
            width: 4000,
            height: 3000,
        }
    }

    #[test]
    fn test_normalize_with_color() {
        let red = Color::new(200, 30, 40);
        let unified = normalize(image(Some(red)), ProviderTag::Unsplash).unwrap();

        assert_eq!(unified.id, "unsplash-abc123");
        assert_eq!(unified.color, red);
        assert_eq!(unified.dominant_colors, derive(red));
        assert_eq!(unified.provider, ProviderTag::Unsplash);
        assert_eq!(unified.attribution.photographer, "Ada");
        assert_eq!(unified.width, 4000);
    }

    #[test]
    fn test_normalize_without_color_is_excluded() {
        assert!(normalize(image(None), ProviderTag::Pixabay).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let unified = normalize(image(Some(Color::new(0, 0, 0))), ProviderTag::Pexels).unwrap();
        let json = serde_json::to_value(&unified).unwrap();
        assert_eq!(json["provider"], "pexels");
        assert_eq!(json["color"], "#000000");
        assert_eq!(json["dominantColors"]["vibrant"], "#000000");
        assert_eq!(json["urls"]["thumb"], "https://img.test/t.jpg");
    }
}
