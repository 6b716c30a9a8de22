//! Pexels photo search (`GET /v1/search`).

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

use super::{
    fetch_json, recover, Attribution, ImageProvider, ImageUrls, ProviderImage, ProviderTag,
    SearchQuery,
};
use crate::color::{normalize, ColorName};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com";

const SEARCH_PATH: &str = "/v1/search";

/// Pexels caps `per_page` at 80.
const MAX_PER_PAGE: u32 = 80;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    url: String,
    photographer: String,
    photographer_url: String,
    avg_color: Option<String>,
    src: PhotoSources,
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    original: String,
    large: String,
    medium: String,
    tiny: String,
}

impl From<Photo> for ProviderImage {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id.to_string(),
            urls: ImageUrls {
                thumb: photo.src.tiny,
                small: photo.src.medium,
                regular: photo.src.large,
                full: photo.src.original,
            },
            attribution: Attribution {
                photographer: photo.photographer,
                photographer_url: photo.photographer_url,
                source_url: photo.url,
            },
            base_color: photo.avg_color.as_deref().and_then(normalize),
            description: photo.alt.filter(|alt| !alt.is_empty()),
            width: photo.width,
            height: photo.height,
        }
    }
}

/// Pexels `color` filter value for a color name.
fn color_param(name: ColorName) -> &'static str {
    match name {
        ColorName::Teal => "turquoise",
        ColorName::Purple => "violet",
        other => other.as_str(),
    }
}

/// Adapter for the Pexels API.
#[derive(Debug, Clone)]
pub struct PexelsProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PexelsProvider {
    /// Creates the adapter. Without an API key every search returns nothing.
    #[must_use]
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// Creates the adapter against another API root, such as a local mirror.
    #[must_use]
    pub fn with_base_url(
        client: reqwest::Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, api_key: &str, query: &SearchQuery) -> Result<Vec<ProviderImage>> {
        let mut params = vec![
            ("query", query.text.clone()),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.clamp(1, MAX_PER_PAGE).to_string()),
        ];
        if let Some(hint) = query.color_hint {
            params.push(("color", color_param(hint).to_string()));
        }

        let request = self
            .client
            .get(format!("{}{SEARCH_PATH}", self.base_url))
            .header("Authorization", api_key)
            .query(&params);

        let response: SearchResponse = fetch_json(ProviderTag::Pexels, request).await?;
        Ok(response.photos.into_iter().map(ProviderImage::from).collect())
    }
}

impl ImageProvider for PexelsProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Pexels
    }

    async fn search(&self, query: &SearchQuery) -> Vec<ProviderImage> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("pexels: no API key configured, skipping search");
            return Vec::new();
        };
        recover(ProviderTag::Pexels, self.fetch(api_key, query)).await
    }
}
