//! Unsplash photo search (`GET /search/photos`).

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

use super::{
    fetch_json, recover, Attribution, ImageProvider, ImageUrls, ProviderImage, ProviderTag,
    SearchQuery,
};
use crate::color::{normalize, ColorName};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

const SEARCH_PATH: &str = "/search/photos";

/// Unsplash caps `per_page` at 30.
const MAX_PER_PAGE: u32 = 30;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    /// Average color as `#rrggbb`.
    color: Option<String>,
    description: Option<String>,
    alt_description: Option<String>,
    urls: PhotoUrls,
    links: PhotoLinks,
    user: User,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    full: String,
    regular: String,
    small: String,
    thumb: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: String,
}

#[derive(Debug, Deserialize)]
struct User {
    name: String,
    links: UserLinks,
}

#[derive(Debug, Deserialize)]
struct UserLinks {
    html: String,
}

impl From<Photo> for ProviderImage {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            urls: ImageUrls {
                thumb: photo.urls.thumb,
                small: photo.urls.small,
                regular: photo.urls.regular,
                full: photo.urls.full,
            },
            attribution: Attribution {
                photographer: photo.user.name,
                photographer_url: photo.user.links.html,
                source_url: photo.links.html,
            },
            base_color: photo.color.as_deref().and_then(normalize),
            description: photo.description.or(photo.alt_description),
            width: photo.width,
            height: photo.height,
        }
    }
}

/// Unsplash `color` filter value for a color name.
fn color_param(name: ColorName) -> &'static str {
    match name {
        ColorName::Gray => "black_and_white",
        ColorName::Pink => "magenta",
        other => other.as_str(),
    }
}

/// Adapter for the Unsplash API.
#[derive(Debug, Clone)]
pub struct UnsplashProvider {
    client: reqwest::Client,
    access_key: Option<String>,
    base_url: String,
}

impl UnsplashProvider {
    /// Creates the adapter. Without an access key every search returns nothing.
    #[must_use]
    pub fn new(client: reqwest::Client, access_key: Option<String>) -> Self {
        Self::with_base_url(client, access_key, DEFAULT_BASE_URL)
    }

    /// Creates the adapter against another API root, such as a local mirror.
    #[must_use]
    pub fn with_base_url(
        client: reqwest::Client,
        access_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            access_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, access_key: &str, query: &SearchQuery) -> Result<Vec<ProviderImage>> {
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
            .header("Authorization", format!("Client-ID {access_key}"))
            .header("Accept-Version", "v1")
            .query(&params);

        let response: SearchResponse = fetch_json(ProviderTag::Unsplash, request).await?;
        Ok(response.results.into_iter().map(ProviderImage::from).collect())
    }
}

impl ImageProvider for UnsplashProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Unsplash
    }

    async fn search(&self, query: &SearchQuery) -> Vec<ProviderImage> {
        let Some(access_key) = self.access_key.as_deref() else {
            warn!("unsplash: no access key configured, skipping search");
            return Vec::new();
        };
        recover(ProviderTag::Unsplash, self.fetch(access_key, query)).await
    }
}
