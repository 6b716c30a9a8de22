//! Pixabay image search (`GET /api/`).
//!
//! Pixabay hits carry no color metadata, so every image comes back with
//! `base_color: None` and is dropped during normalization. Running without a
//! key is a supported mode and only logs at debug level.

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use super::{
    fetch_json, recover, Attribution, ImageProvider, ImageUrls, ProviderImage, ProviderTag,
    SearchQuery,
};
use crate::color::ColorName;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com";

const SEARCH_PATH: &str = "/api/";

/// Pixabay rejects `per_page` outside 3-200.
const PER_PAGE_RANGE: (u32, u32) = (3, 200);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Hit {
    id: u64,
    #[serde(rename = "pageURL")]
    page_url: String,
    #[serde(rename = "previewURL")]
    preview_url: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(default)]
    image_width: u32,
    #[serde(default)]
    image_height: u32,
    #[serde(default)]
    tags: String,
    user: String,
    #[serde(rename = "user_id")]
    user_id: u64,
}

impl From<Hit> for ProviderImage {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id.to_string(),
            urls: ImageUrls {
                thumb: hit.preview_url,
                small: hit.webformat_url.clone(),
                regular: hit.webformat_url,
                full: hit.large_image_url,
            },
            attribution: Attribution {
                photographer_url: format!("https://pixabay.com/users/{}-{}/", hit.user, hit.user_id),
                photographer: hit.user,
                source_url: hit.page_url,
            },
            base_color: None,
            description: (!hit.tags.is_empty()).then_some(hit.tags),
            width: hit.image_width,
            height: hit.image_height,
        }
    }
}

/// Pixabay `colors` filter value for a color name.
fn color_param(name: ColorName) -> &'static str {
    match name {
        ColorName::Teal => "turquoise",
        ColorName::Purple => "lilac",
        other => other.as_str(),
    }
}

/// Adapter for the Pixabay API.
#[derive(Debug, Clone)]
pub struct PixabayProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PixabayProvider {
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
            ("key", api_key.to_string()),
            ("q", query.text.clone()),
            ("page", query.page.to_string()),
            (
                "per_page",
                query.per_page.clamp(PER_PAGE_RANGE.0, PER_PAGE_RANGE.1).to_string(),
            ),
            ("image_type", "photo".to_string()),
        ];
        if let Some(hint) = query.color_hint {
            params.push(("colors", color_param(hint).to_string()));
        }

        let request = self
            .client
            .get(format!("{}{SEARCH_PATH}", self.base_url))
            .query(&params);

        let response: SearchResponse = fetch_json(ProviderTag::Pixabay, request).await?;
        Ok(response.hits.into_iter().map(ProviderImage::from).collect())
    }
}

impl ImageProvider for PixabayProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Pixabay
    }

    async fn search(&self, query: &SearchQuery) -> Vec<ProviderImage> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("pixabay: no API key configured, skipping search");
            return Vec::new();
        };
        recover(ProviderTag::Pixabay, self.fetch(api_key, query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_hits_without_color() {
        let body = json!({
            "total": 4692,
            "totalHits": 500,
            "hits": [
                {
                    "id": 195893,
                    "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
                    "type": "photo",
                    "tags": "blossom, bloom, flower",
                    "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
                    "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                    "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
                    "imageWidth": 4000,
                    "imageHeight": 2250,
                    "user_id": 48777,
                    "user": "Josch13",
                    "userImageURL": "https://cdn.pixabay.com/user/2013/11/05/02-10-23-764_250x250.jpg"
                }
            ]
        });

        let response: SearchResponse = serde_json::from_value(body).unwrap();
        let images: Vec<ProviderImage> = response.hits.into_iter().map(ProviderImage::from).collect();

        let hit = &images[0];
        assert_eq!(hit.id, "195893");
        assert_eq!(hit.base_color, None);
        assert_eq!(hit.width, 4000);
        assert_eq!(hit.attribution.photographer, "Josch13");
        assert_eq!(hit.attribution.photographer_url, "https://pixabay.com/users/Josch13-48777/");
        assert_eq!(hit.description.as_deref(), Some("blossom, bloom, flower"));
        assert!(hit.urls.thumb.ends_with("_150.jpg"));
    }

    #[test]
    fn test_color_param_vocabulary() {
        assert_eq!(color_param(ColorName::Teal), "turquoise");
        assert_eq!(color_param(ColorName::Purple), "lilac");
        assert_eq!(color_param(ColorName::Black), "black");
    }

    #[tokio::test]
    async fn test_missing_key_is_silent_empty() {
        let provider = PixabayProvider::new(reqwest::Client::new(), None);
        let query = SearchQuery {
            text: "green".to_string(),
            page: 1,
            per_page: 20,
            color_hint: Some(ColorName::Green),
        };
        assert!(provider.search(&query).await.is_empty());
    }
}
