//! Stock image provider adapters.
//!
//! Each adapter talks to one search API and maps its response into
//! [`ProviderImage`]. Adapters never fail: missing credentials, transport
//! errors, non-success statuses and malformed bodies are logged and turned into
//! an empty result list.

pub mod normalize;
pub mod pexels;
pub mod pixabay;
pub mod unsplash;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::{Color, ColorName};

pub use normalize::{normalize, Attribution, ImageUrls, UnifiedImage};
pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;
pub use unsplash::UnsplashProvider;

/// Identifies which provider an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    /// unsplash.com
    Unsplash,
    /// pexels.com
    Pexels,
    /// pixabay.com
    Pixabay,
}

impl ProviderTag {
    /// Lowercase provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsplash => "unsplash",
            Self::Pexels => "pexels",
            Self::Pixabay => "pixabay",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters shared by every provider search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text search terms.
    pub text: String,
    /// 1-based page number.
    pub page: u32,
    /// Results requested per page.
    pub per_page: u32,
    /// Optional color filter, mapped to each provider's vocabulary.
    pub color_hint: Option<ColorName>,
}

/// An image as reported by a provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderImage {
    /// Provider-local identifier.
    pub id: String,
    /// Image URLs at several resolutions.
    pub urls: ImageUrls,
    /// Credit for the image.
    pub attribution: Attribution,
    /// Average or dominant color reported by the provider, if any.
    pub base_color: Option<Color>,
    /// Alt text or description.
    pub description: Option<String>,
    /// Pixel width of the original.
    pub width: u32,
    /// Pixel height of the original.
    pub height: u32,
}

/// A searchable image source.
pub trait ImageProvider: Send + Sync {
    /// Which provider this is.
    fn tag(&self) -> ProviderTag;

    /// Runs one search. Failures yield an empty list.
    fn search(&self, query: &SearchQuery) -> impl Future<Output = Vec<ProviderImage>> + Send;
}

/// Builds the HTTP client shared by the live adapters.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("swatchmatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building http client")
}

/// Awaits a fallible fetch and degrades any error to an empty list.
pub(crate) async fn recover(
    tag: ProviderTag,
    fetch: impl Future<Output = Result<Vec<ProviderImage>>>,
) -> Vec<ProviderImage> {
    match fetch.await {
        Ok(images) => {
            debug!("{tag}: fetched {} images", images.len());
            images
        }
        Err(e) => {
            warn!("{tag}: search failed: {e:#}");
            Vec::new()
        }
    }
}

/// Sends a prepared request and decodes a JSON body, rejecting non-success statuses.
pub(crate) async fn fetch_json<T: serde::de::DeserializeOwned>(
    tag: ProviderTag,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .with_context(|| format!("sending {tag} request"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("{tag} API returned {status}");
    }

    response
        .json::<T>()
        .await
        .with_context(|| format!("parsing {tag} response JSON"))
}
