//! Multi-provider image matching.
//!
//! A match run parses swatches out of free text, queries all three providers
//! concurrently, normalizes what comes back and keeps the images whose derived
//! palette lands close enough to any swatch.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::color::{parse_all, Color, ColorName};
use crate::config::{Config, DEFAULT_THRESHOLD};
use crate::error::MatchError;
use crate::providers::{
    http_client, normalize, ImageProvider, PexelsProvider, PixabayProvider, ProviderImage,
    ProviderTag, SearchQuery, UnifiedImage, UnsplashProvider,
};

/// Incoming match request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Free text containing one or more hex colors.
    pub text: String,
    /// 1-based result page; `0` is treated as `1`.
    #[serde(default)]
    pub page: Option<u32>,
    /// Maximum palette distance for a match. Values between 20 and 150 give
    /// useful results; anything finite and non-negative is honored as given.
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl MatchRequest {
    /// Request for the first page with the default threshold.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: None,
            threshold: None,
        }
    }
}

/// Number of images each provider returned before filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCounts {
    /// Images fetched from Unsplash.
    pub unsplash: usize,
    /// Images fetched from Pexels.
    pub pexels: usize,
    /// Images fetched from Pixabay.
    pub pixabay: usize,
}

/// A matched image with its distance to the nearest swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedImage {
    /// The normalized image, flattened into the JSON object.
    #[serde(flatten)]
    pub image: UnifiedImage,
    /// Minimum distance between the image palette and any swatch.
    pub score: f64,
}

/// Result of a match run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    /// Matches, best first.
    pub images: Vec<MatchedImage>,
    /// Page that was requested from every provider.
    pub page: u32,
    /// Number of matches returned.
    pub total: usize,
    /// Pre-filter result counts per provider.
    pub provider_counts: ProviderCounts,
    /// Swatches parsed from the request text.
    pub swatches: Vec<Color>,
    /// Search text sent to the providers.
    pub query: String,
}

/// Tunables for a [`MatchEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSettings {
    /// Results requested from each provider.
    pub per_page: u32,
    /// Upper bound on each provider search.
    pub timeout: Duration,
    /// Threshold for requests that do not carry one.
    pub default_threshold: f64,
    /// Terms appended to the primary color name.
    pub query_terms: String,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl MatchSettings {
    /// Reads the matching tunables out of a loaded config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            per_page: config.providers.per_page,
            timeout: config.providers.timeout(),
            default_threshold: config.matching.default_threshold,
            query_terms: config.matching.query_terms.clone(),
        }
    }

    /// Effective threshold for a request.
    ///
    /// A finite, non-negative request value is used as given. Anything else
    /// falls back to the configured default.
    #[must_use]
    pub fn resolve_threshold(&self, requested: Option<f64>) -> f64 {
        let usable = |t: &f64| t.is_finite() && *t >= 0.0;

        requested
            .filter(usable)
            .or_else(|| Some(self.default_threshold).filter(usable))
            .unwrap_or(DEFAULT_THRESHOLD)
    }
}

/// Search text for a primary swatch, e.g. `"red color aesthetic"`.
#[must_use]
pub fn query_text(primary: Color, terms: &str) -> String {
    let name = ColorName::of(primary);
    let terms = terms.trim();
    if terms.is_empty() {
        name.to_string()
    } else {
        format!("{name} {terms}")
    }
}

/// Fans a query out to three providers and ranks the merged results.
///
/// Each provider search runs on its own task, so a panicking adapter only
/// loses its own results.
#[derive(Debug)]
pub struct MatchEngine<U, P, X> {
    unsplash: Arc<U>,
    pexels: Arc<P>,
    pixabay: Arc<X>,
    settings: MatchSettings,
}

/// Engine wired to the live provider APIs.
pub type LiveMatchEngine = MatchEngine<UnsplashProvider, PexelsProvider, PixabayProvider>;

impl LiveMatchEngine {
    /// Builds the live adapters from configured and environment credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = http_client(config.providers.timeout())?;
        Ok(Self::new(
            UnsplashProvider::new(client.clone(), config.providers.unsplash_key()),
            PexelsProvider::new(client.clone(), config.providers.pexels_key()),
            PixabayProvider::new(client, config.providers.pixabay_key()),
            MatchSettings::from_config(config),
        ))
    }
}

impl<U, P, X> MatchEngine<U, P, X>
where
    U: ImageProvider + 'static,
    P: ImageProvider + 'static,
    X: ImageProvider + 'static,
{
    /// Wires three providers together with the given tunables.
    #[must_use]
    pub fn new(unsplash: U, pexels: P, pixabay: X, settings: MatchSettings) -> Self {
        Self {
            unsplash: Arc::new(unsplash),
            pexels: Arc::new(pexels),
            pixabay: Arc::new(pixabay),
            settings,
        }
    }

    /// Tunables this engine was built with.
    #[must_use]
    pub const fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Runs one match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NoValidColors`] when the text holds no hex colors.
    /// No provider is contacted in that case.
    pub async fn run(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
        let swatches = parse_all(&request.text);
        let Some(&primary) = swatches.first() else {
            return Err(MatchError::NoValidColors);
        };

        let page = request.page.unwrap_or(1).max(1);
        let threshold = self.settings.resolve_threshold(request.threshold);
        let query = SearchQuery {
            text: query_text(primary, &self.settings.query_terms),
            page,
            per_page: self.settings.per_page,
            color_hint: Some(ColorName::of(primary)),
        };

        debug!(
            "matching {} swatches with query {:?}, threshold {threshold}",
            swatches.len(),
            query.text
        );

        let timeout = self.settings.timeout;
        let (unsplash, pexels, pixabay) = tokio::join!(
            spawn_search(&self.unsplash, &query, timeout),
            spawn_search(&self.pexels, &query, timeout),
            spawn_search(&self.pixabay, &query, timeout),
        );
        let unsplash = settle(self.unsplash.tag(), unsplash);
        let pexels = settle(self.pexels.tag(), pexels);
        let pixabay = settle(self.pixabay.tag(), pixabay);

        let provider_counts = ProviderCounts {
            unsplash: unsplash.len(),
            pexels: pexels.len(),
            pixabay: pixabay.len(),
        };
        debug!(
            "provider counts: unsplash={} pexels={} pixabay={}",
            provider_counts.unsplash, provider_counts.pexels, provider_counts.pixabay
        );

        let batches = [
            (self.unsplash.tag(), unsplash),
            (self.pexels.tag(), pexels),
            (self.pixabay.tag(), pixabay),
        ];

        let mut images: Vec<MatchedImage> = batches
            .into_iter()
            .flat_map(|(tag, batch)| batch.into_iter().filter_map(move |img| normalize(img, tag)))
            .filter_map(|image| {
                let score = image.dominant_colors.min_distance_to(&swatches)?;
                (score <= threshold).then_some(MatchedImage { image, score })
            })
            .collect();

        // sort_by is stable, so ties keep provider order
        images.sort_by(|a, b| a.score.total_cmp(&b.score));

        Ok(MatchResponse {
            total: images.len(),
            images,
            page,
            provider_counts,
            swatches,
            query: query.text,
        })
    }
}

fn spawn_search<T: ImageProvider + 'static>(
    provider: &Arc<T>,
    query: &SearchQuery,
    limit: Duration,
) -> tokio::task::JoinHandle<Vec<ProviderImage>> {
    let provider = Arc::clone(provider);
    let query = query.clone();
    tokio::spawn(async move { bounded(provider.as_ref(), &query, limit).await })
}

/// A search task that panicked or was cancelled counts as an empty result.
fn settle(tag: ProviderTag, joined: Result<Vec<ProviderImage>, JoinError>) -> Vec<ProviderImage> {
    joined.unwrap_or_else(|e| {
        warn!("{tag}: search task failed: {e}");
        Vec::new()
    })
}

async fn bounded<T: ImageProvider>(
    provider: &T,
    query: &SearchQuery,
    limit: Duration,
) -> Vec<ProviderImage> {
    match tokio::time::timeout(limit, provider.search(query)).await {
        Ok(images) => images,
        Err(_) => {
            warn!("{}: search timed out after {limit:?}", provider.tag());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Attribution, ImageUrls};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct StubProvider {
        tag: ProviderTag,
        images: Vec<ProviderImage>,
        calls: Arc<AtomicUsize>,
        delay: Option<Duration>,
        panics: bool,
        last_query: Arc<std::sync::Mutex<Option<SearchQuery>>>,
    }

    impl StubProvider {
        fn new(tag: ProviderTag, colors: &[Option<Color>]) -> Self {
            let images = colors
                .iter()
                .enumerate()
                .map(|(i, color)| image(&format!("{i}"), *color))
                .collect();
            Self {
                tag,
                images,
                calls: Arc::new(AtomicUsize::new(0)),
                delay: None,
                panics: false,
                last_query: Arc::new(std::sync::Mutex::new(None)),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn panicking(mut self) -> Self {
            self.panics = true;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageProvider for StubProvider {
        fn tag(&self) -> ProviderTag {
            self.tag
        }

        async fn search(&self, query: &SearchQuery) -> Vec<ProviderImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.panics {
                panic!("{} adapter blew up", self.tag);
            }
            self.images.clone()
        }
    }

    fn image(id: &str, base_color: Option<Color>) -> ProviderImage {
        ProviderImage {
            id: id.to_string(),
            urls: ImageUrls::default(),
            attribution: Attribution::default(),
            base_color,
            description: None,
            width: 800,
            height: 600,
        }
    }

    fn engine(
        unsplash: StubProvider,
        pexels: StubProvider,
        pixabay: StubProvider,
    ) -> MatchEngine<StubProvider, StubProvider, StubProvider> {
        MatchEngine::new(unsplash, pexels, pixabay, MatchSettings::default())
    }

    const RED: Color = Color::new(255, 0, 0);
    const NEAR_RED: Color = Color::new(224, 24, 24);
    const BLUE: Color = Color::new(0, 0, 255);

    #[tokio::test]
    async fn test_matches_within_threshold_sorted_ascending() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[Some(NEAR_RED), Some(BLUE)]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[Some(RED), None]);
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[None, None, None]);
        let engine = engine(unsplash, pexels, pixabay);

        let response = engine.run(&MatchRequest::new("#FF0000")).await.unwrap();

        let ids: Vec<&str> = response.images.iter().map(|m| m.image.id.as_str()).collect();
        assert_eq!(ids, ["pexels-0", "unsplash-0"]);
        assert_eq!(response.total, 2);
        assert!(response.images[0].score.abs() < f64::EPSILON);
        assert!(response.images.windows(2).all(|w| w[0].score <= w[1].score));
        assert!(response.images.iter().all(|m| m.score <= 80.0));
        assert_eq!(
            response.provider_counts,
            ProviderCounts {
                unsplash: 2,
                pexels: 2,
                pixabay: 3,
            }
        );
        assert_eq!(response.swatches, vec![RED]);
        assert_eq!(response.query, "red color aesthetic");
        assert_eq!(response.page, 1);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_provider_order() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[Some(RED)]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[Some(RED)]);
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[]);
        let engine = engine(unsplash, pexels, pixabay);

        let response = engine.run(&MatchRequest::new("ff0000")).await.unwrap();

        let ids: Vec<&str> = response.images.iter().map(|m| m.image.id.as_str()).collect();
        assert_eq!(ids, ["unsplash-0", "pexels-0"]);
    }

    #[tokio::test]
    async fn test_empty_provider_does_not_affect_others() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[Some(RED)]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[]);
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[]);
        let engine = engine(unsplash, pexels, pixabay);

        let response = engine.run(&MatchRequest::new("#f00")).await.unwrap();

        assert_eq!(response.provider_counts.pexels, 0);
        assert_eq!(response.provider_counts.unsplash, 1);
        assert_eq!(response.total, 1);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_to_empty() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[Some(RED)]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[Some(RED)]).slow(Duration::from_secs(5));
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[]);
        let settings = MatchSettings {
            timeout: Duration::from_millis(50),
            ..MatchSettings::default()
        };
        let engine = MatchEngine::new(unsplash, pexels, pixabay, settings);

        let response = engine.run(&MatchRequest::new("#ff0000")).await.unwrap();

        assert_eq!(response.provider_counts.pexels, 0);
        assert_eq!(response.provider_counts.unsplash, 1);
        assert_eq!(response.images.len(), 1);
        assert_eq!(response.images[0].image.provider, ProviderTag::Unsplash);
    }

    #[tokio::test]
    async fn test_no_valid_colors_makes_no_provider_calls() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[Some(RED)]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[Some(RED)]);
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[Some(RED)]);
        let engine = engine(unsplash.clone(), pexels.clone(), pixabay.clone());

        for text in ["", "   ", "nothing here", "#12345g"] {
            let result = engine.run(&MatchRequest::new(text)).await;
            assert_eq!(result.unwrap_err(), MatchError::NoValidColors, "input {text:?}");
        }

        assert_eq!(unsplash.calls(), 0);
        assert_eq!(pexels.calls(), 0);
        assert_eq!(pixabay.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_carries_page_and_color_hint() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[]);
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[]);
        let engine = engine(unsplash.clone(), pexels, pixabay);

        let request = MatchRequest {
            text: "palette: #0000ff and #ff0000".to_string(),
            page: Some(3),
            threshold: None,
        };
        let response = engine.run(&request).await.unwrap();
        assert_eq!(response.page, 3);
        assert_eq!(response.swatches, vec![BLUE, RED]);

        let query = unsplash.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 20);
        assert_eq!(query.color_hint, Some(ColorName::Blue));
        assert_eq!(query.text, "blue color aesthetic");
    }

    #[tokio::test]
    async fn test_page_zero_is_first_page() {
        let engine = engine(
            StubProvider::new(ProviderTag::Unsplash, &[]),
            StubProvider::new(ProviderTag::Pexels, &[]),
            StubProvider::new(ProviderTag::Pixabay, &[]),
        );
        let request = MatchRequest {
            page: Some(0),
            ..MatchRequest::new("#abcdef")
        };
        assert_eq!(engine.run(&request).await.unwrap().page, 1);
    }

    #[tokio::test]
    async fn test_panicking_provider_does_not_affect_others() {
        let unsplash = StubProvider::new(ProviderTag::Unsplash, &[Some(RED)]);
        let pexels = StubProvider::new(ProviderTag::Pexels, &[Some(RED)]).panicking();
        let pixabay = StubProvider::new(ProviderTag::Pixabay, &[None]);
        let engine = engine(unsplash, pexels.clone(), pixabay);

        let response = engine.run(&MatchRequest::new("#ff0000")).await.unwrap();

        assert_eq!(pexels.calls(), 1);
        assert_eq!(
            response.provider_counts,
            ProviderCounts {
                unsplash: 1,
                pexels: 0,
                pixabay: 1,
            }
        );
        assert_eq!(response.total, 1);
        assert_eq!(response.images[0].image.provider, ProviderTag::Unsplash);
    }

    #[tokio::test]
    async fn test_threshold_below_recommended_range_is_honored() {
        // (240, 10, 0) derives a palette whose closest slot is 12 away from red
        let near = Color::new(240, 10, 0);
        let strict = engine(
            StubProvider::new(ProviderTag::Unsplash, &[Some(RED), Some(near)]),
            StubProvider::new(ProviderTag::Pexels, &[]),
            StubProvider::new(ProviderTag::Pixabay, &[]),
        );
        let request = MatchRequest {
            threshold: Some(10.0),
            ..MatchRequest::new("#ff0000")
        };

        let response = strict.run(&request).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.images[0].image.color, RED);

        let request = MatchRequest {
            threshold: Some(12.5),
            ..request
        };
        let response = strict.run(&request).await.unwrap();
        assert_eq!(response.total, 2);
        assert!((response.images[1].score - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_threshold() {
        let settings = MatchSettings::default();
        assert!((settings.resolve_threshold(None) - 80.0).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(5.0)) - 5.0).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(0.0))).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(900.0)) - 900.0).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(-3.0)) - 80.0).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(f64::NAN)) - 80.0).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(f64::INFINITY)) - 80.0).abs() < f64::EPSILON);
        assert!((settings.resolve_threshold(Some(42.5)) - 42.5).abs() < f64::EPSILON);

        let broken = MatchSettings {
            default_threshold: f64::NAN,
            ..MatchSettings::default()
        };
        assert!((broken.resolve_threshold(None) - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_query_text() {
        assert_eq!(query_text(RED, "color aesthetic"), "red color aesthetic");
        assert_eq!(query_text(Color::new(0, 0, 0), "  "), "black");
    }

    #[test]
    fn test_request_deserializes_optional_fields() {
        let request: MatchRequest = serde_json::from_str(r##"{"text":"#fff"}"##).unwrap();
        assert_eq!(request, MatchRequest::new("#fff"));
    }
}
