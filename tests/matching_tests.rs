//! End-to-end matching tests with in-process providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use swatchmatch::color::{distance, Color};
use swatchmatch::matching::{MatchEngine, MatchRequest, MatchSettings};
use swatchmatch::palette::derive;
use swatchmatch::providers::{
    Attribution, ImageProvider, ImageUrls, ProviderImage, ProviderTag, SearchQuery,
};

/// Provider returning a fixed set of images and counting calls.
struct FixedProvider {
    tag: ProviderTag,
    images: Vec<ProviderImage>,
    calls: Arc<AtomicUsize>,
}

impl FixedProvider {
    fn new(tag: ProviderTag, colors: &[Option<&str>]) -> Self {
        let images = colors
            .iter()
            .enumerate()
            .map(|(i, hex)| ProviderImage {
                id: format!("img{i}"),
                urls: ImageUrls {
                    thumb: format!("https://img.test/{tag}/{i}/thumb.jpg"),
                    small: format!("https://img.test/{tag}/{i}/small.jpg"),
                    regular: format!("https://img.test/{tag}/{i}/regular.jpg"),
                    full: format!("https://img.test/{tag}/{i}/full.jpg"),
                },
                attribution: Attribution {
                    photographer: format!("{tag} photographer {i}"),
                    photographer_url: format!("https://img.test/{tag}/users/{i}"),
                    source_url: format!("https://img.test/{tag}/photos/{i}"),
                },
                base_color: hex.map(|h| Color::from_hex(h).unwrap()),
                description: None,
                width: 1200,
                height: 800,
            })
            .collect();

        Self {
            tag,
            images,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl ImageProvider for FixedProvider {
    fn tag(&self) -> ProviderTag {
        self.tag
    }

    async fn search(&self, _query: &SearchQuery) -> Vec<ProviderImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.images.clone()
    }
}

#[tokio::test]
async fn test_every_match_is_within_threshold_of_some_swatch() {
    let unsplash = FixedProvider::new(
        ProviderTag::Unsplash,
        &[Some("#ff0000"), Some("#0000ff"), Some("#7f7f7f"), Some("#00ff00")],
    );
    let pexels = FixedProvider::new(
        ProviderTag::Pexels,
        &[Some("#e6194b"), Some("#101080"), Some("#ffe119"), None],
    );
    let pixabay = FixedProvider::new(ProviderTag::Pixabay, &[None, None]);

    let engine = MatchEngine::new(unsplash, pexels, pixabay, MatchSettings::default());
    let request = MatchRequest {
        text: "#ff0000 #0000ff".to_string(),
        page: None,
        threshold: Some(80.0),
    };

    let response = engine.run(&request).await.unwrap();

    assert!(!response.images.is_empty());
    for matched in &response.images {
        let palette = derive(matched.image.color);
        let best = palette
            .colors()
            .iter()
            .flat_map(|&c| response.swatches.iter().map(move |&s| distance(c, s)))
            .fold(f64::INFINITY, f64::min);
        assert!(best <= 80.0, "{} scored {best}", matched.image.id);
        assert!((best - matched.score).abs() < 1e-9);
    }
    assert!(response.images.windows(2).all(|w| w[0].score <= w[1].score));

    // Both exact swatches are present with a zero score.
    let zero: Vec<&str> = response
        .images
        .iter()
        .filter(|m| m.score == 0.0)
        .map(|m| m.image.id.as_str())
        .collect();
    assert_eq!(zero, ["unsplash-img0", "unsplash-img1"]);

    // Colorless images never appear.
    assert!(response.images.iter().all(|m| m.image.provider != ProviderTag::Pixabay));
    assert_eq!(response.provider_counts.pixabay, 2);
    assert_eq!(response.provider_counts.pexels, 4);
}

#[tokio::test]
async fn test_matched_images_carry_attribution_and_palette() {
    let engine = MatchEngine::new(
        FixedProvider::new(ProviderTag::Unsplash, &[]),
        FixedProvider::new(ProviderTag::Pexels, &[Some("#336699")]),
        FixedProvider::new(ProviderTag::Pixabay, &[]),
        MatchSettings::default(),
    );

    let response = engine.run(&MatchRequest::new("#336699")).await.unwrap();
    let image = &response.images[0].image;

    assert_eq!(image.id, "pexels-img0");
    assert_eq!(image.provider, ProviderTag::Pexels);
    assert_eq!(image.attribution.source_url, "https://img.test/pexels/photos/0");
    assert_eq!(image.dominant_colors, derive(Color::new(0x33, 0x66, 0x99)));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["images"][0]["id"], "pexels-img0");
    assert_eq!(json["images"][0]["score"], 0.0);
    assert_eq!(json["images"][0]["dominantColors"]["vibrant"], "#336699");
    assert_eq!(json["provider_counts"]["pexels"], 1);
}

#[tokio::test]
async fn test_invalid_input_contacts_no_provider() {
    let unsplash = FixedProvider::new(ProviderTag::Unsplash, &[Some("#ff0000")]);
    let pexels = FixedProvider::new(ProviderTag::Pexels, &[Some("#ff0000")]);
    let pixabay = FixedProvider::new(ProviderTag::Pixabay, &[]);
    let counters = [
        Arc::clone(&unsplash.calls),
        Arc::clone(&pexels.calls),
        Arc::clone(&pixabay.calls),
    ];

    let engine = MatchEngine::new(unsplash, pexels, pixabay, MatchSettings::default());
    assert!(engine.run(&MatchRequest::new("just words")).await.is_err());

    for counter in &counters {
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    engine.run(&MatchRequest::new("#ff0000")).await.unwrap();
    for counter in &counters {
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_configured_query_terms_are_used() {
    let settings = MatchSettings {
        query_terms: "minimal wallpaper".to_string(),
        ..MatchSettings::default()
    };
    let engine = MatchEngine::new(
        FixedProvider::new(ProviderTag::Unsplash, &[]),
        FixedProvider::new(ProviderTag::Pexels, &[]),
        FixedProvider::new(ProviderTag::Pixabay, &[]),
        settings,
    );

    let response = engine.run(&MatchRequest::new("#00ff00")).await.unwrap();
    assert_eq!(response.query, "green minimal wallpaper");
    assert_eq!(response.total, 0);
}
