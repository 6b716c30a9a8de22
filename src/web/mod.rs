//! Web API module for swatchmatch.
//!
//! This module exposes color derivation, role assignment and multi-provider
//! image matching over a small JSON REST API.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/match` - Match stock images against colors found in text
//! - `GET /api/palette/{color}` - Derived palette, harmony and name for a color
//! - `POST /api/roles` - Contrast-aware role palette for a base color
//! - `GET /api/config` - Get current configuration
//! - `PUT /api/config` - Update configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::color::{harmony, normalize, Color, ColorName, Harmony};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::matching::{LiveMatchEngine, MatchRequest, MatchResponse};
use crate::palette::{derive, DerivedPalette};
use crate::roles::{assign_roles, Brightness, RolePalette, RoleSettings, Vibe};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<RwLock<Config>>,
    /// Where configuration updates are persisted
    config_path: PathBuf,
    /// Live provider fan-out
    engine: Arc<LiveMatchEngine>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config, config_path: PathBuf) -> anyhow::Result<Self> {
        let engine = LiveMatchEngine::from_config(&config)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
            engine: Arc::new(engine),
        })
    }

    /// Returns the path configuration updates are written to.
    #[must_use]
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Palette lookup response.
#[derive(Debug, Serialize)]
pub struct PaletteResponse {
    /// Normalized input color.
    pub color: Color,
    /// Nine-slot derived palette.
    pub palette: DerivedPalette,
    /// Color-wheel harmonies.
    pub harmony: Harmony,
    /// Coarse color name.
    pub name: ColorName,
}

/// Role assignment request.
#[derive(Debug, Deserialize)]
pub struct RolesRequest {
    /// Base color as hex.
    pub base: String,
    /// Defaults to minimal.
    #[serde(default)]
    pub vibe: Option<Vibe>,
    /// Defaults to light.
    #[serde(default)]
    pub brightness: Option<Brightness>,
    /// Defaults to the configured target ratio.
    #[serde(default)]
    pub target_ratio: Option<f64>,
}

/// Which providers have credentials available.
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    /// An Unsplash access key is set.
    pub unsplash: bool,
    /// A Pexels API key is set.
    pub pexels: bool,
    /// A Pixabay API key is set.
    pub pixabay: bool,
}

/// Configuration response. API keys are never included.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// Whether role assignment corrects contrast.
    pub correct_contrast: bool,
    /// Distance threshold used when a match request omits one.
    pub default_threshold: f64,
    /// Contrast target used when a roles request omits one.
    pub default_target_ratio: f64,
    /// Credential presence per provider.
    pub providers: CredentialStatus,
}

/// Configuration update request.
#[derive(Debug, Deserialize)]
pub struct ConfigUpdateRequest {
    /// New contrast correction preference.
    pub correct_contrast: bool,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn parse_color(input: &str) -> ApiResult<Color> {
    normalize(input).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "Invalid color",
                format!("'{input}' is not a 3 or 6 digit hex color"),
            )),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/match - Match provider images against colors in the request text.
async fn match_images(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> ApiResult<Json<MatchResponse>> {
    state.engine.run(&request).await.map(Json).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(e.to_string(), e.details())),
        )
    })
}

/// GET /api/palette/{color} - Derived palette for one color.
async fn get_palette(Path(color): Path<String>) -> ApiResult<Json<PaletteResponse>> {
    let color = parse_color(&color)?;

    Ok(Json(PaletteResponse {
        color,
        palette: derive(color),
        harmony: harmony(color),
        name: ColorName::of(color),
    }))
}

/// POST /api/roles - Role palette for a base color.
async fn create_roles(
    State(state): State<AppState>,
    Json(request): Json<RolesRequest>,
) -> ApiResult<Json<RolePalette>> {
    let base = parse_color(&request.base)?;
    let config = state.config();

    let settings = RoleSettings {
        vibe: request.vibe.unwrap_or_default(),
        brightness: request.brightness.unwrap_or_default(),
        target_ratio: request
            .target_ratio
            .unwrap_or(config.roles.default_target_ratio),
        correct_contrast: config.roles.correct_contrast,
        ..RoleSettings::new(base)
    };

    Ok(Json(assign_roles(&settings)))
}

/// GET /api/config - Get current configuration.
async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = state.config();

    Json(ConfigResponse {
        correct_contrast: config.roles.correct_contrast,
        default_threshold: config.matching.default_threshold,
        default_target_ratio: config.roles.default_target_ratio,
        providers: CredentialStatus {
            unsplash: config.providers.unsplash_key().is_some(),
            pexels: config.providers.pexels_key().is_some(),
            pixabay: config.providers.pixabay_key().is_some(),
        },
    })
}

/// PUT /api/config - Update configuration.
///
/// The preference is written on top of the file's current contents. A file
/// that exists but cannot be loaded is left alone and the request fails with
/// 409.
async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<ConfigUpdateRequest>,
) -> ApiResult<StatusCode> {
    // Guard spans both the load and the save
    let mut current = state.config.write().unwrap_or_else(PoisonError::into_inner);

    let mut on_disk = Config::load_from(&state.config_path).map_err(|e| {
        warn!("refusing to overwrite unreadable configuration: {e:#}");
        (
            StatusCode::CONFLICT,
            Json(ApiError::with_details(
                "Existing configuration could not be loaded",
                format!("{e:#}"),
            )),
        )
    })?;
    on_disk.roles.correct_contrast = request.correct_contrast;

    on_disk.save_to(&state.config_path).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to save configuration",
                format!("{e:#}"),
            )),
        )
    })?;

    current.roles.correct_contrast = request.correct_contrast;
    drop(current);
    info!("correct_contrast set to {}", request.correct_contrast);

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown routes.
async fn not_found() -> (StatusCode, Json<ApiError>) {
    (StatusCode::NOT_FOUND, Json(ApiError::new("Not found")))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server runs locally next to its frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/match", post(match_images))
        .route("/api/palette/{color}", get(get_palette))
        .route("/api/roles", post(create_roles))
        .route("/api/config", get(get_config).put(update_config))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `config_path` - File configuration updates are saved to
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, config_path: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config, config_path)?;
    let app = create_router(state);

    info!("Starting {} web server on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_accepts_hex_forms() {
        assert_eq!(parse_color("#FF0000").unwrap(), Color::new(255, 0, 0));
        assert_eq!(parse_color("0f0").unwrap(), Color::new(0, 255, 0));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        let (status, Json(error)) = parse_color("tomato").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error, "Invalid color");
        assert!(error.details.unwrap().contains("tomato"));
    }

    #[test]
    fn test_api_error_skips_empty_details() {
        let json = serde_json::to_value(ApiError::new("Not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Not found" }));
    }
}
