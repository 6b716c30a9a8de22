//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::color::MAX_DISTANCE;

/// Environment variable overriding the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "SWATCHMATCH_CONFIG_DIR";

/// Environment variable that takes precedence over the configured Unsplash key.
pub const UNSPLASH_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";
/// Environment variable that takes precedence over the configured Pexels key.
pub const PEXELS_KEY_ENV: &str = "PEXELS_API_KEY";
/// Environment variable that takes precedence over the configured Pixabay key.
pub const PIXABAY_KEY_ENV: &str = "PIXABAY_API_KEY";

/// Default color-distance threshold for matching.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Default minimum contrast ratio (WCAG AA body text).
pub const DEFAULT_TARGET_RATIO: f64 = 4.5;

/// Image provider credentials and request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Unsplash access key (overridden by `UNSPLASH_ACCESS_KEY`)
    pub unsplash_access_key: Option<String>,
    /// Pexels API key (overridden by `PEXELS_API_KEY`)
    pub pexels_api_key: Option<String>,
    /// Pixabay API key (overridden by `PIXABAY_API_KEY`)
    pub pixabay_api_key: Option<String>,
    /// Images requested from each provider per page
    pub per_page: u32,
    /// Per-provider request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            unsplash_access_key: None,
            pexels_api_key: None,
            pixabay_api_key: None,
            per_page: 20,
            timeout_secs: 10,
        }
    }
}

impl ProviderConfig {
    /// Effective Unsplash key: environment first, then config file.
    #[must_use]
    pub fn unsplash_key(&self) -> Option<String> {
        credential(UNSPLASH_KEY_ENV, self.unsplash_access_key.as_ref())
    }

    /// Effective Pexels key: environment first, then config file.
    #[must_use]
    pub fn pexels_key(&self) -> Option<String> {
        credential(PEXELS_KEY_ENV, self.pexels_api_key.as_ref())
    }

    /// Effective Pixabay key: environment first, then config file.
    #[must_use]
    pub fn pixabay_key(&self) -> Option<String> {
        credential(PIXABAY_KEY_ENV, self.pixabay_api_key.as_ref())
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn credential(env_var: &str, configured: Option<&String>) -> Option<String> {
    dotenvy::var(env_var)
        .ok()
        .or_else(|| configured.cloned())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Image matching defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Distance threshold used when a request does not specify one
    pub default_threshold: f64,
    /// Descriptive terms appended to the color name in search queries
    pub query_terms: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            query_terms: "color aesthetic".to_string(),
        }
    }
}

/// Role palette defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Run contrast correction on accent and text roles
    pub correct_contrast: bool,
    /// Target ratio used when a request does not specify one
    pub default_target_ratio: f64,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            correct_contrast: true,
            default_target_ratio: DEFAULT_TARGET_RATIO,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/swatchmatch/config.toml`
/// - macOS: `~/Library/Application Support/swatchmatch/config.toml`
/// - Windows: `%APPDATA%\swatchmatch\config.toml`
///
/// `SWATCHMATCH_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `per_page` and `timeout_secs` must be non-zero
/// - `default_threshold` must lie within the RGB distance range
/// - `default_target_ratio` must lie within 1.0-21.0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Image provider settings
    #[serde(default)]
    pub providers: ProviderConfig,
    /// Matching defaults
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Role palette defaults
    #[serde(default)]
    pub roles: RoleConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = dotenvy::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("swatchmatch");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path, defaulting when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .context(format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path)
            .context(format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.providers.per_page == 0 {
            anyhow::bail!("providers.per_page must be at least 1");
        }

        if self.providers.timeout_secs == 0 {
            anyhow::bail!("providers.timeout_secs must be at least 1");
        }

        let threshold = self.matching.default_threshold;
        if !(0.0..=MAX_DISTANCE).contains(&threshold) {
            anyhow::bail!(
                "matching.default_threshold must be between 0 and {MAX_DISTANCE:.2}, got {threshold}"
            );
        }

        let ratio = self.roles.default_target_ratio;
        if !(1.0..=21.0).contains(&ratio) {
            anyhow::bail!("roles.default_target_ratio must be between 1.0 and 21.0, got {ratio}");
        }

        Ok(())
    }
}
