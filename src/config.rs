//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::live::gemini::GEMINI_API_BASE;
use crate::model::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use crate::session::DEFAULT_VARIATION_COUNT;

/// Environment variable holding the Gemini API key.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Model selection.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Provider endpoint.
    #[serde(default)]
    pub api: ApiConfig,

    /// Default parameter values (used when CLI flags are not given).
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("gemini", &self.gemini.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Model names or aliases.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Model for prompt enhancement and captions.
    pub text: String,
    /// Model for image generation, edits and variations.
    pub image: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self { text: DEFAULT_TEXT_MODEL.to_string(), image: DEFAULT_IMAGE_MODEL.to_string() }
    }
}

/// Provider endpoint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the `{model}:generateContent` path is appended to.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: GEMINI_API_BASE.to_string() }
    }
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Number of variations per batch.
    pub variation_count: usize,
    /// Pause between consecutive variation calls, in milliseconds.
    pub variation_delay_ms: u64,
    /// Output format for saved images.
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            variation_count: DEFAULT_VARIATION_COUNT,
            variation_delay_ms: 3000,
            format: "jpeg".to_string(),
        }
    }
}

impl DefaultsConfig {
    /// The inter-variation pause as a [`Duration`].
    #[must_use]
    pub fn variation_delay(&self) -> Duration {
        Duration::from_millis(self.variation_delay_ms)
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring the environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        key_from(std::env::var(GEMINI_KEY_ENV).ok(), self.keys.gemini.as_deref())
    }
}

fn key_from(env: Option<String>, file: Option<&str>) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or_else(|| file.map(str::to_string))
        .filter(|k| !k.trim().is_empty())
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `NAILSTUDIO_CONFIG` environment variable
/// 3. `~/.config/nailstudio/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("NAILSTUDIO_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/nailstudio/config.toml")
    } else {
        PathBuf::from("nailstudio.toml")
    }
}
