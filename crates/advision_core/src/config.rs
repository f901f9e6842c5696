//! Layered TOML configuration.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from advision.toml)
//! - User overrides (~/.config/advision/advision.toml, then ./advision.toml)
//! - Automatic merging with user values taking precedence

use crate::{AspectRatio, DEFAULT_TONE};
use advision_error::{AdvisionError, AdvisionResult, ConfigError};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Gemini endpoint and model selection.
///
/// ```toml
/// [gemini]
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// script_model = "gemini-3-pro-preview"
/// image_model = "gemini-2.5-flash-image"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct GeminiConfig {
    /// REST API root, without a trailing slash
    base_url: String,
    /// Text model used for script generation
    script_model: String,
    /// Image model used for frame rendering
    image_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            script_model: "gemini-3-pro-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
        }
    }
}

impl GeminiConfig {
    /// Point the client at a different API root (e.g. a local proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Storyboard defaults applied when the user leaves a field blank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct StoryboardConfig {
    /// Tone used when the brief leaves it blank
    default_tone: String,
    /// Aspect ratio requested for every frame
    aspect_ratio: AspectRatio,
}

impl StoryboardConfig {
    /// The given tone, or the configured default when it is missing or blank.
    pub fn tone_or_default(&self, tone: Option<&str>) -> String {
        match tone.map(str::trim) {
            Some(tone) if !tone.is_empty() => tone.to_string(),
            _ => self.default_tone.clone(),
        }
    }
}

impl Default for StoryboardConfig {
    fn default() -> Self {
        Self {
            default_tone: DEFAULT_TONE.to_string(),
            aspect_ratio: AspectRatio::default(),
        }
    }
}

/// Top-level AdVision configuration.
///
/// # Example
///
/// ```no_run
/// use advision_core::AdvisionConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AdvisionConfig::load()?;
/// println!("Image model: {}", config.gemini().image_model());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, derive_getters::Getters,
)]
pub struct AdvisionConfig {
    /// Provider settings
    #[serde(default)]
    gemini: GeminiConfig,
    /// Storyboard defaults
    #[serde(default)]
    storyboard: StoryboardConfig,
}

impl AdvisionConfig {
    /// Bundled default configuration.
    const DEFAULT_CONFIG: &'static str = include_str!("../../../advision.toml");

    /// Load configuration from a specific file path, layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AdvisionResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml));

        Self::finish(builder)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (advision.toml shipped with the library)
    /// 2. User config in home directory (~/.config/advision/advision.toml)
    /// 3. User config in current directory (./advision.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> AdvisionResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = Config::builder()
            .add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/advision/advision.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("advision").required(false));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AdvisionResult<Self> {
        builder
            .build()
            .map_err(|e| {
                AdvisionError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AdvisionError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Replace the Gemini section.
    pub fn with_gemini(mut self, gemini: GeminiConfig) -> Self {
        self.gemini = gemini;
        self
    }

    /// Override the tone used when a brief leaves it blank.
    pub fn with_default_tone(mut self, tone: impl Into<String>) -> Self {
        self.storyboard.default_tone = tone.into();
        self
    }

    /// Override the aspect ratio requested for every frame.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.storyboard.aspect_ratio = aspect_ratio;
        self
    }
}
