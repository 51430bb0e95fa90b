//! Configuration management for Murmur
//!
//! Every section has defaults, so a partial (or empty) `config.toml` is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MURMUR_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: LocaleConfig,
    pub media: MediaConfig,
    pub composer: ComposerConfig,
    pub profile: ProfileConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Language selected at startup
    pub language: String,
    /// Language consulted when a key is missing from the active one
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Upper bound on a media-picker selection
    pub max_selection: usize,
}

/// Bounds for the post composer form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub title_min: usize,
    pub title_max: usize,
    pub body_max: usize,
}

/// Bounds for the profile editor form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub display_name_min: usize,
    pub display_name_max: usize,
    pub bio_max: usize,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            fallback: "en".to_string(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { max_selection: 10 }
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            title_min: 3,
            title_max: 120,
            body_max: 2000,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name_min: 2,
            display_name_max: 50,
            bio_max: 160,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce an unusable schema or store.
    pub fn validate(&self) -> Result<()> {
        if self.locale.language.trim().is_empty() {
            return Err(ConfigError::MissingField("locale.language".to_string()).into());
        }
        if self.locale.fallback.trim().is_empty() {
            return Err(ConfigError::MissingField("locale.fallback".to_string()).into());
        }
        if self.media.max_selection == 0 {
            return Err(invalid("media.max_selection", "must be at least 1"));
        }
        check_bounds(
            "composer.title",
            self.composer.title_min,
            self.composer.title_max,
        )?;
        if self.composer.body_max == 0 {
            return Err(invalid("composer.body_max", "must be at least 1"));
        }
        check_bounds(
            "profile.display_name",
            self.profile.display_name_min,
            self.profile.display_name_max,
        )?;
        if self.profile.bio_max == 0 {
            return Err(invalid("profile.bio_max", "must be at least 1"));
        }
        Ok(())
    }
}

fn check_bounds(prefix: &str, min: usize, max: usize) -> Result<()> {
    if max == 0 {
        return Err(invalid(&format!("{}_max", prefix), "must be at least 1"));
    }
    if min > max {
        return Err(invalid(
            &format!("{}_min", prefix),
            &format!("{} exceeds {}_max ({})", min, prefix, max),
        ));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> crate::error::MurmurError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("murmur").join("config.toml"))
}
