//! Runtime configuration.
//!
//! Values come from `AUDIOBIND_*` environment variables or a TOML file.
//! Every field has a default, so an empty environment is a valid config.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_FILEBIN_URL: &str = "https://filebin.net/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base endpoint of the file host sounds are uploaded to.
    pub filebin_url: String,
    /// Audible radius of a music disc without an explicit range.
    pub music_disc_range: f32,
    pub max_music_disc_range: f32,
    /// Audible radius of a goat horn without an explicit range.
    pub goat_horn_range: f32,
    pub max_goat_horn_range: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filebin_url: DEFAULT_FILEBIN_URL.to_string(),
            music_disc_range: 65.0,
            max_music_disc_range: 256.0,
            goat_horn_range: 256.0,
            max_goat_horn_range: 512.0,
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            filebin_url: env::var("AUDIOBIND_FILEBIN_URL").unwrap_or(defaults.filebin_url),
            music_disc_range: env_f32("AUDIOBIND_MUSIC_DISC_RANGE", defaults.music_disc_range),
            max_music_disc_range: env_f32(
                "AUDIOBIND_MAX_MUSIC_DISC_RANGE",
                defaults.max_music_disc_range,
            ),
            goat_horn_range: env_f32("AUDIOBIND_GOAT_HORN_RANGE", defaults.goat_horn_range),
            max_goat_horn_range: env_f32(
                "AUDIOBIND_MAX_GOAT_HORN_RANGE",
                defaults.max_goat_horn_range,
            ),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.filebin_url).map_err(|e| {
            ConfigError::Invalid(format!("filebin_url '{}': {e}", self.filebin_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "filebin_url must be http(s), got '{}'",
                parsed.scheme()
            )));
        }

        let ranges = [
            ("music_disc_range", self.music_disc_range),
            ("max_music_disc_range", self.max_music_disc_range),
            ("goat_horn_range", self.goat_horn_range),
            ("max_goat_horn_range", self.max_goat_horn_range),
        ];
        for (name, value) in ranges {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.music_disc_range > self.max_music_disc_range {
            return Err(ConfigError::Invalid(
                "music_disc_range exceeds max_music_disc_range".into(),
            ));
        }
        if self.goat_horn_range > self.max_goat_horn_range {
            return Err(ConfigError::Invalid(
                "goat_horn_range exceeds max_goat_horn_range".into(),
            ));
        }
        Ok(())
    }
}
