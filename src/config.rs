/// Application settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/product-catalog/config.json
/// - macOS: ~/Library/Application Support/product-catalog/config.json
/// - Windows: %APPDATA%\product-catalog\config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIN_THUMBNAIL_SIZE: u32 = 32;
pub const MAX_THUMBNAIL_SIZE: u32 = 512;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 2] = [ThemeChoice::Dark, ThemeChoice::Light];

    pub fn theme(self) -> iced::Theme {
        match self {
            ThemeChoice::Dark => iced::Theme::Dark,
            ThemeChoice::Light => iced::Theme::Light,
        }
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Dark => f.write_str("Dark"),
            ThemeChoice::Light => f.write_str("Light"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeChoice,
    /// Edge length of preview thumbnails in pixels
    pub thumbnail_size: u32,
    /// Extensions offered by the image picker
    pub image_extensions: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Dark,
            thumbnail_size: 128,
            image_extensions: ["png", "jpg", "jpeg", "gif", "webp", "bmp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Default location of the settings file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push("product-catalog");
        path.push("config.json");
        Ok(path)
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.normalize();
        Ok(config)
    }

    /// Load from the default location, falling back to defaults on error
    pub fn load_or_default() -> (Self, Option<PathBuf>) {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "settings disabled");
                return (Self::default(), None);
            }
        };

        match Self::load(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable settings");
                (Self::default(), Some(path))
            }
        }
    }

    /// Write settings to `path`, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json).map_err(io_err)?;

        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Clamp out-of-range values
    pub fn normalize(&mut self) {
        self.thumbnail_size = self
            .thumbnail_size
            .clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE);
        if self.image_extensions.is_empty() {
            self.image_extensions = Self::default().image_extensions;
        }
    }
}
