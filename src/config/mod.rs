//! Configuration management for launch-atlas.
//!
//! Configuration is read from `~/.config/launch-atlas/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod api;

pub use api::ApiConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub links: LinkConfig,
    pub store: StoreConfig,
}

/// Fallbacks used when a launch carries no link or image of its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Search endpoint; the mission query is appended as `q`
    pub fallback_search_url: String,
    pub placeholder_image_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            fallback_search_url: "https://www.google.com/search".to_string(),
            placeholder_image_url: "https://via.placeholder.com/150?text=No+Image".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database location; `None` means `<data_dir>/launch-atlas/launch-atlas.db`
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it when absent.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/launch-atlas/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("launch-atlas").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# launch-atlas configuration

[api]
# Upcoming launches endpoint (limit/offset are added per page)
base_url = "https://ll.thespacedevs.com/2.2.0/launch/upcoming/"

# Launches per page
page_size = 10

# Retries after a failed request, with a fixed pause between attempts
max_retries = 3
retry_delay_ms = 2000

# Per-request timeout in seconds
timeout_secs = 10

user_agent = "launch-atlas/0.1.0"

[links]
# Used when a launch has neither a video nor an info link
fallback_search_url = "https://www.google.com/search"

# Shown when a launch has no image
placeholder_image_url = "https://via.placeholder.com/150?text=No+Image"

[store]
# Liked launches database (default: <data dir>/launch-atlas/launch-atlas.db)
# path = "/path/to/launch-atlas.db"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
