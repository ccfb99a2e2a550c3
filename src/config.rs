//! Configuration management
//!
//! Loads `config.toml` from the user config directory. Every field has a
//! default, so a missing file or a partial file both work.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::channel::OriginPolicy;

/// Source played when neither the command line nor the host supplies one.
pub const DEFAULT_SOURCE: &str = "https://assets.codepen.io/296057/fem-bombshell.mp3";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub host: HostConfig,
    pub logging: LoggingConfig,
}

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Source loaded at mount
    pub default_source: String,
    /// Native loop hint passed to the transport
    pub loop_hint: bool,
    /// Progress refresh interval in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_source: DEFAULT_SOURCE.to_string(),
            loop_hint: true,
            frame_interval_ms: 16,
        }
    }
}

/// Host channel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Delay between mount and the ready signal, in milliseconds
    pub ready_delay_ms: u64,
    /// Origin allowed to drive the widget (`*` for any)
    pub allowed_origin: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            ready_delay_ms: 500,
            allowed_origin: "*".to_string(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path; empty disables file logging
    pub file: String,
}

impl Config {
    /// Path of the config file: `<config_dir>/tuneframe/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("tuneframe").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from a specific path, falling back to defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.player.frame_interval_ms.max(1))
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.host.ready_delay_ms)
    }

    pub fn origin_policy(&self) -> OriginPolicy {
        OriginPolicy::parse(&self.host.allowed_origin)
    }

    /// Log file, if one is configured.
    pub fn log_file(&self) -> Option<PathBuf> {
        let file = self.logging.file.trim();
        (!file.is_empty()).then(|| PathBuf::from(file))
    }
}
