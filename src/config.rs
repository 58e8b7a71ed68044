//! Command-line configuration.
//!
//! ## Learning: Layered Settings
//!
//! Settings come from three layers, later ones winning:
//! 1. `Config::default()`
//! 2. `<config_dir>/pyliter/config.toml`, where `#[serde(default)]` fills in
//!    every key the file leaves out
//! 3. command-line flags, applied in `main`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use pyliter_render::LayoutOptions;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Style book name or path
    pub style: String,

    /// Output settings
    pub render: RenderConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pyliter").join("config.toml"))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: "default".to_string(),
            render: RenderConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix lines with zero-based line numbers
    pub line_numbers: bool,

    /// Drop the background color
    pub transparent: bool,

    /// First line to render, zero-based
    pub start_line: usize,

    /// Lines to render (0 = all lines)
    pub line_count: usize,

    /// Output format
    pub mode: OutputMode,
}

impl RenderConfig {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            start_line: self.start_line,
            line_count: self.line_count,
            line_numbers: self.line_numbers,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            transparent: false,
            start_line: 0,
            line_count: 10,
            mode: OutputMode::Ansi,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Escape-coded text for a terminal
    #[default]
    Ansi,
    /// Positioned runs as JSON
    Layout,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
