//! Configuration management for CVPlayer
//!
//! This module handles loading and managing application configuration
//! from the user config file and environment variables.

use crate::utils::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Playback configuration
    pub playback: PlaybackConfig,

    /// Terminal configuration
    pub terminal: TerminalConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Restart from the first frame after the last one
    pub looping: bool,

    /// Start playing immediately instead of paused
    pub autoplay: bool,
}

/// Terminal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Use the color palette (disable for monochrome terminals)
    pub color: bool,

    /// Show the info/control panel on startup
    pub show_panel: bool,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            terminal: TerminalConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            looping: true,
            autoplay: false,
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_panel: true,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            // The terminal belongs to the renderer while a session runs,
            // so anything below warn would scribble over the picture.
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// Configuration is loaded in the following order (later sources
    /// override earlier):
    /// 1. Default values
    /// 2. User config file (~/.config/cvplayer/config.toml on Linux)
    /// 3. Environment variables (CVPLAYER_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                let contents = std::fs::read_to_string(&user_path)
                    .map_err(|e| PlayerError::Config(format!("Failed to read config file: {}", e)))?;
                config = toml::from_str(&contents)
                    .map_err(|e| PlayerError::Config(format!("Failed to parse config file: {}", e)))?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| PlayerError::Config("Cannot determine user config path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlayerError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| PlayerError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, toml)
            .map_err(|e| PlayerError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(log_level) = std::env::var("CVPLAYER_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        if let Ok(color) = std::env::var("CVPLAYER_COLOR") {
            self.terminal.color = match color.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(PlayerError::Config("Invalid CVPLAYER_COLOR".to_string())),
            };
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(PlayerError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cvplayer").join("config.toml"))
    }
}
