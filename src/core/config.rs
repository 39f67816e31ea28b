//! Application configuration management
//!
//! Handles loading application settings from `config.toml`:
//! - Avatar size and placement
//! - Color output
//! - API endpoint

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{GhfetchError, Result};

/// Environment variable that relocates the whole config directory
pub const CONFIG_DIR_ENV: &str = "GHFETCH_CONFIG_DIR";

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Avatar height in terminal rows
    pub image_height: u16,

    /// Columns between the avatar and the text block
    pub text_gap: u16,

    /// Whether to try drawing the avatar at all
    pub show_avatar: bool,

    /// Explicit path to the imgcat binary
    pub image_command: Option<PathBuf>,

    /// Colorize output
    pub color: bool,

    /// Offer interactive token setup when no token is stored
    pub prompt_for_token: bool,

    /// GitHub REST base URL
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_height: 15,
            text_gap: 6,
            show_avatar: true,
            image_command: None,
            color: true,
            prompt_for_token: true,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.image_height == 0 {
            return Err(GhfetchError::Config(
                "image_height must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the configuration directory
    ///
    /// `GHFETCH_CONFIG_DIR` takes precedence over the platform default.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let project_dirs = ProjectDirs::from("com", "ghfetch", "ghfetch")
            .ok_or_else(|| GhfetchError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Columns taken by the avatar plus the gap before the text
    pub fn text_column(&self) -> u16 {
        self.image_height.saturating_mul(2).saturating_add(self.text_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.image_height, 15);
        assert_eq!(config.text_gap, 6);
        assert!(config.show_avatar);
        assert!(config.color);
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.text_column(), 36);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("show_avatar = false\nimage_height = 10\n").unwrap();
        assert!(!config.show_avatar);
        assert_eq!(config.image_height, 10);
        assert_eq!(config.text_gap, 6);
        assert!(config.prompt_for_token);
    }

    #[test]
    fn test_image_command_path() {
        let config = Config::from_toml("image_command = \"/opt/bin/imgcat\"").unwrap();
        assert_eq!(config.image_command, Some(PathBuf::from("/opt/bin/imgcat")));
    }

    #[test]
    fn test_zero_image_height_rejected() {
        assert!(matches!(
            Config::from_toml("image_height = 0"),
            Err(GhfetchError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            Config::from_toml("color = \"maybe\""),
            Err(GhfetchError::Toml(_))
        ));
    }
}
