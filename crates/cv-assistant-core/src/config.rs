use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::DEFAULT_API_URL;
use crate::error::ConfigError;

/// Environment variable that overrides the answer endpoint
pub const API_URL_ENV: &str = "CV_ASSISTANT_API_URL";

/// Logical pixels per terminal column when mapping width to a viewport
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub cell_width_px: Option<u32>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the user config directory. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Endpoint to use: command line, then environment, then this file,
    /// then the built-in default
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        self.pick_api_url(cli_override, from_env.as_deref())
    }

    fn pick_api_url(&self, cli_override: Option<&str>, from_env: Option<&str>) -> String {
        // Blank values count as unset at every level
        let set = |url: &&str| !url.trim().is_empty();
        cli_override
            .filter(set)
            .or(from_env.filter(set))
            .or(self.api_url.as_deref().filter(set))
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    pub fn cell_width_px(&self) -> u32 {
        self.cell_width_px.unwrap_or(DEFAULT_CELL_WIDTH_PX).max(1)
    }

    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("cv-assistant"))
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}
