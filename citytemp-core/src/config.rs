use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Geocoding language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// City shown by `citytemp show` when no argument is given.
    pub default_city: Option<String>,

    /// Language for geocoding results (affects place-name labels), e.g. "en" or "es".
    pub language: Option<String>,
}

impl Config {
    /// Default city, if one has been configured.
    pub fn default_city(&self) -> Option<&str> {
        self.default_city.as_deref().filter(|city| !city.is_empty())
    }

    /// Configured geocoding language, falling back to [`DEFAULT_LANGUAGE`].
    pub fn language(&self) -> &str {
        self.language
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn set_default_city(&mut self, city: Option<String>) {
        self.default_city = city.filter(|c| !c.is_empty());
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language.filter(|l| !l.is_empty());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citytemp", "citytemp-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
