//! Configuration management for mdv
//!
//! Configuration is an explicit value passed into the document pipeline by
//! the caller; there is no process-wide settings state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeVariant,
    pub zoom: f64,
    pub toc: TocConfig,
    #[cfg(feature = "watch")]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeVariant {
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub visible: bool,
    pub width: u16,
}

#[cfg(feature = "watch")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub enabled: bool,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::System,
            zoom: 100.0,
            toc: TocConfig::default(),
            #[cfg(feature = "watch")]
            watch: WatchConfig::default(),
        }
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            visible: false,
            width: 280,
        }
    }
}

#[cfg(feature = "watch")]
impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: crate::watch::DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdv")
            .map(|proj_dirs| proj_dirs.config_dir().join("mdv.toml"))
    }

    /// Load configuration from the platform config file, falling back to
    /// defaults when the file is missing
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeVariant::System);
        assert_eq!(config.zoom, 100.0);
        assert!(!config.toc.visible);
        assert_eq!(config.toc.width, 280);
        #[cfg(feature = "watch")]
        {
            assert!(config.watch.enabled);
            assert_eq!(config.watch.debounce_ms, 100);
        }
    }

    #[test]
    fn load_from_partial_file_keeps_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "theme = \"Dark\"\n\n[toc]\nvisible = true")?;
        file.flush()?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert!(config.toc.visible);
        // Unspecified fields take defaults
        assert_eq!(config.toc.width, 280);
        assert_eq!(config.zoom, 100.0);

        Ok(())
    }

    #[test]
    fn load_from_invalid_toml_fails() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "not valid [ toml")?;
        file.flush()?;

        assert!(Config::load_from(file.path()).is_err());

        Ok(())
    }

    #[test]
    fn config_round_trips_through_toml() -> Result<()> {
        let mut config = Config::default();
        config.theme = ThemeVariant::Light;
        config.zoom = 125.0;
        config.toc.width = 320;

        let serialized = toml::to_string(&config)?;
        let restored: Config = toml::from_str(&serialized)?;
        assert_eq!(restored.theme, ThemeVariant::Light);
        assert_eq!(restored.zoom, 125.0);
        assert_eq!(restored.toc.width, 320);

        Ok(())
    }
}
