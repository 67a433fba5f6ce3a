//! JSON persistence for [`Settings`]
//!
//! The store never fails a load: a missing or unreadable file yields the
//! defaults. Saving reports errors to the caller, who logs them.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::Settings;

/// Reads and writes the settings file at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the per-user platform location
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Settings {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No config file found, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read config file, using defaults");
                return Settings::default();
            }
        };

        match serde_json::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.validate_and_clamp();
                info!(path = %self.path.display(), image = %settings.image, duration = settings.duration, speed = settings.speed, "Loaded config");
                settings
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse config file, using defaults");
                Settings::default()
            }
        }
    }

    /// Overwrite the file with `settings` as compact JSON
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string(settings)
            .context("Failed to serialize config to JSON")?;
        fs::write(&self.path, contents)
            .context(format!("Failed to write config file to {}", self.path.display()))?;
        info!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
