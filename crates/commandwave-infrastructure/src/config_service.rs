//! Configuration loading and saving.

use crate::paths::CommandWavePaths;
use commandwave_core::config::AppConfig;
use commandwave_core::error::Result;
use std::fs;
use std::path::PathBuf;

/// Loads and saves `AppConfig` as TOML.
///
/// A missing file is not an error: it yields the default configuration, so
/// a fresh checkout works against a local backend without any setup.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a service over the default platform location
    /// (`~/.config/commandwave/config.toml` on Linux).
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(CommandWavePaths::config_file()?))
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {:?}, using defaults",
                self.path
            );
            return Ok(AppConfig::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Writes the configuration, creating parent directories as needed.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(config)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
