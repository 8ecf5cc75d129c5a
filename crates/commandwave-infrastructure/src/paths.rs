//! Path resolution for CommandWave configuration files.

use commandwave_core::error::{CommandWaveError, Result};
use std::path::PathBuf;

/// Unified path management for CommandWave.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/commandwave/       # Config directory (XDG on Linux/macOS)
/// └── config.toml              # Application configuration
/// ```
pub struct CommandWavePaths;

impl CommandWavePaths {
    /// Returns the CommandWave configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the platform config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("commandwave"))
            .ok_or_else(|| CommandWaveError::config("cannot determine config directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
