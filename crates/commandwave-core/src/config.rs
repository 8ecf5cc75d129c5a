//! Application configuration model.
//!
//! Loaded from `config.toml` under the platform config directory by the
//! infrastructure layer; every field has a default so a missing file yields
//! a working configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

/// Where the CommandWave backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Terminal-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Port of the main terminal's ttyd instance. Dynamically created tabs
    /// get their port from the backend at creation time.
    #[serde(default = "default_initial_port")]
    pub initial_port: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            initial_port: default_initial_port(),
        }
    }
}

fn default_initial_port() -> u16 {
    7681
}

/// Notes autosave settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Quiet period before a pending notes edit is written to the backend.
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            autosave_ms: default_autosave_ms(),
        }
    }
}

fn default_autosave_ms() -> u64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.terminal.initial_port, 7681);
        assert_eq!(config.notes.autosave_ms, 1500);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            base_url = "http://10.0.0.2:5000"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.terminal.initial_port, 7681);
        assert_eq!(config.notes.autosave_ms, 1500);
    }
}
