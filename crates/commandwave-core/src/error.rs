//! Error types for the CommandWave controller core.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the CommandWave crates.
///
/// The session store and the substitution engine only ever produce the three
/// local variants (`InvalidVariableName`, `NotFound`, `TypeMismatch`); the
/// remaining variants belong to the gateway and configuration layers. All of
/// them are recoverable conditions: the caller surfaces a message and aborts
/// the single operation that failed.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CommandWaveError {
    /// A variable name that is not one of the recognized slots.
    #[error("Unrecognized variable slot '{name}'")]
    InvalidVariableName { name: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An edit was attempted on a block that is not a code block.
    #[error("Block {index} of playbook '{filename}' is not a code block")]
    TypeMismatch { filename: String, index: usize },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Backend API error (non-2xx response or transport failure)
    #[error("API error: {message}")]
    Api { status: Option<u16>, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandWaveError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidVariableName error
    pub fn invalid_variable_name(name: impl Into<String>) -> Self {
        Self::InvalidVariableName { name: name.into() }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a TypeMismatch error
    pub fn type_mismatch(filename: impl Into<String>, index: usize) -> Self {
        Self::TypeMismatch {
            filename: filename.into(),
            index,
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an API error with an HTTP status
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an API error without an HTTP status (transport-level failure)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidVariableName error
    pub fn is_invalid_variable_name(&self) -> bool {
        matches!(self, Self::InvalidVariableName { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a TypeMismatch error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an API error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns the HTTP status for API errors, if one was received.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CommandWaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CommandWaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CommandWaveError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CommandWaveError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CommandWaveError>`.
pub type Result<T> = std::result::Result<T, CommandWaveError>;
