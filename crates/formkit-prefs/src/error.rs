//! Preference error types.
//!
//! Loading never fails from the caller's point of view; these errors come
//! from the storage backends, from explicit `try_*` writes, and from
//! setters that reject malformed input.

use std::path::PathBuf;
use thiserror::Error;

/// Preference operation error.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// File I/O error in a file-backed store.
    #[error("Failed to {operation} preference file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete preference write")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be used as a storage name.
    #[error("Invalid preference key: {key:?}")]
    InvalidKey { key: String },

    /// Snapshot could not be serialized.
    #[error("Failed to serialize preferences")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Color string is not `#rgb` or `#rrggbb`.
    #[error("Invalid color: {value:?}")]
    InvalidColor { value: String },

    /// Mode is not `light` or `dark`.
    #[error("Invalid theme mode: {value:?}")]
    InvalidMode { value: String },

    /// No theme preset with this name.
    #[error("Unknown theme preset: {name}")]
    UnknownPreset { name: String },

    /// No share channel with this name.
    #[error("Unknown share channel: {name}")]
    UnknownChannel { name: String },
}

impl PrefsError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, .. } | Self::AtomicWriteFailed { target_path: path, .. } => {
                format!("Could not save your preferences to {}", path.display())
            }
            Self::InvalidKey { key } => format!("'{key}' is not a valid preference name"),
            Self::Serialization { .. } => "Your preferences could not be saved.".to_string(),
            Self::InvalidColor { value } => {
                format!("'{value}' is not a color. Use a hex value such as #4f46e5.")
            }
            Self::InvalidMode { value } => format!("'{value}' is not a mode. Use light or dark."),
            Self::UnknownPreset { name } => format!("There is no theme called '{name}'"),
            Self::UnknownChannel { name } => format!("'{name}' is not a sharing channel"),
        }
    }
}

/// Result type alias for preference operations.
pub type Result<T> = std::result::Result<T, PrefsError>;
