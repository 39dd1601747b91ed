//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded for storage.
    #[error("Failed to serialize value for key '{key}'")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file could not replace the store file.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend refuses writes.
    #[error("Storage is unavailable: {reason}")]
    Unavailable { reason: String },

    /// A background write task did not complete.
    #[error("Storage task failed")]
    Task {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the session file at {}", operation, path.display())
            }
            Self::Serialization { key, .. } => {
                format!("Could not save '{key}'.")
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the session to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Unavailable { reason } => format!("Saved data is unavailable: {reason}"),
            Self::Task { .. } => "An internal error interrupted the save.".to_string(),
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
