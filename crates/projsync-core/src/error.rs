//! Error types for projsync-core

use std::path::PathBuf;

/// Result type for projsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in projsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Settings file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Snapshot document could not be interpreted
    #[error("Invalid snapshot at {path}: {message}")]
    InvalidSnapshot { path: PathBuf, message: String },

    /// Writing a rendered artifact failed
    #[error("Failed to write artifact {path}: {reason}")]
    ArtifactWrite { path: String, reason: String },

    /// Project directory has no usable final component
    #[error("Cannot derive aggregate name from project directory {path}")]
    InvalidProjectDirectory { path: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from projsync-fs
    #[error(transparent)]
    Fs(#[from] projsync_fs::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
