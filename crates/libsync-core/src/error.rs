//! Error types for libsync-core

use std::path::PathBuf;

/// Result type for libsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in libsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file is malformed or names an invalid category
    #[error("Invalid configuration at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// No home directory to derive the default destination from
    #[error("Could not determine the home directory; pass --dest explicitly")]
    MissingHome,

    /// Destination directory could not be created or is not a directory
    #[error("Destination directory {path} is unavailable: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source directory exists but cannot be listed
    #[error("Cannot list source directory {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from libsync-fs
    #[error(transparent)]
    Fs(#[from] libsync_fs::Error),
}
