//! Source/destination directory pairs

use std::fmt;
use std::path::{Path, PathBuf};

/// One category's source directory and the destination it is copied into.
///
/// Built once at start-up and never mutated during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    /// Directory inside the library whose top-level files are synced
    pub source: PathBuf,
    /// Directory the files are copied into
    pub destination: PathBuf,
    /// Category name shown to the operator (e.g. "agents")
    pub label: String,
}

impl SyncPair {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            label: label.into(),
        }
    }

    /// Path of `name` inside the source directory.
    pub fn source_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.source.join(name)
    }

    /// Path of `name` inside the destination directory.
    pub fn destination_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.destination.join(name)
    }
}

impl fmt::Display for SyncPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.label,
            self.source.display(),
            self.destination.display()
        )
    }
}
