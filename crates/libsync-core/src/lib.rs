//! Core sync engine for libsync
//!
//! Copies the Markdown documents of a content library (agents, commands,
//! skills) into the directories an assistant reads them from. The sync is
//! one-directional and driven purely by content fingerprints:
//!
//! - **Classification**: every top-level `*.md` file is NEW, UPDATED or UNCHANGED
//! - **Preview**: dry-run mode reports outcomes without touching the filesystem
//! - **Backups**: optional `.bak` copy of a destination file before overwrite
//! - **Diffs**: unified diffs of updated files for the operator
//!
//! # Architecture
//!
//! ```text
//!        libsync-cli
//!             |
//!       libsync-core   (config, DirectorySyncer, diff)
//!             |
//!        libsync-fs    (fingerprints, atomic writes, backups)
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod pair;
pub mod sync;

pub use config::{CONFIG_FILE, CategoryConfig, ConfigResolver, DEFAULT_CATEGORIES, LibraryConfig};
pub use diff::unified_diff;
pub use error::{Error, Result};
pub use pair::SyncPair;
pub use sync::{
    Classification, DirectorySyncer, FileAction, FileSyncOutcome, NoopObserver, RunStatistics,
    SyncObserver, SyncOptions, run_sync, sync_file,
};
