//! DirectorySyncer: one-directional, content-hash driven sync
//!
//! This module provides:
//! - **file**: classify and copy a single file ([`sync_file`])
//! - **engine**: walk every [`SyncPair`](crate::SyncPair) and fold the results ([`run_sync`])
//! - **observer**: progress hooks for the presentation layer
//! - **stats**: per-run counters

mod engine;
mod file;
mod observer;
mod stats;

pub use engine::{DirectorySyncer, LibraryFile, SyncOptions, list_library_files, run_sync};
pub use file::{Classification, FileAction, FileSyncOutcome, sync_file};
pub use observer::{NoopObserver, SyncObserver};
pub use stats::RunStatistics;
