//! Progress hooks for a sync run

use super::FileSyncOutcome;
use crate::{Error, SyncPair};

/// Receives events as [`DirectorySyncer`](super::DirectorySyncer) works.
///
/// Events arrive in processing order, so an implementation can print them
/// inline. Every method defaults to doing nothing.
pub trait SyncObserver {
    /// A category is about to be processed
    fn category_started(&mut self, _pair: &SyncPair) {}

    /// The category's source directory does not exist; it is skipped
    fn missing_source(&mut self, _pair: &SyncPair) {}

    /// The destination directory was created (or, in dry-run, would be)
    fn destination_created(&mut self, _pair: &SyncPair, _dry_run: bool) {}

    /// The category could not be processed at all
    fn category_failed(&mut self, _pair: &SyncPair, _error: &Error) {}

    /// Emitted before each file when verbose output is enabled
    fn file_checking(&mut self, _pair: &SyncPair, _relative_name: &str) {}

    fn file_synced(&mut self, _pair: &SyncPair, _outcome: &FileSyncOutcome) {}

    /// The file was skipped because of an I/O error
    fn file_failed(&mut self, _pair: &SyncPair, _relative_name: &str, _error: &Error) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
