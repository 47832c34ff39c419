//! DirectorySyncer
//!
//! Pairs are processed one after another, and files within a pair in name
//! order. Nothing is retried: a failing file is counted as skipped and a
//! failing pair is reported, and the run carries on either way.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::file::sync_file;
use super::{RunStatistics, SyncObserver};
use crate::{Error, Result, SyncPair};

/// Extension of the files that take part in a sync
const LIBRARY_EXTENSION: &str = "md";

/// Options for a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// If true, classify and report without modifying the filesystem
    pub dry_run: bool,
    /// Copy an existing destination file to `<file>.bak` before overwriting it
    pub create_backup: bool,
    /// Report each file before it is checked
    pub verbose: bool,
    /// Produce unified diffs for updated files
    pub show_diff: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            create_backup: false,
            verbose: false,
            show_diff: true,
        }
    }
}

/// Syncs library categories into their destinations
#[derive(Debug, Clone, Default)]
pub struct DirectorySyncer {
    options: SyncOptions,
}

impl DirectorySyncer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Sync every pair and return the combined statistics.
    pub fn run(&self, pairs: &[SyncPair], observer: &mut dyn SyncObserver) -> RunStatistics {
        let mut stats = RunStatistics::default();
        for pair in pairs {
            let pair_stats = self.sync_pair(pair, observer);
            stats.merge(&pair_stats);
        }
        stats
    }

    /// Sync the top-level library files of a single pair.
    pub fn sync_pair(&self, pair: &SyncPair, observer: &mut dyn SyncObserver) -> RunStatistics {
        let mut stats = RunStatistics::default();
        observer.category_started(pair);

        if !pair.source.is_dir() {
            tracing::warn!(
                category = %pair.label,
                source = %pair.source.display(),
                "Source directory not found, skipping category"
            );
            observer.missing_source(pair);
            return stats;
        }

        if let Err(e) = self.ensure_destination(pair, observer) {
            tracing::warn!(category = %pair.label, error = %e, "Skipping category");
            observer.category_failed(pair, &e);
            return stats;
        }

        let files = match list_library_files(&pair.source) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(category = %pair.label, error = %e, "Skipping category");
                observer.category_failed(pair, &e);
                return stats;
            }
        };

        for file in files {
            let name = &file.name;
            tracing::debug!(category = %pair.label, file = %name, "checking");
            if self.options.verbose {
                observer.file_checking(pair, name);
            }

            let destination = pair.destination_file(&file.file_name);
            match sync_file(&file.path, &destination, name, &self.options) {
                Ok(outcome) => {
                    stats.record(outcome.classification);
                    observer.file_synced(pair, &outcome);
                }
                Err(e) => {
                    tracing::warn!(category = %pair.label, file = %name, error = %e, "Skipping file");
                    stats.record_skipped();
                    observer.file_failed(pair, name, &e);
                }
            }
        }

        stats
    }

    /// Create the destination directory unless it exists; dry-run only reports.
    fn ensure_destination(&self, pair: &SyncPair, observer: &mut dyn SyncObserver) -> Result<()> {
        if pair.destination.is_dir() {
            return Ok(());
        }

        if !self.options.dry_run {
            fs::create_dir_all(&pair.destination).map_err(|source| {
                Error::DestinationUnavailable {
                    path: pair.destination.clone(),
                    source,
                }
            })?;
            tracing::info!(destination = %pair.destination.display(), "Created destination directory");
        }

        observer.destination_created(pair, self.options.dry_run);
        Ok(())
    }
}

/// Sync `pairs` with `options`, reporting progress to `observer`.
pub fn run_sync(
    pairs: &[SyncPair],
    options: SyncOptions,
    observer: &mut dyn SyncObserver,
) -> RunStatistics {
    DirectorySyncer::new(options).run(pairs, observer)
}

/// A library file found directly inside a source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFile {
    /// File name for display, lossily decoded
    pub name: String,
    /// File name as stored on disk; destination paths are built from this
    pub file_name: OsString,
    /// Full source path
    pub path: PathBuf,
}

/// List the library files directly inside `dir`, sorted by name.
///
/// Only regular files (or symlinks to them) with an `.md` extension are
/// returned; subdirectories are not descended into.
pub fn list_library_files(dir: &Path) -> Result<Vec<LibraryFile>> {
    let unreadable = |source| Error::SourceUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        let is_library_file = path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(LIBRARY_EXTENSION);
        if !is_library_file {
            continue;
        }
        let file_name = entry.file_name();
        files.push(LibraryFile {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            path,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}
