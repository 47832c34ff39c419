//! Single-file classification and copy

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use libsync_fs::Fingerprint;

use super::SyncOptions;
use crate::Result;
use crate::diff::unified_diff;

/// How a source file compares to its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Destination file does not exist
    New,
    /// Destination exists with different content
    Updated,
    /// Destination exists with identical content
    Unchanged,
}

impl Classification {
    /// Whether the destination needs to be written
    pub fn needs_write(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}

/// What was done to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Nothing to do
    None,
    /// Dry-run: the write was reported but not performed
    Previewed,
    Written,
    /// The previous destination was saved to `.bak`, then overwritten
    BackedUpAndWritten,
}

/// Result of syncing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSyncOutcome {
    pub relative_name: String,
    pub classification: Classification,
    pub action: FileAction,
    /// Set when a backup was written
    pub backup_path: Option<PathBuf>,
    /// Unified diff from the previous destination to the source, for updated
    /// files when diffs are enabled
    pub diff: Option<String>,
}

/// Sync one file from `source` to `destination`.
///
/// The destination is classified by comparing content fingerprints, then
/// written according to `options`. Exactly one of {no write, backup + write,
/// write} happens per call. Any I/O failure aborts this file only; a failed
/// backup leaves the destination untouched.
pub fn sync_file(
    source: &Path,
    destination: &Path,
    relative_name: &str,
    options: &SyncOptions,
) -> Result<FileSyncOutcome> {
    let source_bytes = libsync_fs::read_bytes(source)?;

    let existing = match fs::read(destination) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(libsync_fs::Error::io(destination, e).into()),
    };

    let classification = match &existing {
        None => Classification::New,
        Some(current) if Fingerprint::of(current) == Fingerprint::of(&source_bytes) => {
            Classification::Unchanged
        }
        Some(_) => Classification::Updated,
    };

    // Diff against the pre-write destination content
    let diff = match &existing {
        Some(current) if options.show_diff && classification == Classification::Updated => {
            Some(unified_diff(current, &source_bytes, relative_name))
        }
        _ => None,
    };

    let mut outcome = FileSyncOutcome {
        relative_name: relative_name.to_string(),
        classification,
        action: FileAction::None,
        backup_path: None,
        diff,
    };

    if !classification.needs_write() {
        return Ok(outcome);
    }

    if options.dry_run {
        tracing::debug!(file = relative_name, %classification, "Dry run, not writing");
        outcome.action = FileAction::Previewed;
        return Ok(outcome);
    }

    if options.create_backup && existing.is_some() {
        outcome.backup_path = Some(libsync_fs::write_backup(destination)?);
    }

    libsync_fs::write_atomic(destination, &source_bytes)?;
    tracing::info!(
        file = relative_name,
        destination = %destination.display(),
        %classification,
        "Wrote file"
    );

    outcome.action = if outcome.backup_path.is_some() {
        FileAction::BackedUpAndWritten
    } else {
        FileAction::Written
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        source: PathBuf,
        destination: PathBuf,
    }

    fn fixture(source: &str, destination: Option<&str>) -> Fixture {
        let dir = TempDir::new().unwrap();
        let source_path = dir.path().join("src.md");
        let destination_path = dir.path().join("dst.md");
        fs::write(&source_path, source).unwrap();
        if let Some(content) = destination {
            fs::write(&destination_path, content).unwrap();
        }
        Fixture {
            _dir: dir,
            source: source_path,
            destination: destination_path,
        }
    }

    #[test]
    fn missing_destination_is_new_and_written() {
        let f = fixture("X", None);

        let outcome = sync_file(&f.source, &f.destination, "a.md", &SyncOptions::default()).unwrap();

        assert_eq!(outcome.classification, Classification::New);
        assert_eq!(outcome.action, FileAction::Written);
        assert_eq!(outcome.diff, None);
        assert_eq!(fs::read_to_string(&f.destination).unwrap(), "X");
    }

    #[test]
    fn identical_destination_is_unchanged() {
        let f = fixture("same", Some("same"));

        let outcome = sync_file(&f.source, &f.destination, "a.md", &SyncOptions::default()).unwrap();

        assert_eq!(outcome.classification, Classification::Unchanged);
        assert_eq!(outcome.action, FileAction::None);
        assert_eq!(outcome.diff, None);
    }

    #[test]
    fn differing_destination_is_updated_with_diff() {
        let f = fixture("X2\n", Some("X\n"));

        let outcome = sync_file(&f.source, &f.destination, "a.md", &SyncOptions::default()).unwrap();

        assert_eq!(outcome.classification, Classification::Updated);
        assert_eq!(outcome.action, FileAction::Written);
        let diff = outcome.diff.unwrap();
        assert!(diff.contains("-X\n"), "got:\n{diff}");
        assert!(diff.contains("+X2\n"), "got:\n{diff}");
        assert_eq!(fs::read_to_string(&f.destination).unwrap(), "X2\n");
    }

    #[test]
    fn diff_suppressed_when_disabled() {
        let f = fixture("new\n", Some("old\n"));
        let options = SyncOptions {
            show_diff: false,
            ..SyncOptions::default()
        };

        let outcome = sync_file(&f.source, &f.destination, "a.md", &options).unwrap();
        assert_eq!(outcome.diff, None);
    }

    #[test]
    fn dry_run_previews_without_writing() {
        let f = fixture("new", Some("old"));
        let options = SyncOptions {
            dry_run: true,
            create_backup: true,
            ..SyncOptions::default()
        };

        let outcome = sync_file(&f.source, &f.destination, "a.md", &options).unwrap();

        assert_eq!(outcome.classification, Classification::Updated);
        assert_eq!(outcome.action, FileAction::Previewed);
        assert_eq!(outcome.backup_path, None);
        assert_eq!(fs::read_to_string(&f.destination).unwrap(), "old");
        assert!(!libsync_fs::backup_path(&f.destination).exists());
    }

    #[test]
    fn backup_holds_previous_content() {
        let f = fixture("new", Some("old"));
        let options = SyncOptions {
            create_backup: true,
            ..SyncOptions::default()
        };

        let outcome = sync_file(&f.source, &f.destination, "a.md", &options).unwrap();

        assert_eq!(outcome.action, FileAction::BackedUpAndWritten);
        let backup = outcome.backup_path.unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "old");
        assert_eq!(fs::read_to_string(&f.destination).unwrap(), "new");
    }

    #[test]
    fn backup_skipped_for_new_files() {
        let f = fixture("new", None);
        let options = SyncOptions {
            create_backup: true,
            ..SyncOptions::default()
        };

        let outcome = sync_file(&f.source, &f.destination, "a.md", &options).unwrap();

        assert_eq!(outcome.action, FileAction::Written);
        assert!(!libsync_fs::backup_path(&f.destination).exists());
    }

    #[test]
    fn failed_backup_leaves_destination_untouched() {
        let f = fixture("new", Some("old"));
        fs::create_dir(libsync_fs::backup_path(&f.destination)).unwrap();
        let options = SyncOptions {
            create_backup: true,
            ..SyncOptions::default()
        };

        let err = sync_file(&f.source, &f.destination, "a.md", &options).unwrap_err();

        assert!(matches!(err, crate::Error::Fs(libsync_fs::Error::Backup { .. })));
        assert_eq!(fs::read_to_string(&f.destination).unwrap(), "old");
    }

    #[test]
    fn unreadable_source_is_error() {
        let f = fixture("x", None);
        fs::remove_file(&f.source).unwrap();

        let err = sync_file(&f.source, &f.destination, "a.md", &SyncOptions::default()).unwrap_err();

        assert!(err.to_string().contains("src.md"), "got: {err}");
        assert!(!f.destination.exists());
    }

    #[test]
    fn destination_directory_in_place_of_file_is_error() {
        let f = fixture("x", None);
        fs::create_dir(&f.destination).unwrap();

        assert!(sync_file(&f.source, &f.destination, "a.md", &SyncOptions::default()).is_err());
    }
}
