//! Whole-file I/O: reads, atomic writes with locking, and `.bak` backups

use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Suffix appended to a file name to form its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Read a file's bytes, tagging failures with the path.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a reader never observes a partially
/// written file. The parent directory must already exist.
///
/// A symlinked `path` is written through: the file the link points at is
/// replaced and the link itself is kept. Permissions of an existing file
/// carry over to the new content.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_target(path)?;
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(&temp_name);

    let result = write_locked(&temp_path, &target, content, permissions)
        .and_then(|()| fs::rename(&temp_path, &target).map_err(|e| Error::io(&target, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// The file a write to `path` should land in, following a symlink.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            // Dangling link: create the file it names
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let link = fs::read_link(path).map_err(|e| Error::io(path, e))?;
                Ok(match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                })
            }
            Err(e) => Err(Error::io(path, e)),
        },
        _ => Ok(path.to_path_buf()),
    }
}

fn write_locked(
    temp_path: &Path,
    target: &Path,
    content: &[u8],
    permissions: Option<Permissions>,
) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    if let Some(permissions) = permissions {
        temp_file
            .set_permissions(permissions)
            .map_err(|e| Error::io(temp_path, e))?;
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(())
}

/// Path of the backup for `path`: the same file name with `.bak` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Copy `path` to its `.bak` sibling, replacing any previous backup.
///
/// Returns the backup path.
pub fn write_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|source| Error::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(file = %path.display(), backup = %backup.display(), "Wrote backup");
    Ok(backup)
}
