//! [`TestLibrary`] builder for sync scenarios.
//!
//! Lays out a temporary directory as
//!
//! ```text
//! <tmp>/library/<category>/*.md   source tree
//! <tmp>/dest/<category>/*.md      destination tree
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every file under a directory, keyed by path relative to it.
pub type TreeSnapshot = BTreeMap<PathBuf, Vec<u8>>;

/// A temporary library and destination with helpers for setup and assertion.
pub struct TestLibrary {
    dir: TempDir,
}

impl TestLibrary {
    /// Create an empty library; neither tree exists on disk yet.
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("TestLibrary: failed to create temp dir: {e}"));
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Library root (the source side).
    pub fn source_root(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    /// Destination root.
    pub fn dest_root(&self) -> PathBuf {
        self.dir.path().join("dest")
    }

    pub fn source_dir(&self, category: &str) -> PathBuf {
        self.source_root().join(category)
    }

    pub fn dest_dir(&self, category: &str) -> PathBuf {
        self.dest_root().join(category)
    }

    /// Write a library file, creating the category directory.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write_source(&self, category: &str, name: &str, content: impl AsRef<[u8]>) -> &Self {
        write_file(&self.source_dir(category).join(name), content.as_ref());
        self
    }

    /// Write a destination file, creating the category directory.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write_dest(&self, category: &str, name: &str, content: impl AsRef<[u8]>) -> &Self {
        write_file(&self.dest_dir(category).join(name), content.as_ref());
        self
    }

    /// Create an empty category directory in the library.
    pub fn create_category(&self, category: &str) -> &Self {
        let dir = self.source_dir(category);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("TestLibrary: failed to create {}: {e}", dir.display()));
        self
    }

    /// Read a destination file, `None` if it does not exist.
    pub fn read_dest(&self, category: &str, name: &str) -> Option<Vec<u8>> {
        fs::read(self.dest_dir(category).join(name)).ok()
    }

    /// Read a destination file as UTF-8.
    ///
    /// # Panics
    /// Panics if the file is missing or not UTF-8.
    pub fn read_dest_string(&self, category: &str, name: &str) -> String {
        let path = self.dest_dir(category).join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("TestLibrary: failed to read {}: {e}", path.display()))
    }

    /// Snapshot every file under the destination root.
    pub fn snapshot_dest(&self) -> TreeSnapshot {
        snapshot(&self.dest_root())
    }

    /// Snapshot every file under the library root.
    pub fn snapshot_source(&self) -> TreeSnapshot {
        snapshot(&self.source_root())
    }

    /// Assert that a destination file exists with exactly `content`.
    ///
    /// # Panics
    /// Panics with a readable message if the assertion fails.
    pub fn assert_dest_eq(&self, category: &str, name: &str, content: impl AsRef<[u8]>) {
        let path = self.dest_dir(category).join(name);
        let actual = fs::read(&path)
            .unwrap_or_else(|e| panic!("Expected {} to exist: {e}", path.display()));
        assert!(
            actual == content.as_ref(),
            "File {} does not hold the expected content.\nExpected: {:?}\nActual: {:?}",
            path.display(),
            String::from_utf8_lossy(content.as_ref()),
            String::from_utf8_lossy(&actual)
        );
    }
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("TestLibrary: failed to create {}: {e}", parent.display()));
    }
    fs::write(path, content)
        .unwrap_or_else(|e| panic!("TestLibrary: failed to write {}: {e}", path.display()));
}

fn snapshot(root: &Path) -> TreeSnapshot {
    let mut files = TreeSnapshot::new();
    collect(root, root, &mut files);
    files
}

fn collect(root: &Path, dir: &Path, files: &mut TreeSnapshot) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else if let Ok(bytes) = fs::read(&path) {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            files.insert(relative, bytes);
        }
    }
}
