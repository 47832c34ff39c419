//! Filesystem primitives for libsync
//!
//! Content fingerprints for change detection, atomic whole-file writes and
//! `.bak` backups. Nothing here knows about categories or sync policy.

pub mod checksum;
pub mod error;
pub mod io;

pub use checksum::{Fingerprint, compute_bytes_checksum};
pub use error::{Error, Result};
pub use io::{backup_path, read_bytes, write_atomic, write_backup};
