//! SHA-256 fingerprints for change detection
//!
//! A single canonical format (`sha256:<hex>`) is used for every comparison.
//! Fingerprints only answer "did the bytes change"; they carry no security
//! meaning.

use sha2::{Digest, Sha256};
use std::fmt;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Content fingerprint in the canonical `sha256:<hex>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint an in-memory buffer.
    pub fn of(bytes: &[u8]) -> Self {
        Self(compute_bytes_checksum(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the SHA-256 checksum of a byte buffer.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}
