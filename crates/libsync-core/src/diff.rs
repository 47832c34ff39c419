//! Unified diffs for updated files
//!
//! Diffs are presentation only: they are rendered for the operator and never
//! parsed back. Line diffing uses the `similar` crate's Myers implementation.

use similar::TextDiff;

/// Lines of unchanged context around each hunk
pub const CONTEXT_LINES: usize = 3;

/// Render a unified diff from `old` to `new`, labelled `a/<name>` and `b/<name>`.
///
/// Bytes that are not valid UTF-8 are replaced, so binary content still
/// produces a (lossy) diff instead of an error. Returns an empty string when
/// the contents are identical.
pub fn unified_diff(old: &[u8], new: &[u8], name: &str) -> String {
    let old = String::from_utf8_lossy(old);
    let new = String::from_utf8_lossy(new);
    if old == new {
        return String::new();
    }

    let old_header = format!("a/{}", name);
    let new_header = format!("b/{}", name);

    TextDiff::from_lines(old.as_ref(), new.as_ref())
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&old_header, &new_header)
        .to_string()
}
