//! Filesystem helpers.

use std::io;
use std::path::Path;

/// Report whether `path` exists.
///
/// A missing path is `Ok(false)`. Any other failure to stat the path (for
/// example a permission error on a parent directory) is returned so callers
/// can tell "absent" apart from "could not look".
///
/// # Errors
///
/// Returns the underlying I/O error for failures other than `NotFound`.
pub fn path_exists(path: &Path) -> io::Result<bool> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
