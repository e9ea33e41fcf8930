//! Shared utility functions.

use std::io;
use std::path::Path;

/// Recursively remove a directory. A directory that does not exist is not an
/// error; every other failure is returned.
///
/// Returns whether anything was removed.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove a file, ignoring only "not found".
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
