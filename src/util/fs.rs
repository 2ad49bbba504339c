//! Filesystem helpers for target files.
//!
//! Unlike a general-purpose writer these never create directories: a target
//! that does not exist is skipped, not invented.

use std::fs;
use std::path::Path;

use crate::error::SyncError;

/// Read an existing target.
pub fn read_target(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite an existing target.
pub fn write_target(path: &Path, contents: &str) -> Result<(), SyncError> {
    fs::write(path, contents).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}
