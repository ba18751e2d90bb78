// SPDX-License-Identifier: GPL-3.0-or-later

//! Enumeration of artist directories in a music library root.
//!
//! Each immediate subdirectory of the library root counts as one canonical
//! artist name. The listing is the read-only candidate set for the matcher
//! and is sorted so downstream tie-breaks are deterministic.

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("library root is not a directory: {0}")]
    NotADirectory(String),
    #[error("I/O error: {0}")]
    Io(String),
}

/// List the names of all immediate subdirectories of `root`.
///
/// Symlinks that resolve to directories are kept. Entries whose names are
/// not valid UTF-8 are skipped with a warning. The result is sorted
/// lexicographically and may be empty for a library with no artists yet;
/// callers must check for that before matching against it.
pub fn list_artist_directories(root: impl AsRef<Path>) -> Result<Vec<String>, LibraryError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(LibraryError::NotADirectory(root.display().to_string()));
    }

    let entries = fs::read_dir(root).map_err(|err| LibraryError::Io(err.to_string()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| LibraryError::Io(err.to_string()))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                warn!(target: "library", ?raw, "skipping non-UTF-8 directory name");
            }
        }
    }

    names.sort();
    debug!(target: "library", root = %root.display(), count = names.len(), "listed artist directories");
    Ok(names)
}
