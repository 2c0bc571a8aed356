//! Non-recursive filesystem access for the upload directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Lists the names of regular files directly inside `dir`.
///
/// Subdirectories are not descended and are omitted from the listing. An
/// empty directory yields an empty vec, which is not an error; a missing or
/// non-directory path is.
pub fn list_filenames(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Filesystem {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut filenames = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Filesystem {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| Error::Filesystem {
            path: entry.path(),
            source,
        })?;
        if !file_type.is_file() {
            debug!(entry = ?entry.path(), "skipping non-file directory entry");
            continue;
        }
        filenames.push(entry.file_name().to_string_lossy().into_owned());
    }

    debug!(directory = ?dir, count = filenames.len(), "listed upload directory");
    Ok(filenames)
}

/// Reads a file's raw bytes.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}
