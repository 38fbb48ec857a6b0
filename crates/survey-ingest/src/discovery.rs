//! File discovery for survey export folders.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists regular files in `dir` whose extension matches `extension`
/// (case-insensitive, without the leading dot), sorted by filename.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if matches {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-survey file");
        }
    }

    // Sort by filename so survey ids do not depend on directory order
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
