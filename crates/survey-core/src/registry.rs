//! Survey registration.
//!
//! A survey's id is its 1-based position in the name-sorted file listing, so
//! the same input directory always yields the same ids.

use std::path::{Path, PathBuf};

use survey_ingest::list_files_with_extension;
use survey_model::{SourceFile, SurveyId};

use crate::error::Result;

/// Assigns sequential ids, starting at 1, in the order given.
pub fn register_surveys(paths: Vec<PathBuf>) -> Vec<SourceFile> {
    paths
        .into_iter()
        .zip(1u32..)
        .map(|(path, id)| SourceFile::new(SurveyId::new(id), path))
        .collect()
}

/// Lists the `extension` files in `input_dir` (sorted by name) and registers them.
///
/// A missing or unreadable directory is fatal.
pub fn discover_surveys(input_dir: &Path, extension: &str) -> Result<Vec<SourceFile>> {
    let paths = list_files_with_extension(input_dir, extension)?;
    Ok(register_surveys(paths))
}
