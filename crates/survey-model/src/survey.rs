//! Registered survey export files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::SurveyId;

/// A registered survey export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub id: SurveyId,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(id: SurveyId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file, used as the survey's display name.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_base_name() {
        let file = SourceFile::new(SurveyId::new(1), "/data/exports/Webinar 2024.csv");
        assert_eq!(file.display_name(), "Webinar 2024.csv");
    }
}
