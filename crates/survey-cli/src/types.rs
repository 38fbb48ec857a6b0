use std::path::PathBuf;

use serde::Serialize;
use survey_model::{Diagnostics, TableKind};

/// Exit status when a run completes but recorded issues.
pub const EXIT_WITH_ISSUES: i32 = 2;
/// Exit status for fatal errors.
pub const EXIT_FATAL: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkStatus {
    Loaded,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub table: TableKind,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<SinkStatus>,
}

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub surveys: usize,
    pub loaded_surveys: usize,
    pub tables: Vec<TableSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    pub diagnostics: Diagnostics,
    pub has_errors: bool,
}

impl RunResult {
    pub fn exit_code(&self) -> i32 {
        if self.has_errors { EXIT_WITH_ISSUES } else { 0 }
    }

    pub fn table(&self, kind: TableKind) -> Option<&TableSummary> {
        self.tables.iter().find(|summary| summary.table == kind)
    }
}
