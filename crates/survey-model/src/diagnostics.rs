//! Accumulator for recoverable failures.
//!
//! Every recoverable failure in a run is recorded here and the caller decides
//! the completion status from it once the run finishes.

use serde::Serialize;

/// Category of a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Survey file could not be opened or parsed.
    FileOpen,
    /// Marker column missing from the header.
    Schema,
    /// Data row cell count differs from the header.
    RowShape,
    /// Question text missing from the reconciled index.
    UnresolvedQuestion,
    /// Relational sink failed to create or load a table.
    Sink,
}

impl IssueKind {
    pub fn label(self) -> &'static str {
        match self {
            IssueKind::FileOpen => "file",
            IssueKind::Schema => "schema",
            IssueKind::RowShape => "row shape",
            IssueKind::UnresolvedQuestion => "unresolved question",
            IssueKind::Sink => "sink",
        }
    }
}

/// A single recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunIssue {
    pub kind: IssueKind,
    /// File name or table name the failure belongs to.
    pub source: String,
    /// 1-based line number, for row-level failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    pub message: String,
}

impl RunIssue {
    pub fn new(kind: IssueKind, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            line: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    issues: Vec<RunIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, issue: RunIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[RunIssue] {
        &self.issues
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
