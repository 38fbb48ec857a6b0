//! Data model shared by the survey normalization crates.
//!
//! The five output relations (Surveys, Questions, SurveysQuestions,
//! Respondents, QuestionResponses) are built from the types in this crate.

pub mod diagnostics;
pub mod ids;
pub mod question;
pub mod response;
pub mod survey;
pub mod table;

pub use diagnostics::{Diagnostics, IssueKind, RunIssue};
pub use ids::{QuestionId, SurveyId};
pub use question::{Occurrence, Question};
pub use response::{RespondentRow, Response};
pub use survey::SourceFile;
pub use table::{OutputTables, Relation, TableKind};

/// Default marker label separating respondent metadata from question columns.
pub const DEFAULT_MARKER_LABEL: &str = "Custom Data";
