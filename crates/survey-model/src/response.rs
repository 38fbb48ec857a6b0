//! Per-row extraction results: respondent metadata and question answers.

use serde::Serialize;

use crate::{QuestionId, SurveyId};

/// One data row's respondent metadata: every cell up to and including the
/// marker column, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespondentRow {
    pub survey_id: SurveyId,
    pub fields: Vec<String>,
}

impl RespondentRow {
    pub fn new(survey_id: SurveyId, fields: Vec<String>) -> Self {
        Self { survey_id, fields }
    }

    /// The first metadata field. Unique within its survey only.
    pub fn respondent_id(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }
}

/// A single answer, keyed by canonical question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub respondent_id: String,
    pub value: String,
}
