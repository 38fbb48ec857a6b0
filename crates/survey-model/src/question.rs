//! Canonical questions and the places they were asked.

use serde::Serialize;

use crate::{QuestionId, SurveyId};

/// Where a question text was seen: a survey and a 1-based position among
/// that survey's question columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Occurrence {
    pub survey_id: SurveyId,
    pub position: usize,
}

impl Occurrence {
    pub fn new(survey_id: SurveyId, position: usize) -> Self {
        Self {
            survey_id,
            position,
        }
    }

    /// Token unique to this occurrence within its survey, rendered as
    /// `<surveyId>-<position>`.
    pub fn order_token(&self) -> String {
        format!("{}-{}", self.survey_id, self.position)
    }
}

/// A canonical, deduplicated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Every place this text occurred, in pooling order. Duplicates within
    /// one survey are kept as separate entries.
    pub occurrences: Vec<Occurrence>,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            occurrences: Vec::new(),
        }
    }

    pub fn record(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
    }
}
