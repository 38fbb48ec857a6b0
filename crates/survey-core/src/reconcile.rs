//! Question reconciliation.
//!
//! Every survey contributes `(text, survey, position)` triples. Triples are
//! pooled in survey order, then header order, and each distinct text becomes
//! one [`Question`]. Ids follow first occurrence in the pool, so they depend
//! only on input order and never on hash iteration order.

use std::collections::HashMap;

use survey_model::{Occurrence, Question, QuestionId};
use tracing::{debug, info};

use crate::load::LoadedSurvey;

/// Canonical question set with a text lookup.
///
/// Questions live in an arena indexed by `id - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionIndex {
    questions: Vec<Question>,
    by_text: HashMap<String, QuestionId>,
}

impl QuestionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sighting of `text`, creating the question on first sight.
    pub fn observe(&mut self, text: &str, occurrence: Occurrence) -> QuestionId {
        if let Some(&id) = self.by_text.get(text) {
            self.questions[Self::slot(id)].record(occurrence);
            return id;
        }
        let id = QuestionId::new(self.questions.len() as u32 + 1);
        let mut question = Question::new(id, text);
        question.record(occurrence);
        self.questions.push(question);
        self.by_text.insert(text.to_string(), id);
        id
    }

    pub fn lookup(&self, text: &str) -> Option<QuestionId> {
        self.by_text.get(text).copied()
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        if id.get() == 0 {
            return None;
        }
        self.questions.get(Self::slot(id))
    }

    /// Questions in id order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Total recorded occurrences across all questions.
    pub fn occurrence_count(&self) -> usize {
        self.questions.iter().map(|q| q.occurrences.len()).sum()
    }

    fn slot(id: QuestionId) -> usize {
        id.get() as usize - 1
    }
}

/// Builds the canonical question set from every loaded survey.
pub fn reconcile(surveys: &[LoadedSurvey]) -> QuestionIndex {
    let mut index = QuestionIndex::new();
    for survey in surveys {
        for (position, text) in survey.layout.positioned_questions() {
            index.observe(text, Occurrence::new(survey.survey_id, position));
        }
        debug!(
            survey_id = %survey.survey_id,
            survey = %survey.name,
            questions = survey.layout.question_count(),
            canonical_total = index.len(),
            "survey questions pooled"
        );
    }
    info!(
        surveys = surveys.len(),
        questions = index.len(),
        occurrences = index.occurrence_count(),
        "questions reconciled"
    );
    index
}
