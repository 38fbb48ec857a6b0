//! Projection into the five output relations. No I/O.

use survey_model::{OutputTables, SourceFile};

use crate::extract::Extraction;
use crate::reconcile::QuestionIndex;

/// Builds all output relations.
///
/// `files` is the full registry, including surveys that failed to load, so
/// every discovered file is listed in Surveys.
pub fn assemble(
    files: &[SourceFile],
    index: &QuestionIndex,
    extraction: &Extraction,
) -> OutputTables {
    let mut tables = OutputTables::default();

    for file in files {
        tables
            .surveys
            .push_row(vec![file.id.to_string(), file.display_name()]);
    }

    for question in index.questions() {
        tables
            .questions
            .push_row(vec![question.id.to_string(), question.text.clone()]);
        for occurrence in &question.occurrences {
            tables.surveys_questions.push_row(vec![
                occurrence.survey_id.to_string(),
                question.id.to_string(),
                occurrence.order_token(),
            ]);
        }
    }

    for respondent in &extraction.respondents {
        let mut row = Vec::with_capacity(respondent.fields.len() + 1);
        row.push(respondent.survey_id.to_string());
        row.extend(respondent.fields.iter().cloned());
        tables.respondents.push_row(row);
    }

    for response in &extraction.responses {
        tables.question_responses.push_row(vec![
            response.question_id.to_string(),
            response.respondent_id.clone(),
            response.value.clone(),
        ]);
    }

    tables
}
