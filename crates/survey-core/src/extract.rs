//! Response extraction.
//!
//! Each data row is split at the marker: the metadata slice becomes a
//! [`RespondentRow`] and every answer cell becomes a [`Response`] keyed by the
//! canonical id of its column's question text.

use survey_ingest::SheetRecord;
use survey_model::{Diagnostics, IssueKind, QuestionId, RespondentRow, Response, RunIssue};
use thiserror::Error;
use tracing::{error, info, info_span};

use crate::load::LoadedSurvey;
use crate::reconcile::QuestionIndex;

/// Respondents and responses across all loaded surveys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub respondents: Vec<RespondentRow>,
    pub responses: Vec<Response>,
}

/// Row-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("line {line}: row has {found} cells, header has {expected}")]
    Shape {
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl RowError {
    pub fn line(&self) -> u64 {
        match self {
            RowError::Shape { line, .. } => *line,
        }
    }
}

/// Outcome of extracting a single data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted {
        respondent: RespondentRow,
        responses: Vec<Response>,
        /// 1-based question positions whose text had no canonical id.
        unresolved: Vec<usize>,
    },
    Rejected(RowError),
}

/// Resolves each question column of `survey` once, in header order.
fn resolve_columns(survey: &LoadedSurvey, index: &QuestionIndex) -> Vec<Option<QuestionId>> {
    survey
        .layout
        .question_columns()
        .iter()
        .map(|text| index.lookup(text))
        .collect()
}

fn split_row(
    survey: &LoadedSurvey,
    record: &SheetRecord,
    columns: &[Option<QuestionId>],
) -> RowOutcome {
    let Some((metadata, answers)) = survey.layout.split(&record.fields) else {
        return RowOutcome::Rejected(RowError::Shape {
            line: record.line,
            expected: survey.layout.width(),
            found: record.fields.len(),
        });
    };

    let respondent = RespondentRow::new(survey.survey_id, metadata.to_vec());
    let respondent_id = respondent.respondent_id().to_string();
    let mut responses = Vec::with_capacity(answers.len());
    let mut unresolved = Vec::new();
    for (idx, (value, column)) in answers.iter().zip(columns).enumerate() {
        match column {
            Some(question_id) => responses.push(Response {
                question_id: *question_id,
                respondent_id: respondent_id.clone(),
                value: value.clone(),
            }),
            None => unresolved.push(idx + 1),
        }
    }

    RowOutcome::Accepted {
        respondent,
        responses,
        unresolved,
    }
}

/// Extracts one data row of `survey`.
pub fn extract_row(
    survey: &LoadedSurvey,
    record: &SheetRecord,
    index: &QuestionIndex,
) -> RowOutcome {
    split_row(survey, record, &resolve_columns(survey, index))
}

/// Extracts every data row of every loaded survey.
///
/// `index` must already hold the questions of all surveys. Rejected rows and
/// unresolved cells are logged and recorded in `diagnostics`.
pub fn extract(
    surveys: &[LoadedSurvey],
    index: &QuestionIndex,
    diagnostics: &mut Diagnostics,
) -> Extraction {
    let mut extraction = Extraction::default();
    for survey in surveys {
        let span = info_span!("survey", survey_id = %survey.survey_id, survey = %survey.name);
        let _guard = span.enter();
        let columns = resolve_columns(survey, index);
        let mut accepted = 0usize;
        let mut rejected = 0usize;

        for record in &survey.records {
            match split_row(survey, record, &columns) {
                RowOutcome::Accepted {
                    respondent,
                    responses,
                    unresolved,
                } => {
                    for position in unresolved {
                        let text = &survey.layout.question_columns()[position - 1];
                        error!(
                            line = record.line,
                            position,
                            question = %text,
                            "question text missing from reconciled index, skipping response"
                        );
                        diagnostics.record(
                            RunIssue::new(
                                IssueKind::UnresolvedQuestion,
                                survey.name.clone(),
                                format!("question '{text}' at position {position} has no id"),
                            )
                            .at_line(record.line),
                        );
                    }
                    extraction.respondents.push(respondent);
                    extraction.responses.extend(responses);
                    accepted += 1;
                }
                RowOutcome::Rejected(row_error) => {
                    error!(line = row_error.line(), error = %row_error, "skipping row");
                    diagnostics.record(
                        RunIssue::new(IssueKind::RowShape, survey.name.clone(), row_error.to_string())
                            .at_line(row_error.line()),
                    );
                    rejected += 1;
                }
            }
        }
        info!(accepted, rejected, "survey rows extracted");
    }
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use survey_ingest::SurveyLayout;
    use survey_model::SurveyId;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    fn survey(id: u32, header: &[&str], rows: &[&[&str]]) -> LoadedSurvey {
        LoadedSurvey {
            survey_id: SurveyId::new(id),
            name: format!("{id}.csv"),
            layout: SurveyLayout::locate(strings(header), "Custom Data").unwrap(),
            records: rows
                .iter()
                .zip(2u64..)
                .map(|(row, line)| SheetRecord {
                    line,
                    fields: strings(row),
                })
                .collect(),
        }
    }

    #[test]
    fn responses_follow_column_text_not_position() {
        let surveys = vec![
            survey(1, &["Name", "Custom Data", "Color", "Size"], &[&["ann", "", "Red", "M"]]),
            survey(2, &["Name", "Custom Data", "Size", "Color"], &[&["bob", "", "L", "Blue"]]),
        ];
        let index = reconcile(&surveys);
        let mut diagnostics = Diagnostics::new();
        let extraction = extract(&surveys, &index, &mut diagnostics);

        let color = index.lookup("Color").unwrap();
        let size = index.lookup("Size").unwrap();
        let found: Vec<(QuestionId, &str, &str)> = extraction
            .responses
            .iter()
            .map(|r| (r.question_id, r.respondent_id.as_str(), r.value.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (color, "ann", "Red"),
                (size, "ann", "M"),
                (size, "bob", "L"),
                (color, "bob", "Blue"),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn respondent_keeps_metadata_through_marker() {
        let surveys = vec![survey(
            3,
            &["RespondentID", "CollectorID", "Custom Data", "Q1"],
            &[&["41", "c9", "tag", "yes"]],
        )];
        let index = reconcile(&surveys);
        let extraction = extract(&surveys, &index, &mut Diagnostics::new());

        assert_eq!(extraction.respondents.len(), 1);
        assert_eq!(extraction.respondents[0].survey_id, SurveyId::new(3));
        assert_eq!(extraction.respondents[0].fields, strings(&["41", "c9", "tag"]));
        assert_eq!(extraction.responses[0].respondent_id, "41");
    }

    #[test]
    fn short_row_is_skipped_and_recorded() {
        let surveys = vec![survey(
            1,
            &["Name", "Custom Data", "Color", "Size"],
            &[&["ann", "", "Red", "M"], &["bob", "", "Blue"], &["cy", "", "Green", "S"]],
        )];
        let index = reconcile(&surveys);
        let mut diagnostics = Diagnostics::new();
        let extraction = extract(&surveys, &index, &mut diagnostics);

        assert_eq!(extraction.respondents.len(), 2);
        assert_eq!(extraction.responses.len(), 4);
        assert_eq!(diagnostics.count(IssueKind::RowShape), 1);
        assert_eq!(diagnostics.issues()[0].line, Some(3));
    }

    #[test]
    fn row_outcome_reports_shape() {
        let surveys = vec![survey(1, &["Name", "Custom Data", "Q"], &[&["a", "", "x", "y"]])];
        let index = reconcile(&surveys);
        let outcome = extract_row(&surveys[0], &surveys[0].records[0], &index);

        assert_eq!(
            outcome,
            RowOutcome::Rejected(RowError::Shape {
                line: 2,
                expected: 3,
                found: 4,
            })
        );
    }

    #[test]
    fn unresolved_question_skips_only_that_cell() {
        let surveys = vec![survey(1, &["Name", "Custom Data", "Q1", "Q2"], &[&["a", "", "x", "y"]])];
        let mut index = QuestionIndex::new();
        index.observe("Q1", survey_model::Occurrence::new(SurveyId::new(1), 1));
        let mut diagnostics = Diagnostics::new();
        let extraction = extract(&surveys, &index, &mut diagnostics);

        assert_eq!(extraction.respondents.len(), 1);
        assert_eq!(extraction.responses.len(), 1);
        assert_eq!(extraction.responses[0].value, "x");
        assert_eq!(diagnostics.count(IssueKind::UnresolvedQuestion), 1);
    }

    #[test]
    fn duplicate_question_columns_both_surface() {
        let surveys = vec![survey(
            1,
            &["Name", "Custom Data", "Comments", "Comments"],
            &[&["a", "", "first", "second"]],
        )];
        let index = reconcile(&surveys);
        let extraction = extract(&surveys, &index, &mut Diagnostics::new());

        let id = index.lookup("Comments").unwrap();
        let values: Vec<&str> = extraction
            .responses
            .iter()
            .filter(|r| r.question_id == id)
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(values, vec!["first", "second"]);
    }
}
