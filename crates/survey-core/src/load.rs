//! Per-survey loading: read once, split at the marker.
//!
//! The parsed header is kept on [`LoadedSurvey`] and reused by both the
//! reconciler and the extractor.

use survey_ingest::{IngestError, SheetRecord, SurveyData, SurveyLayout, read_survey};
use survey_model::{Diagnostics, IssueKind, RunIssue, SourceFile, SurveyId};
use tracing::{debug, error};

use crate::config::PipelineConfig;

/// A survey whose header contained the marker column.
#[derive(Debug, Clone)]
pub struct LoadedSurvey {
    pub survey_id: SurveyId,
    /// Display name, used in diagnostics.
    pub name: String,
    pub layout: SurveyLayout,
    pub records: Vec<SheetRecord>,
}

/// Outcome of loading one registered survey.
#[derive(Debug)]
pub enum SurveyLoad {
    Loaded(LoadedSurvey),
    Failed {
        survey_id: SurveyId,
        name: String,
        error: IngestError,
    },
}

/// Issue category for a failed load.
fn issue_kind(error: &IngestError) -> IssueKind {
    if error.is_schema_error() {
        IssueKind::Schema
    } else {
        IssueKind::FileOpen
    }
}

/// Reads and splits a single registered survey.
pub fn load_survey(file: &SourceFile, config: &PipelineConfig) -> SurveyLoad {
    let name = file.display_name();
    match read_survey(file.path(), &config.marker_label) {
        Ok(SurveyData {
            layout, records, ..
        }) => SurveyLoad::Loaded(LoadedSurvey {
            survey_id: file.id,
            name,
            layout,
            records,
        }),
        Err(error) => SurveyLoad::Failed {
            survey_id: file.id,
            name,
            error,
        },
    }
}

/// Loads every registered survey, recording failures in `diagnostics`.
///
/// Failed surveys are left out of the result but stay registered.
pub fn load_surveys(
    files: &[SourceFile],
    config: &PipelineConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<LoadedSurvey> {
    let mut loaded = Vec::with_capacity(files.len());
    for file in files {
        match load_survey(file, config) {
            SurveyLoad::Loaded(survey) => {
                debug!(
                    survey_id = %survey.survey_id,
                    survey = %survey.name,
                    questions = survey.layout.question_count(),
                    records = survey.records.len(),
                    "survey loaded"
                );
                loaded.push(survey);
            }
            SurveyLoad::Failed {
                survey_id,
                name,
                error,
            } => {
                let kind = issue_kind(&error);
                error!(
                    survey_id = %survey_id,
                    survey = %name,
                    kind = kind.label(),
                    %error,
                    "skipping survey"
                );
                diagnostics.record(RunIssue::new(kind, name, error.to_string()));
            }
        }
    }
    loaded
}
