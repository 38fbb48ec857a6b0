use survey_ingest::IngestError;
use thiserror::Error;

/// Failures that abort a run.
///
/// Per-file and per-row failures are not errors here; they are recorded in
/// [`survey_model::Diagnostics`].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("survey discovery failed: {0}")]
    Discovery(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
