//! Survey reconciliation pipeline.
//!
//! Stages, in order:
//! 1. **Registry**: assign survey ids to the discovered export files
//! 2. **Load**: read each file once and split its header at the marker
//! 3. **Reconcile**: merge every survey's questions into one canonical set
//! 4. **Extract**: map each data row to a respondent and its responses
//! 5. **Assemble**: project everything into the five output relations

pub mod assemble;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod reconcile;
pub mod registry;

pub use assemble::assemble;
pub use config::PipelineConfig;
pub use error::{CoreError, Result};
pub use extract::{Extraction, RowError, RowOutcome, extract, extract_row};
pub use load::{LoadedSurvey, SurveyLoad, load_survey, load_surveys};
pub use pipeline::{PipelineOutput, run};
pub use reconcile::{QuestionIndex, reconcile};
pub use registry::{discover_surveys, register_surveys};
