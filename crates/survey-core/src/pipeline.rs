//! End-to-end reconciliation run.
//!
//! Only directory errors abort. Every other failure is recorded in the
//! returned [`Diagnostics`] and the run carries on.

use std::path::Path;
use std::time::Instant;

use survey_model::{Diagnostics, OutputTables, SourceFile};
use tracing::{info, info_span};

use crate::assemble::assemble;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extract::extract;
use crate::load::load_surveys;
use crate::reconcile::{QuestionIndex, reconcile};
use crate::registry::discover_surveys;

/// Everything a run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Every registered survey, loaded or not.
    pub files: Vec<SourceFile>,
    /// Number of surveys whose header held the marker.
    pub loaded_surveys: usize,
    pub index: QuestionIndex,
    pub tables: OutputTables,
    pub diagnostics: Diagnostics,
}

impl PipelineOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Runs registry, load, reconcile, extract and assemble over `input_dir`.
///
/// The question index is complete across all surveys before any response
/// is extracted.
pub fn run(input_dir: &Path, config: &PipelineConfig) -> Result<PipelineOutput> {
    let span = info_span!("pipeline", input_dir = %input_dir.display());
    let _guard = span.enter();
    let mut diagnostics = Diagnostics::new();

    let start = Instant::now();
    let files = discover_surveys(input_dir, &config.extension)?;
    info!(
        surveys = files.len(),
        duration_ms = start.elapsed().as_millis(),
        "surveys registered"
    );

    let start = Instant::now();
    let loaded = load_surveys(&files, config, &mut diagnostics);
    info!(
        loaded = loaded.len(),
        skipped = files.len() - loaded.len(),
        duration_ms = start.elapsed().as_millis(),
        "surveys loaded"
    );

    let index = reconcile(&loaded);

    let start = Instant::now();
    let extraction = extract(&loaded, &index, &mut diagnostics);
    info!(
        respondents = extraction.respondents.len(),
        responses = extraction.responses.len(),
        duration_ms = start.elapsed().as_millis(),
        "responses extracted"
    );

    let tables = assemble(&files, &index, &extraction);
    info!(issues = diagnostics.len(), "tables assembled");

    Ok(PipelineOutput {
        files,
        loaded_surveys: loaded.len(),
        index,
        tables,
        diagnostics,
    })
}
