use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use survey_core::{PipelineConfig, PipelineOutput, run};
use survey_model::{Diagnostics, IssueKind, OutputTables, RunIssue};
use survey_output::{SqliteSink, TableLoad, write_tables};
use tracing::{error, info, info_span};

use crate::cli::RunArgs;
use crate::types::{RunResult, SinkStatus, TableSummary};

/// Run the normalizer and write the requested outputs.
///
/// Only an unreadable input directory or an unwritable output location is
/// fatal; everything else ends up in the result's diagnostics.
pub fn run_import(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("import", input_dir = %args.input_dir.display());
    let _guard = span.enter();

    let config = PipelineConfig::default().with_marker_label(args.marker.clone());
    let PipelineOutput {
        files,
        loaded_surveys,
        tables,
        mut diagnostics,
        ..
    } = run(&args.input_dir, &config)
        .with_context(|| format!("process surveys in {}", args.input_dir.display()))?;

    let mut summaries: Vec<TableSummary> = tables
        .iter()
        .map(|relation| TableSummary {
            table: relation.kind,
            rows: relation.len(),
            file: None,
            database: None,
        })
        .collect();

    if !args.db_only {
        let written = write_tables(&args.output_dir, &tables)
            .with_context(|| format!("write tables to {}", args.output_dir.display()))?;
        for (summary, path) in summaries.iter_mut().zip(written) {
            summary.file = Some(path);
        }
    }

    if let Some(path) = &args.database {
        for load in load_database(path, &tables, &mut diagnostics) {
            if let Some(summary) = summaries.iter_mut().find(|s| s.table == load.kind()) {
                summary.database = Some(if load.is_failed() {
                    SinkStatus::Failed
                } else {
                    SinkStatus::Loaded
                });
            }
        }
    }

    let has_errors = diagnostics.has_errors();
    let result = RunResult {
        input_dir: args.input_dir.clone(),
        surveys: files.len(),
        loaded_surveys,
        tables: summaries,
        database: args.database.clone(),
        diagnostics,
        has_errors,
    };

    if let Some(path) = &args.report {
        write_report(path, &result)?;
    }

    info!(
        surveys = result.surveys,
        loaded = result.loaded_surveys,
        issues = result.diagnostics.len(),
        "import complete"
    );
    Ok(result)
}

/// Load every table, turning sink failures and fitted rows into recorded issues.
fn load_database(
    path: &Path,
    tables: &OutputTables,
    diagnostics: &mut Diagnostics,
) -> Vec<TableLoad> {
    let mut sink = match SqliteSink::open(path) {
        Ok(sink) => sink,
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot open database");
            diagnostics.record(RunIssue::new(
                IssueKind::Sink,
                path.display().to_string(),
                err.to_string(),
            ));
            return Vec::new();
        }
    };
    let loads = sink.load(tables);
    for load in &loads {
        let message = match load {
            TableLoad::Failed { error, .. } => error.to_string(),
            TableLoad::Loaded { load, .. } => match &load.mismatch {
                Some(mismatch) => mismatch.describe(),
                None => continue,
            },
        };
        diagnostics.record(RunIssue::new(IssueKind::Sink, load.kind().name(), message));
    }
    loads
}

fn write_report(path: &Path, result: &RunResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}
