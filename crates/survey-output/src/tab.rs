//! Tab-delimited relation files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use survey_model::{OutputTables, Relation};
use tracing::info;

/// Create the output directory if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

/// Write `relation` (header first) as tab-delimited text.
///
/// Rows are written at their own width; fields containing tabs, quotes or
/// line breaks are quoted.
pub fn write_relation<W: Write>(writer: W, relation: &Relation) -> Result<()> {
    let mut out = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer);
    out.write_record(relation.header())
        .with_context(|| format!("write {} header", relation.kind.name()))?;
    for row in &relation.rows {
        out.write_record(row)
            .with_context(|| format!("write {} row", relation.kind.name()))?;
    }
    out.flush()
        .with_context(|| format!("flush {}", relation.kind.name()))?;
    Ok(())
}

/// Render `relation` to a string.
pub fn render_relation(relation: &Relation) -> Result<String> {
    let mut buffer = Vec::new();
    write_relation(&mut buffer, relation)?;
    String::from_utf8(buffer).context("relation output is not UTF-8")
}

/// Write all five relations into `output_dir`, returning the written paths.
pub fn write_tables(output_dir: &Path, tables: &OutputTables) -> Result<Vec<PathBuf>> {
    ensure_output_dir(output_dir)?;
    let mut written = Vec::new();
    for relation in tables.iter() {
        let path = output_dir.join(relation.kind.file_name());
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        write_relation(BufWriter::new(file), relation)
            .with_context(|| format!("write {}", path.display()))?;
        info!(
            table = relation.kind.name(),
            rows = relation.len(),
            path = %path.display(),
            "table written"
        );
        written.push(path);
    }
    Ok(written)
}
