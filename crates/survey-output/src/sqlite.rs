//! SQLite relational sink.
//!
//! Each relation is loaded in its own transaction: drop if exists, create
//! with every column as text, insert every row. A failure rolls back that
//! table only.
//!
//! Rows narrower than the table are padded with empty strings and wider rows
//! are truncated. The load reports which widths it had to fit.

use std::collections::BTreeSet;
use std::iter;
use std::path::Path;

use rusqlite::{Connection, params_from_iter};
use survey_model::{OutputTables, Relation, TableKind};
use thiserror::Error;
use tracing::{error, info, warn};

/// Column type for every sink column.
pub const TEXT_COLUMN_TYPE: &str = "VARCHAR(4000)";

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Rows whose width differed from the table's column count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidthMismatch {
    pub columns: usize,
    pub rows: usize,
    /// Distinct row widths seen, ascending.
    pub widths: BTreeSet<usize>,
}

impl WidthMismatch {
    fn observe(&mut self, width: usize) {
        self.rows += 1;
        self.widths.insert(width);
    }

    pub fn describe(&self) -> String {
        let widths: Vec<String> = self.widths.iter().map(ToString::to_string).collect();
        format!(
            "{} rows with {} values fitted to {} columns",
            self.rows,
            widths.join("/"),
            self.columns
        )
    }
}

/// Rows written for one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationLoad {
    pub rows: usize,
    pub mismatch: Option<WidthMismatch>,
}

/// Outcome of loading one relation.
#[derive(Debug)]
pub enum TableLoad {
    Loaded { kind: TableKind, load: RelationLoad },
    Failed { kind: TableKind, error: SinkError },
}

impl TableLoad {
    pub fn kind(&self) -> TableKind {
        match self {
            TableLoad::Loaded { kind, .. } | TableLoad::Failed { kind, .. } => *kind,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TableLoad::Failed { .. })
    }
}

/// Header label as a column name: spaces and parentheses removed.
pub fn sql_identifier(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')'))
        .collect()
}

fn create_statement(kind: TableKind) -> String {
    let columns: Vec<String> = kind
        .header()
        .iter()
        .map(|label| format!("\"{}\" {TEXT_COLUMN_TYPE}", sql_identifier(label)))
        .collect();
    format!("CREATE TABLE \"{}\" ({})", kind.name(), columns.join(", "))
}

fn insert_statement(kind: TableKind) -> String {
    let header = kind.header();
    let columns: Vec<String> = header
        .iter()
        .map(|label| format!("\"{}\"", sql_identifier(label)))
        .collect();
    let placeholders: Vec<String> = (1..=header.len()).map(|idx| format!("?{idx}")).collect();
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        kind.name(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn in_memory() -> Result<Self, SinkError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Replace the table for `relation` and insert its rows.
    pub fn load_relation(&mut self, relation: &Relation) -> Result<RelationLoad, SinkError> {
        let kind = relation.kind;
        let columns = kind.header().len();
        let mut mismatch = WidthMismatch {
            columns,
            ..WidthMismatch::default()
        };
        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS \"{}\"", kind.name()), [])?;
        tx.execute(&create_statement(kind), [])?;
        {
            let mut stmt = tx.prepare(&insert_statement(kind))?;
            for row in &relation.rows {
                if row.len() != columns {
                    mismatch.observe(row.len());
                }
                let values = row
                    .iter()
                    .map(String::as_str)
                    .chain(iter::repeat(""))
                    .take(columns);
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(RelationLoad {
            rows: relation.len(),
            mismatch: (mismatch.rows > 0).then_some(mismatch),
        })
    }

    /// Load every relation. A failed table does not stop the others.
    pub fn load(&mut self, tables: &OutputTables) -> Vec<TableLoad> {
        tables
            .iter()
            .map(|relation| {
                let kind = relation.kind;
                match self.load_relation(relation) {
                    Ok(load) => {
                        if let Some(mismatch) = &load.mismatch {
                            warn!(table = kind.name(), "{}", mismatch.describe());
                        }
                        info!(table = kind.name(), rows = load.rows, "table loaded");
                        TableLoad::Loaded { kind, load }
                    }
                    Err(err) => {
                        error!(table = kind.name(), error = %err, "table load abandoned");
                        TableLoad::Failed { kind, error: err }
                    }
                }
            })
            .collect()
    }
}
