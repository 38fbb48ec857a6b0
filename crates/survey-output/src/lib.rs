//! Output generation for normalized survey relations.
//!
//! - `tab`: one tab-delimited file per relation
//! - `sqlite`: drop/create/insert into a SQLite database

pub mod sqlite;
pub mod tab;

pub use sqlite::{RelationLoad, SinkError, SqliteSink, TableLoad, WidthMismatch, sql_identifier};
pub use tab::{ensure_output_dir, render_relation, write_relation, write_tables};
