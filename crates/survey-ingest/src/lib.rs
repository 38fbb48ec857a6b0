//! Survey export ingestion utilities.
//!
//! This crate provides functionality for discovering survey export files and
//! reading them into header/record form.
//!
//! # Features
//!
//! - **File Discovery**: List the CSV exports in an input directory, sorted by name
//! - **Sheet Reading**: Read a whole export once, keeping record line numbers
//! - **Marker Location**: Split a header into metadata and question columns
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::{list_files_with_extension, read_survey};
//!
//! for path in list_files_with_extension(Path::new("exports"), "csv")? {
//!     let survey = read_survey(&path, "Custom Data")?;
//!     println!("{} questions", survey.layout.question_count());
//! }
//! ```

mod discovery;
mod error;
mod sheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sheet Reading ===
pub use sheet::{
    SheetRecord, SurveyData, SurveyLayout, SurveySheet, read_survey, read_survey_sheet,
};

// === File Discovery ===
pub use discovery::list_files_with_extension;
