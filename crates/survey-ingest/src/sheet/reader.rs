//! Whole-file survey reading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};

use crate::error::{IngestError, Result};

use super::header::SurveyLayout;

/// A data record with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    pub line: u64,
    pub fields: Vec<String>,
}

/// A survey file read into memory: header row plus data records.
#[derive(Debug, Clone)]
pub struct SurveySheet {
    pub path: PathBuf,
    pub header: Vec<String>,
    pub records: Vec<SheetRecord>,
}

/// A survey sheet whose header has been split at the marker.
#[derive(Debug, Clone)]
pub struct SurveyData {
    pub path: PathBuf,
    pub layout: SurveyLayout,
    pub records: Vec<SheetRecord>,
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn parse_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// Values are opaque text: undecodable bytes become U+FFFD instead of failing the file.
fn record_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

/// Reads an entire survey file.
///
/// Row 1 is the header. Records may have any width; width checks belong to
/// the caller so that a bad row does not fail the whole file.
pub fn read_survey_sheet(path: &Path) -> Result<SurveySheet> {
    let file = open_file(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = reader.byte_records();
    let mut header = match rows.next() {
        Some(record) => record_fields(&record.map_err(|e| parse_error(path, &e))?),
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };

    // Skip BOM if present
    if let Some(first) = header.first_mut()
        && first.starts_with('\u{feff}')
    {
        first.remove(0);
    }

    let mut records = Vec::new();
    for row in rows {
        let record = row.map_err(|e| parse_error(path, &e))?;
        let line = record.position().map_or(0, csv::Position::line);
        records.push(SheetRecord {
            line,
            fields: record_fields(&record),
        });
    }

    tracing::debug!(
        path = %path.display(),
        columns = header.len(),
        records = records.len(),
        "read survey sheet"
    );

    Ok(SurveySheet {
        path: path.to_path_buf(),
        header,
        records,
    })
}

/// Reads a survey file and splits its header at `marker`.
pub fn read_survey(path: &Path, marker: &str) -> Result<SurveyData> {
    let SurveySheet {
        path,
        header,
        records,
    } = read_survey_sheet(path)?;

    let layout = SurveyLayout::locate(header, marker).ok_or_else(|| IngestError::MissingMarker {
        path: path.clone(),
        marker: marker.to_string(),
    })?;

    Ok(SurveyData {
        path,
        layout,
        records,
    })
}
