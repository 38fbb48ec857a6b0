//! Integration tests for survey discovery and reading.

use std::fs;

use survey_ingest::{IngestError, list_files_with_extension, read_survey};
use tempfile::TempDir;

#[test]
fn discovered_files_read_in_name_order() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("B.csv"),
        "Name,Custom Data,Size,Color\nBob,,L,Blue\n",
    )
    .expect("write B");
    fs::write(
        dir.path().join("A.csv"),
        "Name,Custom Data,Color,Size\nAnn,,Red,M\n",
    )
    .expect("write A");

    let files = list_files_with_extension(dir.path(), "csv").expect("list files");
    let questions: Vec<Vec<String>> = files
        .iter()
        .map(|path| {
            read_survey(path, "Custom Data")
                .expect("read survey")
                .layout
                .question_columns()
                .to_vec()
        })
        .collect();

    assert_eq!(questions[0], vec!["Color", "Size"]);
    assert_eq!(questions[1], vec!["Size", "Color"]);
}

#[test]
fn missing_directory_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("does-not-exist");

    let err = list_files_with_extension(&missing, "csv").expect_err("missing dir");
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn custom_marker_label_is_honoured() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("survey.csv");
    fs::write(&path, "Respondent,Extra,Q1\n1,x,yes\n").expect("write survey");

    let survey = read_survey(&path, "Extra").expect("read survey");
    assert_eq!(survey.layout.marker_index, 1);
    assert!(read_survey(&path, "Custom Data").is_err());
}
