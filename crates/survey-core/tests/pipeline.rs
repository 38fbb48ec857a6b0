//! Integration tests for the reconciliation pipeline.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use survey_core::{CoreError, PipelineConfig, run};
use survey_model::IssueKind;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write survey file");
}

fn swapped_columns_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "A.csv", "Name,Custom Data,Color,Size\nann,,Red,M\n");
    write(dir.path(), "B.csv", "Name,Custom Data,Size,Color\nbob,,L,Blue\n");
    dir
}

#[test]
fn swapped_columns_cross_map() {
    let dir = swapped_columns_dir();
    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");
    let tables = &output.tables;

    assert_eq!(tables.questions.rows, vec![vec!["1", "Color"], vec!["2", "Size"]]);
    assert_eq!(
        tables.surveys_questions.rows,
        vec![
            vec!["1", "1", "1-1"],
            vec!["2", "1", "2-2"],
            vec!["1", "2", "1-2"],
            vec!["2", "2", "2-1"],
        ]
    );
    assert_eq!(
        tables.question_responses.rows,
        vec![
            vec!["1", "ann", "Red"],
            vec!["2", "ann", "M"],
            vec!["2", "bob", "L"],
            vec!["1", "bob", "Blue"],
        ]
    );
    assert_eq!(
        tables.respondents.rows,
        vec![vec!["1", "ann", ""], vec!["2", "bob", ""]]
    );
    assert!(!output.has_errors());
}

#[test]
fn survey_without_marker_is_listed_but_excluded() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "A.csv", "Name,Custom Data,Color\nann,,Red\n");
    write(dir.path(), "B.csv", "Name,Color,Shape\nbob,Blue,Round\n");

    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");
    let tables = &output.tables;

    assert_eq!(tables.surveys.rows, vec![vec!["1", "A.csv"], vec!["2", "B.csv"]]);
    assert_eq!(tables.questions.rows, vec![vec!["1", "Color"]]);
    assert!(tables.respondents.rows.iter().all(|row| row[0] == "1"));
    assert_eq!(tables.question_responses.len(), 1);
    assert!(output.has_errors());
    assert_eq!(output.diagnostics.count(IssueKind::Schema), 1);
}

#[test]
fn short_row_skipped_rest_of_file_processed() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "A.csv",
        "Name,Custom Data,Color,Size\nann,,Red,M\nbob,,Blue\ncy,,Green,S\n",
    );

    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");

    let respondents: Vec<&str> = output
        .tables
        .respondents
        .rows
        .iter()
        .map(|row| row[1].as_str())
        .collect();
    assert_eq!(respondents, vec!["ann", "cy"]);
    assert_eq!(output.tables.question_responses.len(), 4);
    assert_eq!(output.diagnostics.count(IssueKind::RowShape), 1);
    assert_eq!(output.diagnostics.issues()[0].line, Some(3));
    assert_eq!(output.diagnostics.issues()[0].source, "A.csv");
}

#[test]
fn undecodable_cell_keeps_the_rest_of_the_survey() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("A.csv"),
        b"Name,Custom Data,Color\nann,,Red\nbob,,\xff\xfe\ncy,,Green\n",
    )
    .expect("write survey file");

    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");
    let tables = &output.tables;

    assert_eq!(tables.questions.rows, vec![vec!["1", "Color"]]);
    assert_eq!(tables.surveys_questions.len(), 1);
    assert_eq!(tables.respondents.len(), 3);
    assert_eq!(
        tables.question_responses.rows,
        vec![
            vec!["1", "ann", "Red"],
            vec!["1", "bob", "\u{fffd}\u{fffd}"],
            vec!["1", "cy", "Green"],
        ]
    );
    assert!(!output.has_errors());
}

#[test]
fn question_ids_agree_across_relations() {
    let dir = swapped_columns_dir();
    write(
        dir.path(),
        "C.csv",
        "Name,Custom Data,Weight,Color\ncat,,9,Black\n",
    );
    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");
    let tables = &output.tables;

    let question_ids: BTreeSet<&str> = tables.questions.rows.iter().map(|r| r[0].as_str()).collect();
    let junction_ids: BTreeSet<&str> = tables
        .surveys_questions
        .rows
        .iter()
        .map(|r| r[1].as_str())
        .collect();
    let response_ids: BTreeSet<&str> = tables
        .question_responses
        .rows
        .iter()
        .map(|r| r[0].as_str())
        .collect();
    assert_eq!(question_ids, junction_ids);
    assert!(response_ids.is_subset(&question_ids));

    let color = output.index.lookup("Color").expect("color id").to_string();
    let color_answers: Vec<&str> = tables
        .question_responses
        .rows
        .iter()
        .filter(|r| r[0] == color)
        .map(|r| r[2].as_str())
        .collect();
    assert_eq!(color_answers, vec!["Red", "Blue", "Black"]);
}

#[test]
fn respondent_count_matches_data_rows() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "A.csv", "Name,Custom Data,Q\na,,1\nb,,2\nc,,3\n");
    write(dir.path(), "B.csv", "Name,Custom Data,Q\nd,,4\n");
    write(dir.path(), "C.csv", "Name,Q\ne,5\n");

    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");
    assert_eq!(output.tables.respondents.len(), 4);
}

#[test]
fn reruns_are_identical() {
    let dir = swapped_columns_dir();
    let first = run(dir.path(), &PipelineConfig::default()).expect("first run");
    let second = run(dir.path(), &PipelineConfig::default()).expect("second run");
    assert_eq!(first.tables, second.tables);
}

#[test]
fn non_csv_files_are_ignored() {
    let dir = swapped_columns_dir();
    write(dir.path(), "notes.txt", "not a survey");

    let output = run(dir.path(), &PipelineConfig::default()).expect("run pipeline");
    assert_eq!(output.files.len(), 2);
}

#[test]
fn custom_marker_label() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "A.csv", "Name,Extra,Color\nann,x,Red\n");

    let config = PipelineConfig::default().with_marker_label("Extra");
    let output = run(dir.path(), &config).expect("run pipeline");
    assert_eq!(output.tables.questions.rows, vec![vec!["1", "Color"]]);
    assert!(!output.has_errors());
}

#[test]
fn missing_input_directory_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let result = run(&dir.path().join("missing"), &PipelineConfig::default());
    assert!(matches!(result, Err(CoreError::Discovery(_))));
}
