use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_model::RunIssue;

use crate::types::{RunResult, SinkStatus, TableSummary};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input_dir.display());
    println!(
        "Surveys: {} registered, {} loaded",
        result.surveys, result.loaded_surveys
    );
    if let Some(path) = &result.database {
        println!("Database: {}", path.display());
    }
    println!("{}", summary_table(result));
    let issues = result.diagnostics.issues();
    if !issues.is_empty() {
        println!();
        println!("Issues:");
        println!("{}", issue_table(issues));
    }
}

pub fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("File"),
        header_cell("Database"),
    ]);
    apply_table_style(&mut table, 120);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for summary in &result.tables {
        table.add_row(vec![
            Cell::new(summary.table.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.rows),
            file_cell(summary),
            database_cell(summary.database),
        ]);
    }
    table
}

fn issue_table(issues: &[RunIssue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Source"),
        header_cell("Line"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 2, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.kind.label()).fg(Color::Red),
            Cell::new(&issue.source),
            issue.line.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&issue.message),
        ]);
    }
    table
}

fn file_cell(summary: &TableSummary) -> Cell {
    match &summary.file {
        Some(path) => Cell::new(path.display()),
        None => dim_cell("-"),
    }
}

fn database_cell(status: Option<SinkStatus>) -> Cell {
    match status {
        Some(SinkStatus::Loaded) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(SinkStatus::Failed) => Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
