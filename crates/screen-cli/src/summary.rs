use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use screen_cli::types::RunSummary;
use screen_model::{Category, RuleId};
use screen_report::CompiledReport;
use screen_validate::FileReport;

pub fn print_summary(summary: &RunSummary, summary_path: Option<&Path>) {
    println!("Input: {}", summary.input_dir.display());
    println!("Store: {}", summary.store_dir.display());
    println!("Processing date: {}", summary.today);
    print_file_table(summary);
    print_rule_table(summary);
    print_reports(&summary.reports);
    if let Some(path) = summary_path {
        println!("Run summary: {}", path.display());
    }
    if !summary.load_errors.is_empty() || summary.compile_error.is_some() {
        eprintln!("Errors:");
        for error in &summary.load_errors {
            eprintln!("- {}: {}", error.file, error.message);
        }
        if let Some(error) = &summary.compile_error {
            eprintln!("- compile: {error}");
        }
    }
}

fn print_file_table(summary: &RunSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("General"),
        header_cell("Lesion"),
        header_cell("Rule errors"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_rows = 0usize;
    let mut total_errors = 0usize;
    for file in &summary.files {
        let rule_errors = rule_error_count(file);
        total_rows += file.rows;
        total_errors += rule_errors;
        table.add_row(vec![
            Cell::new(&file.file)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(file.rows),
            count_cell(file.failures(Category::General), Color::Yellow),
            count_cell(file.failures(Category::Lesion), Color::Yellow),
            count_cell(rule_errors, Color::Red),
            status_cell(file.has_errors()),
        ]);
    }
    for error in &summary.load_errors {
        table.add_row(vec![
            Cell::new(&error.file).fg(Color::DarkGrey),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("not loaded")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(summary.total_failures(Category::General), Color::Yellow)
            .add_attribute(Attribute::Bold),
        count_cell(summary.total_failures(Category::Lesion), Color::Yellow)
            .add_attribute(Attribute::Bold),
        count_cell(total_errors, Color::Red).add_attribute(Attribute::Bold),
        status_cell(summary.has_errors()),
    ]);
    println!("{table}");
}

fn print_rule_table(summary: &RunSummary) {
    let failures = summary.rule_failures();
    if failures.values().all(|count| *count == 0) {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Group"),
        header_cell("Failures"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (rule, count) in failures.iter().filter(|(_, count)| **count > 0) {
        table.add_row(vec![
            Cell::new(rule.ordinal()),
            Cell::new(rule.name()),
            Cell::new(rule.category()),
            count_cell(*count, Color::Yellow),
        ]);
    }
    println!();
    println!("Failures by rule:");
    println!("{table}");
}

pub fn print_reports(reports: &[CompiledReport]) {
    if reports.is_empty() {
        println!("No reports written.");
        return;
    }
    for report in reports {
        println!(
            "Report ({}): {} [{} rows from {} datasets]",
            report.category,
            report.path.display(),
            report.rows,
            report.datasets
        );
    }
}

pub fn print_rules() {
    let mut table = Table::new();
    table.set_header(vec!["#", "Rule", "Group", "Description"]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for rule in RuleId::all() {
        table.add_row(vec![
            Cell::new(rule.ordinal()),
            Cell::new(rule.name()),
            Cell::new(rule.category()),
            Cell::new(rule.description()),
        ]);
    }
    println!("{table}");
}

fn rule_error_count(file: &FileReport) -> usize {
    file.groups
        .iter()
        .map(|group| {
            group.rule_errors.len()
                + usize::from(group.view_error.is_some())
                + usize::from(group.persist_error.is_some())
        })
        .sum()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(has_errors: bool) -> Cell {
    if has_errors {
        Cell::new("errors")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("ok").fg(Color::Green)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
