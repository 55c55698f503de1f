//! Integration tests for a full validation run over CSV data sheets.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use screen_cli::pipeline::{RUN_SUMMARY_FILE, ValidateConfig, run_validation, write_run_summary};
use screen_ingest::CsvTableSource;
use screen_model::{Category, RuleContext, RuleId};
use screen_store::list_datasets;

/// Column values of a data sheet row that passes every rule.
fn clean_row(ic: &str) -> Vec<(String, String)> {
    let mut row: Vec<(&str, &str)> = vec![
        ("DISTRICT", "KLANG"),
        ("LOCATION OF SCREENING", "KK BANDAR"),
        ("DATESCREEN", "01/03/2024"),
        ("ICNUMBER", ic),
        ("DATEBIRTH", "1985-01-01"),
        ("GENDER CODE", "2"),
        ("TELEPHONE NO", "0123456789"),
        ("EDUCATION", "Secondary"),
        ("OCCUPATION", "Farmer"),
        ("LESION", "Yes"),
        ("HABITS", "Yes"),
        ("REFERAL TO SPECIALIST", "Yes"),
        ("DATE REFERRED", "2024-03-02"),
        ("SPECIALIST APPT DATE", "2024-03-10"),
        ("DATE SEEN BY SPECIALIST", "2024-03-10"),
        ("TOBACCO", "1 - Current"),
        ("TOBACCO ADVISED", "Yes"),
        ("TOBACCO QUIT", "Yes"),
        ("BETEL QUID", "0 - No such habit"),
        ("BETEL QUID ADVISED", ""),
        ("BETEL QUID QUIT", ""),
        ("ALCOHOL", "0 - No such habit"),
        ("ALCOHOL ADVISED", ""),
        ("ALCOHOL QUIT", ""),
        ("REFERRAL QUIT SERVICES", "Yes"),
        ("READY TO QUIT TOBACCO", "Yes"),
        ("DATE REFERRED QUIT SER", "2024-03-02"),
        ("TARIKH TEMUJANJI QUIT SERVICE", "2024-03-09"),
        ("ATTEND FIRST APPT", "Yes"),
        ("INTERVENTION STATUS", "1 - Ongoing"),
        ("MEDICAL HISTORY", "No"),
        ("MEDICAL HISTORY SPECIFY", ""),
        ("FAMILY HISTORY CANCER", "No"),
        ("FAMILY HISTORY CANCER SPECIFY", ""),
        ("FAMILY HISTORY CANCER RELATION", ""),
    ];
    for slot in &screen_model::LESION_SLOTS {
        for name in slot.descriptors() {
            let value = match name {
                "TYPE1" => "Leukoplakia",
                "SIZE1" => "< 1 cm",
                "SITE1A" => "Tongue",
                _ => "",
            };
            row.push((name, value));
        }
    }
    row.into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn with(mut row: Vec<(String, String)>, column: &str, value: &str) -> Vec<(String, String)> {
    if let Some(cell) = row.iter_mut().find(|(name, _)| name == column) {
        cell.1 = value.to_string();
    }
    row
}

fn write_sheet(dir: &Path, name: &str, rows: &[Vec<(String, String)>]) {
    let header: Vec<&str> = rows[0].iter().map(|(name, _)| name.as_str()).collect();
    let mut text = header.join(",");
    text.push('\n');
    for row in rows {
        let values: Vec<&str> = row.iter().map(|(_, value)| value.as_str()).collect();
        text.push_str(&values.join(","));
        text.push('\n');
    }
    fs::write(dir.join(name), text).expect("write sheet");
}

struct Dirs {
    input: TempDir,
    store: TempDir,
    output: TempDir,
}

impl Dirs {
    fn new() -> Self {
        Self {
            input: TempDir::new().expect("input dir"),
            store: TempDir::new().expect("store dir"),
            output: TempDir::new().expect("output dir"),
        }
    }

    fn config(&self, compile: bool, cleanup: bool) -> ValidateConfig {
        ValidateConfig {
            input_dir: self.input.path().to_path_buf(),
            store_dir: self.store.path().to_path_buf(),
            output_dir: self.output.path().to_path_buf(),
            ctx: RuleContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).expect("date")),
            compile,
            cleanup,
        }
    }
}

#[test]
fn validates_sheets_and_compiles_reports() {
    let dirs = Dirs::new();
    write_sheet(
        dirs.input.path(),
        "KLANG.csv",
        &[
            with(clean_row("850101025678"), "GENDER CODE", "1"),
            clean_row("850101025680"),
        ],
    );
    write_sheet(
        dirs.input.path(),
        "SEPANG.csv",
        &[with(clean_row("850101025682"), "DATEBIRTH", "someday")],
    );
    fs::write(dirs.input.path().join("notes.txt"), "not a sheet").expect("write notes");

    let summary = run_validation(&CsvTableSource::new(), &dirs.config(true, true)).expect("run");

    assert_eq!(summary.files.len(), 1);
    let klang = &summary.files[0];
    assert_eq!(klang.file, "KLANG");
    assert_eq!(klang.rows, 2);
    assert!(!klang.has_errors(), "{klang:?}");
    assert_eq!(klang.failures(Category::General), 1);
    assert_eq!(klang.failures(Category::Lesion), 0);
    assert_eq!(summary.rule_failures().get(&RuleId::IcVsGender), Some(&1));

    assert_eq!(summary.load_errors.len(), 1);
    assert_eq!(summary.load_errors[0].file, "SEPANG");
    assert!(!summary.load_errors[0].message.contains("someday"));
    assert!(summary.has_errors());

    assert_eq!(summary.reports.len(), 1);
    let report = &summary.reports[0];
    assert_eq!(report.category, Category::General);
    assert_eq!(report.rows, 1);
    let csv = fs::read_to_string(&report.path).expect("read report");
    assert!(csv.contains("IC_VS_GENDER"));
    assert!(csv.contains("GENDER CODE: 1"));
    assert!(
        list_datasets(dirs.store.path(), Category::General)
            .expect("list")
            .is_empty()
    );

    let path = write_run_summary(&summary).expect("write summary");
    assert_eq!(path, dirs.output.path().join(RUN_SUMMARY_FILE));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read summary")).expect("parse");
    assert_eq!(json["today"], "2025-06-01");
    assert_eq!(json["load_errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["files"][0]["groups"][0]["failures"]["IC_VS_GENDER"], 1);
}

#[test]
fn no_compile_keeps_datasets() {
    let dirs = Dirs::new();
    write_sheet(
        dirs.input.path(),
        "KLANG.csv",
        &[with(clean_row("850101025678"), "LESION", "No")],
    );

    let summary = run_validation(&CsvTableSource::new(), &dirs.config(false, true)).expect("run");

    assert!(summary.reports.is_empty());
    assert!(!summary.has_errors());
    assert_eq!(
        list_datasets(dirs.store.path(), Category::Lesion)
            .expect("list")
            .len(),
        1
    );
    assert!(fs::read_dir(dirs.output.path()).expect("read output").next().is_none());
}

#[test]
fn missing_input_directory_aborts() {
    let dirs = Dirs::new();
    let mut config = dirs.config(true, true);
    config.input_dir = dirs.input.path().join("absent");
    assert!(run_validation(&CsvTableSource::new(), &config).is_err());
}

#[test]
fn rerun_replaces_earlier_datasets() {
    let dirs = Dirs::new();
    let config = dirs.config(false, false);
    let datasets = |category| {
        list_datasets(dirs.store.path(), category)
            .expect("list")
            .len()
    };

    write_sheet(
        dirs.input.path(),
        "KLANG.csv",
        &[with(clean_row("850101025678"), "GENDER CODE", "1")],
    );
    write_sheet(
        dirs.input.path(),
        "SEPANG.csv",
        &[with(clean_row("850101025680"), "LESION", "No")],
    );
    let first = run_validation(&CsvTableSource::new(), &config).expect("first run");
    assert!(!first.has_errors());
    assert_eq!(datasets(Category::General), 1);
    assert_eq!(datasets(Category::Lesion), 1);

    // KLANG is fixed and SEPANG no longer loads.
    write_sheet(dirs.input.path(), "KLANG.csv", &[clean_row("850101025678")]);
    write_sheet(
        dirs.input.path(),
        "SEPANG.csv",
        &[with(clean_row("850101025680"), "DATEBIRTH", "someday")],
    );
    let second = run_validation(&CsvTableSource::new(), &config).expect("second run");
    assert_eq!(second.files[0].failures(Category::General), 0);
    assert_eq!(second.load_errors.len(), 1);
    assert_eq!(datasets(Category::General), 0);
    assert_eq!(datasets(Category::Lesion), 0);
}
