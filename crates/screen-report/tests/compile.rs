//! Compilation of stored datasets into category reports.

use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use screen_model::{Category, FailureDescriptor, FailureRecord, RecordKey, RuleId};
use screen_report::{compile_all, compile_category, report_path};
use screen_store::{ResultStore, list_datasets};

fn failure(ic: &str, rule: RuleId, lesion_id: Option<&str>) -> FailureRecord {
    FailureRecord {
        key: RecordKey {
            district: Some("KLANG".to_string()),
            location: Some("KK BANDAR".to_string()),
            date_screen: NaiveDate::from_ymd_opt(2024, 3, 1),
            ic_number: Some(ic.to_string()),
        },
        lesion_id: lesion_id.map(str::to_string),
        fail: FailureDescriptor::new(rule, vec![format!("ICNUMBER: {ic}"), "LESION: true".into()]),
    }
}

fn persist(root: &Path, category: Category, file: &str, rows: Vec<FailureRecord>) {
    let mut store = ResultStore::open(root, category, file);
    store.extend(rows);
    store.flush().expect("flush store");
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .expect("open report");
    let header = reader
        .headers()
        .expect("read header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("read record").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

#[test]
fn general_report_is_merged_and_ordered() {
    let store = TempDir::new().expect("store dir");
    let output = TempDir::new().expect("output dir");
    persist(
        store.path(),
        Category::General,
        "SEPANG",
        vec![failure("900101015555", RuleId::ValidIc, None)],
    );
    persist(
        store.path(),
        Category::General,
        "KLANG",
        vec![
            failure("850101025678", RuleId::IcVsGender, None),
            failure("850101025678", RuleId::InclusionLesionOrHabit, None),
        ],
    );

    let report = compile_category(store.path(), output.path(), Category::General, false)
        .expect("compile")
        .expect("report written");
    assert_eq!(report.rows, 3);
    assert_eq!(report.datasets, 2);
    assert_eq!(report.path, report_path(output.path(), Category::General));
    assert!(report.path.ends_with("validation_general.csv"));

    let (header, rows) = read_rows(&report.path);
    assert_eq!(
        header,
        vec![
            "file",
            "DISTRICT",
            "LOCATION OF SCREENING",
            "DATESCREEN",
            "ICNUMBER",
            "rule",
            "rule_number",
            "data",
        ]
    );
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|row| (row[0].as_str(), row[6].as_str()))
        .collect();
    assert_eq!(order, vec![("KLANG", "1"), ("KLANG", "3"), ("SEPANG", "2")]);
    assert_eq!(rows[0][7], "ICNUMBER: 850101025678; LESION: true");
    assert_eq!(rows[0][3], "2024-03-01");

    // Datasets survive without cleanup.
    assert_eq!(
        list_datasets(store.path(), Category::General)
            .expect("list")
            .len(),
        2
    );
}

#[test]
fn cleanup_removes_consumed_datasets() {
    let store = TempDir::new().expect("store dir");
    let output = TempDir::new().expect("output dir");
    persist(
        store.path(),
        Category::Lesion,
        "KLANG",
        vec![
            failure("850101025678", RuleId::LesionVsLesionCols, Some("other")),
            failure("850101025678", RuleId::LesionVsLesionCols, Some("1")),
        ],
    );

    let report = compile_category(store.path(), output.path(), Category::Lesion, true)
        .expect("compile")
        .expect("report written");
    let (header, rows) = read_rows(&report.path);
    assert_eq!(header[5], "lesion_id");
    assert_eq!(rows[0][5], "1");
    assert_eq!(rows[1][5], "other");
    assert!(
        list_datasets(store.path(), Category::Lesion)
            .expect("list")
            .is_empty()
    );
}

#[test]
fn empty_category_writes_no_report() {
    let store = TempDir::new().expect("store dir");
    let output = TempDir::new().expect("output dir");
    persist(
        store.path(),
        Category::General,
        "KLANG",
        vec![failure("850101025678", RuleId::ValidIc, None)],
    );

    let reports = compile_all(store.path(), output.path(), true).expect("compile");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].category, Category::General);
    assert!(!report_path(output.path(), Category::Lesion).exists());
}
