//! Columnar layout of failure datasets.
//!
//! One dataset per (category, source file) lives at
//! `<root>/<category>/<file>.parquet` with the schema
//!
//! ```text
//! file: str, DISTRICT: str, LOCATION OF SCREENING: str, DATESCREEN: date,
//! ICNUMBER: str, [lesion_id: str,]
//! fail: struct{rule: str, rule_number: i32, data: list[str]}
//! ```
//!
//! Datasets of one category share the schema, so they merge by plain
//! concatenation.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;

use screen_ingest::{date_values, text_values};
use screen_model::columns::{DATESCREEN, DISTRICT, FAIL, FILE, ICNUMBER, LESION_ID, LOCATION};
use screen_model::{Category, FailureDescriptor, RecordKey, RuleId, StoreRecord};

use crate::error::{Result, StoreError};

const DATASET_EXTENSION: &str = "parquet";

const FIELD_RULE: &str = "rule";
const FIELD_RULE_NUMBER: &str = "rule_number";
const FIELD_DATA: &str = "data";

/// Directory holding every dataset of a category.
pub fn category_dir(root: &Path, category: Category) -> PathBuf {
    root.join(category.as_str())
}

/// Location of the dataset of one source file.
pub fn dataset_path(root: &Path, category: Category, file: &str) -> PathBuf {
    category_dir(root, category).join(format!("{file}.{DATASET_EXTENSION}"))
}

/// Lists the datasets of a category, sorted by filename.
///
/// A category that has never been flushed has no directory and no datasets.
pub fn list_datasets(root: &Path, category: Category) -> Result<Vec<PathBuf>> {
    let dir = category_dir(root, category);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(&dir).map_err(|e| StoreError::Io {
        path: dir.clone(),
        source: e,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::Io {
            path: dir.clone(),
            source: e,
        })?;
        let path = entry.path();
        let is_dataset = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DATASET_EXTENSION));
        if path.is_file() && is_dataset {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Build the dataset frame of a category from store records.
pub fn records_to_frame(category: Category, records: &[StoreRecord]) -> Result<DataFrame> {
    let height = records.len();
    let text = |f: fn(&StoreRecord) -> Option<&str>| -> Vec<Option<String>> {
        records.iter().map(|r| f(r).map(str::to_string)).collect()
    };

    let files: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
    let dates: Vec<Option<NaiveDate>> = records.iter().map(|r| r.key.date_screen).collect();

    let mut columns = vec![
        Series::new(FILE.into(), files).into_column(),
        Series::new(DISTRICT.into(), text(|r| r.key.district.as_deref())).into_column(),
        Series::new(LOCATION.into(), text(|r| r.key.location.as_deref())).into_column(),
        Series::new(DATESCREEN.into(), dates).into_column(),
        Series::new(ICNUMBER.into(), text(|r| r.key.ic_number.as_deref())).into_column(),
    ];
    if category.has_lesion_id() {
        columns.push(
            Series::new(LESION_ID.into(), text(|r| r.lesion_id.as_deref())).into_column(),
        );
    }

    let rules: Vec<&str> = records.iter().map(|r| r.fail.rule.name()).collect();
    let numbers: Vec<i32> = records
        .iter()
        .map(|r| i32::from(r.fail.rule.ordinal()))
        .collect();
    let data: Vec<Series> = records
        .iter()
        .map(|r| Series::new(PlSmallStr::EMPTY, r.fail.data.as_slice()))
        .collect();
    let fields = [
        Series::new(FIELD_RULE.into(), rules),
        Series::new(FIELD_RULE_NUMBER.into(), numbers),
        Series::new(FIELD_DATA.into(), data),
    ];
    let fail = StructChunked::from_series(FAIL.into(), height, fields.iter())?;
    columns.push(fail.into_series().into_column());

    Ok(DataFrame::new(columns)?)
}

/// Write a dataset frame, replacing any previous dataset at `path`.
pub fn write_dataset(path: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let file = File::create(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Lz4Raw)
        .finish(df)
        .map_err(|e| StoreError::Persist {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(())
}

/// Remove the dataset at `path`. Returns whether a file was removed.
pub fn remove_dataset(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read a dataset as a frame.
pub fn read_dataset_frame(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| StoreError::Schema {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reload a dataset into store records, in stored row order.
pub fn load_dataset(path: &Path) -> Result<Vec<StoreRecord>> {
    let df = read_dataset_frame(path)?;
    frame_to_records(&df).map_err(|message| StoreError::Schema {
        path: path.to_path_buf(),
        message,
    })
}

fn frame_to_records(df: &DataFrame) -> std::result::Result<Vec<StoreRecord>, String> {
    let shape = |e: screen_ingest::IngestError| e.to_string();
    let files = text_values(df, FILE).map_err(shape)?;
    let districts = text_values(df, DISTRICT).map_err(shape)?;
    let locations = text_values(df, LOCATION).map_err(shape)?;
    let dates = date_values(df, DATESCREEN).map_err(shape)?;
    let ics = text_values(df, ICNUMBER).map_err(shape)?;
    let lesion_ids = if df.column(LESION_ID).is_ok() {
        text_values(df, LESION_ID).map_err(shape)?
    } else {
        vec![None; df.height()]
    };

    let polars = |e: PolarsError| e.to_string();
    let fail = df.column(FAIL).map_err(polars)?;
    let fields = fail
        .as_materialized_series()
        .struct_()
        .map_err(polars)?
        .fields_as_series();
    let field = |name: &str| {
        fields
            .iter()
            .find(|s| s.name().as_str() == name)
            .ok_or_else(|| format!("fail struct has no field '{name}'"))
    };
    let rules = field(FIELD_RULE)?.str().map_err(polars)?;
    let data = field(FIELD_DATA)?.list().map_err(polars)?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let name = rules
            .get(idx)
            .ok_or_else(|| format!("row {idx}: rule is null"))?;
        let rule = RuleId::from_name(name).ok_or_else(|| format!("row {idx}: unknown rule {name}"))?;
        let entries = match data.get_as_series(idx) {
            Some(series) => series
                .str()
                .map_err(polars)?
                .into_iter()
                .map(|entry| entry.unwrap_or_default().to_string())
                .collect(),
            None => Vec::new(),
        };
        records.push(StoreRecord {
            file: files[idx].clone().unwrap_or_default(),
            key: RecordKey {
                district: districts[idx].clone(),
                location: locations[idx].clone(),
                date_screen: dates[idx],
                ic_number: ics[idx].clone(),
            },
            lesion_id: lesion_ids[idx].clone(),
            fail: FailureDescriptor::new(rule, entries),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_layout() {
        let root = Path::new("/store");
        assert_eq!(
            dataset_path(root, Category::Lesion, "KLANG_2024"),
            PathBuf::from("/store/lesion/KLANG_2024.parquet")
        );
    }

    #[test]
    fn frame_schema_per_category() {
        let record = StoreRecord {
            file: "KLANG".to_string(),
            key: RecordKey::default(),
            lesion_id: Some("2".to_string()),
            fail: FailureDescriptor::new(RuleId::LesionColsCompleteness, vec!["a: b".into()]),
        };
        let general = records_to_frame(Category::General, std::slice::from_ref(&record)).unwrap();
        assert!(general.column(LESION_ID).is_err());
        let lesion = records_to_frame(Category::Lesion, &[record]).unwrap();
        assert_eq!(lesion.width(), 7);
        assert_eq!(
            lesion.column(DATESCREEN).unwrap().dtype(),
            &DataType::Date
        );
        assert!(matches!(
            lesion.column(FAIL).unwrap().dtype(),
            DataType::Struct(_)
        ));
    }
}
