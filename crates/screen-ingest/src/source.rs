//! Source tables.
//!
//! The screening database export is an external collaborator; anything that
//! can hand over a [`DataFrame`] with the contractual columns can stand in for
//! it. [`CsvTableSource`] reads a CSV export of the data sheet.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::debug;

use screen_model::columns::{BOOLEAN_COLUMNS, DATE_COLUMNS};

use crate::error::{IngestError, Result};

/// Produces the record table of one source file.
pub trait TableSource {
    fn load(&self, path: &Path) -> Result<DataFrame>;
}

/// Reads a CSV export of the data sheet.
///
/// Every column is read as text so identity-card numbers and codes keep their
/// leading zeros; date and indicator columns are then coerced to their
/// contractual types.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableSource;

impl CsvTableSource {
    pub fn new() -> Self {
        Self
    }
}

impl TableSource for CsvTableSource {
    fn load(&self, path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .finish()
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if df.height() == 0 {
            return Err(IngestError::EmptyTable {
                path: path.to_path_buf(),
            });
        }
        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "source table read"
        );
        coerce_contract_types(df)
    }
}

/// Coerces the contractual date and indicator columns from text.
///
/// Columns that are absent are left for the rules to report; columns that
/// already carry the target type are left untouched.
pub fn coerce_contract_types(mut df: DataFrame) -> Result<DataFrame> {
    for name in DATE_COLUMNS {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if column.dtype() != &DataType::String {
            continue;
        }
        let values = column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| parse_cell(name, row, value, "date", parse_date))
            .collect::<Result<Vec<Option<NaiveDate>>>>()?;
        df.with_column(Series::new(name.into(), values))?;
    }
    for name in BOOLEAN_COLUMNS {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if column.dtype() != &DataType::String {
            continue;
        }
        let values = column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| parse_cell(name, row, value, "boolean", parse_bool))
            .collect::<Result<Vec<Option<bool>>>>()?;
        df.with_column(Series::new(name.into(), values))?;
    }
    Ok(df)
}

fn parse_cell<T>(
    column: &str,
    row: usize,
    value: Option<&str>,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    parse(raw).map(Some).ok_or_else(|| IngestError::InvalidValue {
        column: column.to_string(),
        expected,
        value: raw.to_string(),
        row,
    })
}

/// Parses ISO dates, day-first slash dates and date-times from database exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// Parses yes/no indicators. Database exports write true as `-1`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "-1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
