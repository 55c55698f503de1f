//! Typed column access over Polars frames.
//!
//! Rules read whole columns into plain vectors of `Option<T>`. A missing column
//! or a column of the wrong semantic type is an input-shape error.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the epoch of Polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a Polars physical date (days since the Unix epoch) to a calendar date.
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Looks up a column, mapping absence to [`IngestError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Fails with [`IngestError::ColumnNotFound`] for the first absent column.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        require_column(df, name)?;
    }
    Ok(())
}

fn type_error(column: &Column, expected: &'static str) -> IngestError {
    IngestError::ColumnType {
        column: column.name().to_string(),
        expected,
        actual: column.dtype().to_string(),
    }
}

/// Reads a text column.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?;
    match column.dtype() {
        DataType::Null => Ok(vec![None; column.len()]),
        DataType::String => Ok(column
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect()),
        _ => Err(type_error(column, "string")),
    }
}

/// Reads a boolean indicator column.
pub fn bool_values(df: &DataFrame, name: &str) -> Result<Vec<Option<bool>>> {
    let column = require_column(df, name)?;
    match column.dtype() {
        DataType::Null => Ok(vec![None; column.len()]),
        DataType::Boolean => Ok(column.bool()?.into_iter().collect()),
        _ => Err(type_error(column, "boolean")),
    }
}

/// Reads a calendar date column.
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    let column = require_column(df, name)?;
    match column.dtype() {
        DataType::Null => Ok(vec![None; column.len()]),
        DataType::Date => {
            let mut values = Vec::with_capacity(column.len());
            for idx in 0..column.len() {
                let value = match column.get(idx)? {
                    AnyValue::Date(days) => days_to_date(days),
                    _ => None,
                };
                values.push(value);
            }
            Ok(values)
        }
        _ => Err(type_error(column, "date")),
    }
}

/// Reads an integer code column. Text cells holding integers are accepted;
/// anything else that cannot be read as an integer becomes null.
pub fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = require_column(df, name)?;
    if !(column.dtype().is_integer() || column.dtype().is_float())
        && !matches!(column.dtype(), DataType::String | DataType::Null)
    {
        return Err(type_error(column, "integer"));
    }
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(any_to_i64(column.get(idx)?));
    }
    Ok(values)
}

/// Converts an AnyValue to i64, returning None for non-integer or null values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) if v.fract() == 0.0 => Some(v as i64),
        AnyValue::Float64(v) if v.fract() == 0.0 => Some(v as i64),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Renders a cell for failure explanations.
///
/// Nulls render as `null`, booleans as `true`/`false` and dates as ISO
/// `YYYY-MM-DD`, so the rendered text is lossless for every contractual type.
pub fn any_to_display(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Date(days) => days_to_date(days)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| days.to_string()),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        other => other.to_string(),
    }
}

/// Renders the cell at `idx` of a named column for failure explanations.
pub fn cell_display(df: &DataFrame, name: &str, idx: usize) -> Result<String> {
    let column = require_column(df, name)?;
    Ok(any_to_display(column.get(idx)?))
}

/// Keeps the rows whose mask entry is true.
pub fn filter_rows(df: &DataFrame, mask: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice(PlSmallStr::from_static("mask"), mask);
    Ok(df.filter(&mask)?)
}
