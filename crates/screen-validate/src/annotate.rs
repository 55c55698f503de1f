//! Failure annotation.
//!
//! Turns the failing rows returned by a rule body into uniform
//! [`FailureRecord`]s: the record key, the lesion slot for lesion-scope rules,
//! and a [`FailureDescriptor`] listing `"COLUMN: value"` for each explanation
//! column of the rule.

use polars::prelude::DataFrame;

use screen_ingest::{cell_display, date_values, require_columns, text_values};
use screen_model::columns::{DATESCREEN, DISTRICT, ICNUMBER, LESION_ID, LOCATION};
use screen_model::{Category, FailureDescriptor, FailureRecord, RecordKey};

use crate::error::Result;
use crate::rule::Rule;

/// Read the composite record key of every row.
pub fn record_keys(df: &DataFrame) -> Result<Vec<RecordKey>> {
    let districts = text_values(df, DISTRICT)?;
    let locations = text_values(df, LOCATION)?;
    let dates = date_values(df, DATESCREEN)?;
    let ics = text_values(df, ICNUMBER)?;
    Ok(districts
        .into_iter()
        .zip(locations)
        .zip(dates)
        .zip(ics)
        .map(|(((district, location), date_screen), ic_number)| RecordKey {
            district,
            location,
            date_screen,
            ic_number,
        })
        .collect())
}

/// Annotate the failing rows of one rule.
///
/// The rows are only read; the business columns are carried into the
/// descriptor as rendered text.
pub fn annotate(rule: &Rule, category: Category, failing: &DataFrame) -> Result<Vec<FailureRecord>> {
    if failing.height() == 0 {
        return Ok(Vec::new());
    }
    require_columns(failing, rule.explain)?;
    let keys = record_keys(failing)?;
    let lesion_ids = if category.has_lesion_id() {
        text_values(failing, LESION_ID)?
    } else {
        vec![None; failing.height()]
    };

    let mut records = Vec::with_capacity(failing.height());
    for (idx, (key, lesion_id)) in keys.into_iter().zip(lesion_ids).enumerate() {
        let data = rule
            .explain
            .iter()
            .map(|column| {
                cell_display(failing, column, idx)
                    .map(|value| FailureDescriptor::entry(column, &value))
            })
            .collect::<screen_ingest::Result<Vec<String>>>()?;
        records.push(FailureRecord {
            key,
            lesion_id,
            fail: FailureDescriptor::new(rule.id, data),
        });
    }
    Ok(records)
}
