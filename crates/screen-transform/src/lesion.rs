//! Lesion view.
//!
//! The data sheet carries four fixed descriptor groups, one per lesion slot.
//! The lesion view stacks them into one row per (record, slot) with the slot
//! columns renamed to a common set: `type`, `size` and `site_A`..`site_D`.

use polars::prelude::*;
use tracing::debug;

use screen_ingest::{Result, require_columns, text_values};
use screen_model::ReshapeOptions;
use screen_model::columns::{
    ID_COLUMNS, LESION, LESION_FILLED, LESION_ID, LESION_SITES, LESION_SIZE, LESION_TYPE,
};
use screen_model::lesion::{LESION_SLOTS, SITE_NOT_APPLICABLE, TYPE_SIZE_NOT_APPLICABLE};

/// Descriptor columns of the lesion view, in slot-group order.
pub const VIEW_DESCRIPTORS: [&str; 6] = [
    LESION_TYPE,
    LESION_SIZE,
    LESION_SITES[0],
    LESION_SITES[1],
    LESION_SITES[2],
    LESION_SITES[3],
];

/// Stack the four lesion slot groups into one row per record and slot.
///
/// Output columns: the identifying key columns, `LESION`, `lesion_id` and the
/// six renamed descriptors (as text). Rows are ordered slot-major.
pub fn explode_lesions(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, &ID_COLUMNS)?;
    require_columns(df, &[LESION])?;

    let height = df.height();
    let mut stacked: Option<DataFrame> = None;
    for slot in &LESION_SLOTS {
        let sources = slot.descriptors();
        require_columns(df, &sources)?;

        let mut columns: Vec<Column> = Vec::with_capacity(ID_COLUMNS.len() + 8);
        for name in ID_COLUMNS.iter().chain(std::iter::once(&LESION)) {
            columns.push(df.column(name)?.clone());
        }
        columns.push(Series::new(LESION_ID.into(), vec![slot.id.as_str(); height]).into_column());
        for (source, target) in sources.iter().zip(VIEW_DESCRIPTORS) {
            let mut column = df.column(source)?.cast(&DataType::String)?;
            column.rename(target.into());
            columns.push(column);
        }

        let frame = DataFrame::new(columns)?;
        match stacked.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&frame)?;
            }
            None => stacked = Some(frame),
        }
    }

    let view = stacked.unwrap_or_default();
    debug!(records = height, rows = view.height(), "lesion slots exploded");
    Ok(view)
}

/// Replace "not applicable" sentinels with nulls in the view descriptors.
pub fn normalize_not_applicable(df: &DataFrame) -> Result<DataFrame> {
    let mut view = df.clone();
    for name in VIEW_DESCRIPTORS {
        let sentinel = if name == LESION_TYPE || name == LESION_SIZE {
            TYPE_SIZE_NOT_APPLICABLE
        } else {
            SITE_NOT_APPLICABLE
        };
        let values: Vec<Option<String>> = text_values(df, name)?
            .into_iter()
            .map(|value| value.filter(|v| v != sentinel))
            .collect();
        view.with_column(Series::new(name.into(), values))?;
    }
    Ok(view)
}

/// Add `lesion_filled`: true iff any of the six descriptors is non-null.
pub fn compute_lesion_filled(df: &DataFrame) -> Result<DataFrame> {
    let mut filled = vec![false; df.height()];
    for name in VIEW_DESCRIPTORS {
        for (slot, value) in filled.iter_mut().zip(text_values(df, name)?) {
            *slot |= value.is_some();
        }
    }
    let mut view = df.clone();
    view.with_column(Series::new(LESION_FILLED.into(), filled))?;
    Ok(view)
}

/// Build the lesion view of a record table.
///
/// Sentinel normalisation runs before the fill computation when the options
/// enable it; by default sentinels count as filled values.
pub fn lesion_view(df: &DataFrame, options: &ReshapeOptions) -> Result<DataFrame> {
    let exploded = explode_lesions(df)?;
    let exploded = if options.normalizes_not_applicable() {
        normalize_not_applicable(&exploded)?
    } else {
        exploded
    };
    compute_lesion_filled(&exploded)
}
