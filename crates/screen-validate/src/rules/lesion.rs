//! Lesion view rules.

use std::collections::HashMap;

use polars::prelude::*;

use screen_ingest::{bool_values, text_values};
use screen_model::columns::{LESION, LESION_FILLED, LESION_SITES, LESION_SIZE, LESION_TYPE};
use screen_model::{RecordKey, RuleContext};

use super::{failing_rows, filled, with_working_columns};
use crate::annotate::record_keys;
use crate::error::Result;
use crate::logic::{Verdict, and, not, or};

/// Number of filled slots of the record a lesion row belongs to.
pub const LESION_COUNT: &str = "lesion_count";
pub const TYPE_FILLED: &str = "type_filled";
pub const SIZE_FILLED: &str = "size_filled";
pub const SITE_FILLED: &str = "site_filled";
pub const IS_COMPLETE: &str = "is_complete";

/// The lesion flag must agree with whether any slot of the record is filled.
///
/// Every slot row of a failing record is reported.
pub fn lesion_vs_lesion_cols(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let keys = record_keys(df)?;
    let lesion = bool_values(df, LESION)?;
    let slot_filled = bool_values(df, LESION_FILLED)?;

    let mut counts: HashMap<&RecordKey, u32> = HashMap::new();
    for (key, is_filled) in keys.iter().zip(&slot_filled) {
        let count = counts.entry(key).or_default();
        if *is_filled == Some(true) {
            *count += 1;
        }
    }
    let lesion_count: Vec<u32> = keys
        .iter()
        .map(|key| counts.get(key).copied().unwrap_or_default())
        .collect();

    let verdicts: Vec<Verdict> = lesion
        .iter()
        .zip(&lesion_count)
        .map(|(l, count)| {
            or(
                and(*l, Some(*count == 0)),
                and(not(*l), Some(*count > 0)),
            )
        })
        .collect();

    let view = with_working_columns(df, vec![Series::new(LESION_COUNT.into(), lesion_count)])?;
    failing_rows(&view, &verdicts)
}

/// A filled slot must have its type, its size and at least one site.
///
/// Descriptors are read as the view carries them: a "not applicable"
/// sentinel counts as a value unless the view was built with
/// [`NotApplicableMode::ToNull`](screen_model::NotApplicableMode::ToNull).
pub fn lesion_cols_completeness(view: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let slot_filled = bool_values(view, LESION_FILLED)?;
    let type_filled = filled(&text_values(view, LESION_TYPE)?);
    let size_filled = filled(&text_values(view, LESION_SIZE)?);
    let mut site_filled = vec![false; view.height()];
    for name in LESION_SITES {
        for (any, value) in site_filled.iter_mut().zip(text_values(view, name)?) {
            *any |= value.is_some();
        }
    }
    let is_complete: Vec<bool> = (0..view.height())
        .map(|idx| type_filled[idx] && size_filled[idx] && site_filled[idx])
        .collect();

    let verdicts: Vec<Verdict> = slot_filled
        .iter()
        .zip(&is_complete)
        .map(|(f, complete)| and(*f, Some(!complete)))
        .collect();

    let view = with_working_columns(
        view,
        vec![
            Series::new(TYPE_FILLED.into(), type_filled),
            Series::new(SIZE_FILLED.into(), size_filled),
            Series::new(SITE_FILLED.into(), site_filled),
            Series::new(IS_COMPLETE.into(), is_complete),
        ],
    )?;
    failing_rows(&view, &verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use screen_model::{NotApplicableMode, ReshapeOptions};
    use screen_model::columns::{DATESCREEN, DISTRICT, ICNUMBER, LESION_ID, LOCATION};
    use screen_model::lesion::{LESION_SLOTS, SITE_NOT_APPLICABLE, TYPE_SIZE_NOT_APPLICABLE};
    use screen_transform::lesion_view;

    use crate::rules::test_support::{column_text, ctx, date, dates, flag, frame, text};

    /// Two records, A and B, whose first slot carries the given
    /// (type, size, site A) values; every other descriptor is empty.
    fn wide(lesion: [Option<bool>; 2], slot1: [[Option<&str>; 3]; 2]) -> DataFrame {
        let mut columns = vec![
            text(DISTRICT, &[Some("KLANG"), Some("KLANG")]),
            text(LOCATION, &[Some("KK"), Some("KK")]),
            dates(DATESCREEN, &[date(2024, 1, 5), date(2024, 1, 5)]),
            text(ICNUMBER, &[Some("A"), Some("B")]),
            flag(LESION, &lesion),
        ];
        for slot in &LESION_SLOTS {
            for name in slot.descriptors() {
                let member = match name {
                    "TYPE1" => Some(0),
                    "SIZE1" => Some(1),
                    "SITE1A" => Some(2),
                    _ => None,
                };
                let values: Vec<Option<&str>> = match member {
                    Some(m) => vec![slot1[0][m], slot1[1][m]],
                    None => vec![None, None],
                };
                columns.push(text(name, &values));
            }
        }
        frame(columns)
    }

    #[test]
    fn lesion_flag_without_filled_slot() {
        let table = wide(
            [Some(true), Some(false)],
            [[None, None, None], [None, None, None]],
        );
        let view = lesion_view(&table, &ReshapeOptions::new()).unwrap();
        let out = lesion_vs_lesion_cols(&view, &ctx(2025, 1, 1)).unwrap();
        // All four slot rows of record A fail.
        assert_eq!(out.height(), 4);
        assert!(column_text(&out, ICNUMBER)
            .iter()
            .all(|ic| ic.as_deref() == Some("A")));
    }

    #[test]
    fn filled_slot_without_lesion_flag() {
        let table = wide(
            [Some(false), None],
            [[Some("Ulcer"), None, None], [Some("Ulcer"), None, None]],
        );
        let view = lesion_view(&table, &ReshapeOptions::new()).unwrap();
        let out = lesion_vs_lesion_cols(&view, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(out.height(), 4);
        let counts: Vec<Option<u32>> = out
            .column(LESION_COUNT)
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .collect();
        assert!(counts.iter().all(|count| *count == Some(1)));
    }

    #[test]
    fn completeness_of_filled_slots() {
        let table = wide(
            [Some(true), Some(true)],
            [
                [Some("Ulcer"), Some("< 1 cm"), Some("Tongue")],
                [Some("Ulcer"), None, Some("Tongue")],
            ],
        );
        let view = lesion_view(&table, &ReshapeOptions::new()).unwrap();
        let out = lesion_cols_completeness(&view, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(column_text(&out, ICNUMBER), vec![Some("B".to_string())]);
        assert_eq!(column_text(&out, LESION_ID), vec![Some("1".to_string())]);
        assert_eq!(
            bool_values(&out, SIZE_FILLED).unwrap(),
            vec![Some(false)]
        );
    }

    #[test]
    fn sentinel_size_follows_not_applicable_mode() {
        let table = wide(
            [Some(true), Some(true)],
            [
                [Some("Ulcer"), Some(TYPE_SIZE_NOT_APPLICABLE), Some("Tongue")],
                [Some("Ulcer"), Some("< 1 cm"), Some("Tongue")],
            ],
        );

        let kept = lesion_view(&table, &ReshapeOptions::new()).unwrap();
        let out = lesion_cols_completeness(&kept, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(out.height(), 0);

        let options = ReshapeOptions::new().with_not_applicable(NotApplicableMode::ToNull);
        let nulled = lesion_view(&table, &options).unwrap();
        let out = lesion_cols_completeness(&nulled, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(column_text(&out, ICNUMBER), vec![Some("A".to_string())]);
        assert_eq!(
            bool_values(&out, SIZE_FILLED).unwrap(),
            vec![Some(false)]
        );
    }

    #[test]
    fn sentinel_only_slot_depends_on_not_applicable_mode() {
        let table = wide(
            [Some(true), Some(true)],
            [
                [Some(TYPE_SIZE_NOT_APPLICABLE), Some(TYPE_SIZE_NOT_APPLICABLE), Some(SITE_NOT_APPLICABLE)],
                [Some("Ulcer"), Some("< 1 cm"), Some("Tongue")],
            ],
        );

        // Kept sentinels make a complete slot.
        let kept = lesion_view(&table, &ReshapeOptions::new()).unwrap();
        let out = lesion_cols_completeness(&kept, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(out.height(), 0);

        // Nulled sentinels leave an unfilled slot, which completeness skips.
        let options = ReshapeOptions::new().with_not_applicable(NotApplicableMode::ToNull);
        let nulled = lesion_view(&table, &options).unwrap();
        let out = lesion_cols_completeness(&nulled, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(out.height(), 0);
    }
}
