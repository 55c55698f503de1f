//! Habit rules.

use polars::prelude::DataFrame;

use screen_ingest::{bool_values, text_values};
use screen_model::RuleContext;
use screen_model::columns::{
    ALCOHOL, ALCOHOL_ADVISED, ALCOHOL_QUIT, BETEL, BETEL_ADVISED, BETEL_QUIT, HABITS,
    HABIT_STATUS_COLUMNS, TOBACCO, TOBACCO_ADVISED, TOBACCO_QUIT,
};
use screen_model::policy::{HABIT_DETAIL, HABIT_NONE};

use super::failing_rows;
use crate::error::Result;
use crate::logic::{Verdict, and, ne, or};

/// The habits flag must agree with the three habit status columns.
///
/// Completeness: a subject with habits has all three statuses filled.
/// Correctness: the flag equals "any status is a current or past habit".
pub fn habit_vs_habit_cols(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let habits = bool_values(df, HABITS)?;
    let statuses = HABIT_STATUS_COLUMNS
        .iter()
        .map(|name| text_values(df, name))
        .collect::<screen_ingest::Result<Vec<_>>>()?;

    let verdicts: Vec<Verdict> = (0..df.height())
        .map(|idx| {
            let all_filled = statuses.iter().all(|column| column[idx].is_some());
            let has_habit = statuses
                .iter()
                .any(|column| column[idx].as_deref().is_some_and(|s| s != HABIT_NONE));
            let incomplete = and(habits[idx], Some(!all_filled));
            let incorrect = ne(habits[idx], Some(has_habit));
            or(incomplete, incorrect)
        })
        .collect();
    failing_rows(df, &verdicts)
}

/// The (status, advised, quit) tuple of one substance must be a whitelisted
/// combination.
fn tally(df: &DataFrame, columns: [&str; 3]) -> Result<DataFrame> {
    let [status, advised, quit] = columns.map(|name| text_values(df, name));
    let (status, advised, quit) = (status?, advised?, quit?);
    let verdicts: Vec<Verdict> = (0..df.height())
        .map(|idx| {
            let tuple = [&status[idx], &advised[idx], &quit[idx]].map(Option::as_deref);
            Some(!HABIT_DETAIL.allows(&tuple))
        })
        .collect();
    failing_rows(df, &verdicts)
}

pub fn tobacco_talliness(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    tally(df, [TOBACCO, TOBACCO_ADVISED, TOBACCO_QUIT])
}

pub fn alcohol_talliness(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    tally(df, [ALCOHOL, ALCOHOL_ADVISED, ALCOHOL_QUIT])
}

pub fn betel_talliness(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    tally(df, [BETEL, BETEL_ADVISED, BETEL_QUIT])
}
