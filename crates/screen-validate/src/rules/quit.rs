//! Quit-service referral and first appointment rules.

use polars::prelude::DataFrame;

use screen_ingest::{bool_values, date_values, text_values};
use screen_model::RuleContext;
use screen_model::columns::{
    ATTEND_FIRST_APPT, DATE_REFERRED_QUIT, INTERVENTION_STATUS, QUIT_APPT_DATE,
    READY_QUIT_TOBACCO, REFERRAL_QUIT,
};
use screen_model::policy::{ATTENDANCE_INTERVENTION, YES};

use super::failing_rows;
use crate::error::Result;
use crate::logic::{Verdict, and, lt, ne, or};

/// Only subjects ready to quit tobacco are referred to quit services.
pub fn referral_quit_vs_ready_quit(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let referral = bool_values(df, REFERRAL_QUIT)?;
    let ready = text_values(df, READY_QUIT_TOBACCO)?;
    let verdicts: Vec<Verdict> = referral
        .iter()
        .zip(&ready)
        .map(|(r, ready)| and(*r, ne(ready.as_deref(), Some(YES))))
        .collect();
    failing_rows(df, &verdicts)
}

/// The referral flag must match both the referral date and the first
/// appointment date being filled.
pub fn referral_quit_vs_dates(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let referral = bool_values(df, REFERRAL_QUIT)?;
    let referred = date_values(df, DATE_REFERRED_QUIT)?;
    let appointment = date_values(df, QUIT_APPT_DATE)?;
    let verdicts: Vec<Verdict> = (0..df.height())
        .map(|idx| {
            or(
                ne(referral[idx], Some(referred[idx].is_some())),
                ne(referral[idx], Some(appointment[idx].is_some())),
            )
        })
        .collect();
    failing_rows(df, &verdicts)
}

/// Attendance must be recorded once the first appointment has passed.
pub fn attend_first_appt_null_check(df: &DataFrame, ctx: &RuleContext) -> Result<DataFrame> {
    let appointment = date_values(df, QUIT_APPT_DATE)?;
    let attendance = text_values(df, ATTEND_FIRST_APPT)?;
    let verdicts: Vec<Verdict> = appointment
        .iter()
        .zip(&attendance)
        .map(|(appt, attended)| and(lt(*appt, Some(ctx.today)), Some(attended.is_none())))
        .collect();
    failing_rows(df, &verdicts)
}

/// Attendance and intervention status must form a whitelisted pair.
pub fn attend_first_appt_vs_intervention_status(
    df: &DataFrame,
    _ctx: &RuleContext,
) -> Result<DataFrame> {
    let attendance = text_values(df, ATTEND_FIRST_APPT)?;
    let status = text_values(df, INTERVENTION_STATUS)?;
    let verdicts: Vec<Verdict> = attendance
        .iter()
        .zip(&status)
        .map(|(a, s)| Some(!ATTENDANCE_INTERVENTION.allows(&[a.as_deref(), s.as_deref()])))
        .collect();
    failing_rows(df, &verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{ctx, date, dates, flag, frame, text};
    use screen_model::policy::{INTERVENTION_COMPLETED, INTERVENTION_ONGOING, NO};

    #[test]
    fn referral_requires_readiness() {
        let df = frame(vec![
            flag(REFERRAL_QUIT, &[Some(true), Some(true), Some(false)]),
            text(READY_QUIT_TOBACCO, &[Some(YES), Some(NO), Some(NO)]),
        ]);
        let out = referral_quit_vs_ready_quit(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(
            text_values(&out, READY_QUIT_TOBACCO).unwrap(),
            vec![Some(NO.to_string())]
        );
    }

    #[test]
    fn referral_without_referral_date() {
        let df = frame(vec![
            flag(REFERRAL_QUIT, &[Some(true), Some(true), Some(false)]),
            dates(DATE_REFERRED_QUIT, &[None, date(2024, 5, 1), None]),
            dates(QUIT_APPT_DATE, &[date(2024, 5, 10), date(2024, 5, 10), None]),
        ]);
        let out = referral_quit_vs_dates(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(date_values(&out, DATE_REFERRED_QUIT).unwrap(), vec![None]);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn past_appointment_needs_attendance() {
        let df = frame(vec![
            dates(QUIT_APPT_DATE, &[date(2024, 12, 31), date(2025, 1, 1), None, date(2024, 1, 1)]),
            text(ATTEND_FIRST_APPT, &[None, None, None, Some(YES)]),
        ]);
        let out = attend_first_appt_null_check(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(
            date_values(&out, QUIT_APPT_DATE).unwrap(),
            vec![date(2024, 12, 31)]
        );
    }

    #[test]
    fn attendance_status_pairs() {
        let df = frame(vec![
            text(ATTEND_FIRST_APPT, &[Some(YES), Some(NO), Some(NO), None]),
            text(
                INTERVENTION_STATUS,
                &[Some(INTERVENTION_COMPLETED), None, Some(INTERVENTION_ONGOING), None],
            ),
        ]);
        let out = attend_first_appt_vs_intervention_status(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(
            text_values(&out, INTERVENTION_STATUS).unwrap(),
            vec![Some(INTERVENTION_ONGOING.to_string())]
        );
    }
}
