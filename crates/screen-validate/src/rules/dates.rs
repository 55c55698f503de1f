//! Date consistency rules.

use polars::prelude::DataFrame;

use screen_ingest::date_values;
use screen_model::RuleContext;
use screen_model::columns::{
    DATE_REFERRED, DATE_REFERRED_QUIT, DATE_SEEN_SPECIALIST, DATEBIRTH, DATESCREEN,
    IC_BIRTH_DATE, QUIT_APPT_DATE,
};

use super::failing_rows;
use crate::error::Result;
use crate::logic::{Verdict, and, lt, ne, not, or};

/// Birth date derived from the IC number must equal the recorded birth date.
pub fn ic_vs_datebirth(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let stated = date_values(df, DATEBIRTH)?;
    let derived = date_values(df, IC_BIRTH_DATE)?;
    let verdicts: Vec<Verdict> = stated
        .iter()
        .zip(&derived)
        .map(|(s, d)| ne(*s, *d))
        .collect();
    failing_rows(df, &verdicts)
}

/// Neither referral may precede the screening.
pub fn datescreen_vs_daterefer(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let screened = date_values(df, DATESCREEN)?;
    let referred = date_values(df, DATE_REFERRED)?;
    let referred_quit = date_values(df, DATE_REFERRED_QUIT)?;
    let verdicts: Vec<Verdict> = (0..df.height())
        .map(|idx| {
            or(
                lt(referred[idx], screened[idx]),
                lt(referred_quit[idx], screened[idx]),
            )
        })
        .collect();
    failing_rows(df, &verdicts)
}

pub fn daterefer_vs_date_seen_specialist(
    df: &DataFrame,
    _ctx: &RuleContext,
) -> Result<DataFrame> {
    let referred = date_values(df, DATE_REFERRED)?;
    let seen = date_values(df, DATE_SEEN_SPECIALIST)?;
    let verdicts: Vec<Verdict> = seen
        .iter()
        .zip(&referred)
        .map(|(s, r)| lt(*s, *r))
        .collect();
    failing_rows(df, &verdicts)
}

/// Among rows with a quit-service referral or appointment date, both dates
/// must be given and the appointment must not precede the referral.
pub fn daterefer_quit_vs_quit_appt(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let referred = date_values(df, DATE_REFERRED_QUIT)?;
    let appointment = date_values(df, QUIT_APPT_DATE)?;
    let verdicts: Vec<Verdict> = referred
        .iter()
        .zip(&appointment)
        .map(|(r, a)| {
            let considered = r.is_some() || a.is_some();
            let complete = r.is_some() == a.is_some();
            let ordered = not(lt(*a, *r));
            and(Some(considered), or(Some(!complete), not(ordered)))
        })
        .collect();
    failing_rows(df, &verdicts)
}
