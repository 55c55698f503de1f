//! Identity-card derived fields.
//!
//! A 12-digit IC number starts with the holder's birth date as `YYMMDD`. The
//! card does not encode the century, so it is resolved against the processing
//! date: a two-digit year above the current one belongs to the previous
//! century.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::debug;

use screen_ingest::{Result, text_values};
use screen_model::RuleContext;
use screen_model::columns::{IC_BIRTH_DATE, ICNUMBER, VALID_IC, VALID_IC_DATE, VALID_IC_DIGITS};

/// Fields derived from one IC number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IcDerivation {
    pub birth_date: Option<NaiveDate>,
    pub valid_digits: bool,
    pub valid_date: bool,
}

impl IcDerivation {
    pub fn is_valid(&self) -> bool {
        self.valid_digits && self.valid_date
    }
}

/// True iff the IC number is exactly 12 decimal digits.
pub fn valid_ic_digits(ic: &str) -> bool {
    ic.len() == 12 && ic.bytes().all(|b| b.is_ascii_digit())
}

/// Century (e.g. 1900 or 2000) of a two-digit birth year.
pub fn resolve_century(two_digit_year: i32, today: NaiveDate) -> i32 {
    let current_century = today.year().div_euclid(100) * 100;
    let current_two_digit = today.year().rem_euclid(100);
    if two_digit_year > current_two_digit {
        current_century - 100
    } else {
        current_century
    }
}

/// Derive the birth date and validity flags of one IC number.
///
/// A birth date that would still lie after `today` (same two-digit year, later
/// month or day) is moved to the previous century.
pub fn derive_ic(ic: Option<&str>, today: NaiveDate) -> IcDerivation {
    let Some(ic) = ic else {
        return IcDerivation::default();
    };
    let birth_date = ic
        .get(..6)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| birth_date_from_prefix(prefix, today));
    IcDerivation {
        birth_date,
        valid_digits: valid_ic_digits(ic),
        valid_date: birth_date.is_some(),
    }
}

/// Birth date of a `YYMMDD` prefix.
///
/// The century comes from [`resolve_century`], which compares two-digit years
/// only. On top of that plain rule, a date that still lands after `today` is
/// moved back one more century so no IC yields a future birth date.
fn birth_date_from_prefix(prefix: &str, today: NaiveDate) -> Option<NaiveDate> {
    let two_digit_year: i32 = prefix[0..2].parse().ok()?;
    let month: u32 = prefix[2..4].parse().ok()?;
    let day: u32 = prefix[4..6].parse().ok()?;
    let century = resolve_century(two_digit_year, today);
    let date = NaiveDate::from_ymd_opt(century + two_digit_year, month, day)?;
    if date > today {
        NaiveDate::from_ymd_opt(century - 100 + two_digit_year, month, day)
    } else {
        Some(date)
    }
}

/// Build the general view: the record table plus `ic_birth_date`,
/// `valid_ic_digits`, `valid_ic_date` and `valid_ic`.
pub fn general_view(df: &DataFrame, ctx: &RuleContext) -> Result<DataFrame> {
    let derived: Vec<IcDerivation> = text_values(df, ICNUMBER)?
        .iter()
        .map(|ic| derive_ic(ic.as_deref(), ctx.today))
        .collect();

    let birth_dates: Vec<Option<NaiveDate>> = derived.iter().map(|d| d.birth_date).collect();
    let digits: Vec<bool> = derived.iter().map(|d| d.valid_digits).collect();
    let dates: Vec<bool> = derived.iter().map(|d| d.valid_date).collect();
    let valid: Vec<bool> = derived.iter().map(IcDerivation::is_valid).collect();

    let mut view = df.clone();
    view.with_column(Series::new(IC_BIRTH_DATE.into(), birth_dates))?;
    view.with_column(Series::new(VALID_IC_DIGITS.into(), digits))?;
    view.with_column(Series::new(VALID_IC_DATE.into(), dates))?;
    view.with_column(Series::new(VALID_IC.into(), valid.clone()))?;

    debug!(
        rows = view.height(),
        invalid_ic = valid.iter().filter(|v| !**v).count(),
        "general view built"
    );
    Ok(view)
}
