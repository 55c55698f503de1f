//! Rule functions and the rule tables of each group.
//!
//! Each function reads the columns it needs, computes a verdict per row and
//! returns the failing rows. Functions are pure and do not depend on row
//! order.

mod dates;
mod general;
mod habit;
mod lesion;
mod quit;

use polars::prelude::*;

use screen_ingest::filter_rows;
use screen_model::RuleId;
use screen_model::columns::{
    ALCOHOL, ALCOHOL_ADVISED, ALCOHOL_QUIT, ATTEND_FIRST_APPT, BETEL, BETEL_ADVISED, BETEL_QUIT,
    DATE_REFERRED, DATE_REFERRED_QUIT, DATE_SEEN_SPECIALIST, DATEBIRTH, DATESCREEN, EDUCATION,
    FAMILY_HISTORY, FAMILY_HISTORY_RELATION, FAMILY_HISTORY_SPECIFY, GENDER_CODE, HABITS,
    IC_BIRTH_DATE, ICNUMBER, INTERVENTION_STATUS, LESION, LESION_SITES, LESION_SIZE, LESION_TYPE,
    MEDICAL_HISTORY, MEDICAL_HISTORY_SPECIFY, OCCUPATION, QUIT_APPT_DATE, READY_QUIT_TOBACCO,
    REFER_SPECIALIST, REFERRAL_QUIT, TELEPHONE, TOBACCO, TOBACCO_ADVISED, TOBACCO_QUIT,
    VALID_IC_DATE, VALID_IC_DIGITS,
};

use crate::error::Result;
use crate::logic::{Verdict, fails};
use crate::rule::{Guard, Rule};

pub use lesion::{IS_COMPLETE, LESION_COUNT, SITE_FILLED, SIZE_FILLED, TYPE_FILLED};

/// Rules of the general group, in catalogue order.
pub static GENERAL_RULES: &[Rule] = &[
    Rule::new(
        RuleId::InclusionLesionOrHabit,
        general::inclusion_lesion_or_habit,
        &[LESION, HABITS],
    ),
    Rule::new(
        RuleId::ValidIc,
        general::valid_ic,
        &[ICNUMBER, VALID_IC_DIGITS, VALID_IC_DATE],
    ),
    Rule::new(
        RuleId::IcVsGender,
        general::ic_vs_gender,
        &[ICNUMBER, GENDER_CODE],
    )
    .guarded(Guard::ValidIc),
    Rule::new(
        RuleId::LesionVsTelephone,
        general::lesion_vs_telephone,
        &[LESION, TELEPHONE],
    ),
    Rule::new(
        RuleId::IcVsDatebirth,
        dates::ic_vs_datebirth,
        &[DATEBIRTH, IC_BIRTH_DATE],
    )
    .guarded(Guard::ValidIc),
    Rule::new(
        RuleId::DatescreenVsDaterefer,
        dates::datescreen_vs_daterefer,
        &[DATESCREEN, DATE_REFERRED, DATE_REFERRED_QUIT],
    ),
    Rule::new(
        RuleId::DatereferVsDateSeenSpecialist,
        dates::daterefer_vs_date_seen_specialist,
        &[DATE_REFERRED, DATE_SEEN_SPECIALIST],
    ),
    Rule::new(
        RuleId::DatereferQuitVsQuitAppt,
        dates::daterefer_quit_vs_quit_appt,
        &[DATE_REFERRED_QUIT, QUIT_APPT_DATE],
    ),
    Rule::new(
        RuleId::HabitVsHabitCols,
        habit::habit_vs_habit_cols,
        &[HABITS, TOBACCO, BETEL, ALCOHOL],
    ),
    Rule::new(
        RuleId::TobaccoTalliness,
        habit::tobacco_talliness,
        &[TOBACCO, TOBACCO_ADVISED, TOBACCO_QUIT],
    ),
    Rule::new(
        RuleId::AlcoholTalliness,
        habit::alcohol_talliness,
        &[ALCOHOL, ALCOHOL_ADVISED, ALCOHOL_QUIT],
    ),
    Rule::new(
        RuleId::BetelTalliness,
        habit::betel_talliness,
        &[BETEL, BETEL_ADVISED, BETEL_QUIT],
    ),
    Rule::new(
        RuleId::MedihistCompleteness,
        general::medihist_completeness,
        &[MEDICAL_HISTORY, MEDICAL_HISTORY_SPECIFY],
    ),
    Rule::new(
        RuleId::FamihistcancerCompleteness,
        general::famihistcancer_completeness,
        &[FAMILY_HISTORY, FAMILY_HISTORY_SPECIFY, FAMILY_HISTORY_RELATION],
    ),
    Rule::new(
        RuleId::LesionVsReferSpecialist,
        general::lesion_vs_refer_specialist,
        &[LESION, REFER_SPECIALIST],
    ),
    Rule::new(
        RuleId::LesionVsAdditionalDetails,
        general::lesion_vs_additional_details,
        &[LESION, EDUCATION, OCCUPATION],
    ),
    Rule::new(
        RuleId::ReferralQuitVsReadyQuit,
        quit::referral_quit_vs_ready_quit,
        &[REFERRAL_QUIT, READY_QUIT_TOBACCO],
    ),
    Rule::new(
        RuleId::ReferralQuitVsDateReferredVsFirstApptDate,
        quit::referral_quit_vs_dates,
        &[REFERRAL_QUIT, DATE_REFERRED_QUIT, QUIT_APPT_DATE],
    ),
    Rule::new(
        RuleId::AttendFirstApptNullCheck,
        quit::attend_first_appt_null_check,
        &[QUIT_APPT_DATE, ATTEND_FIRST_APPT],
    ),
    Rule::new(
        RuleId::AttendFirstApptVsInterventionStatus,
        quit::attend_first_appt_vs_intervention_status,
        &[ATTEND_FIRST_APPT, INTERVENTION_STATUS],
    ),
];

/// Rules of the lesion group, in catalogue order.
pub static LESION_RULES: &[Rule] = &[
    Rule::new(
        RuleId::LesionVsLesionCols,
        lesion::lesion_vs_lesion_cols,
        &[
            LESION,
            LESION_COUNT,
            LESION_TYPE,
            LESION_SIZE,
            LESION_SITES[0],
            LESION_SITES[1],
            LESION_SITES[2],
            LESION_SITES[3],
        ],
    ),
    Rule::new(
        RuleId::LesionColsCompleteness,
        lesion::lesion_cols_completeness,
        &[IS_COMPLETE, TYPE_FILLED, SIZE_FILLED, SITE_FILLED],
    ),
];

/// Keep the rows whose verdict is a definite failure.
fn failing_rows(df: &DataFrame, verdicts: &[Verdict]) -> Result<DataFrame> {
    let mask: Vec<bool> = verdicts.iter().copied().map(fails).collect();
    Ok(filter_rows(df, &mask)?)
}

/// Copy of `df` with working columns added or replaced.
fn with_working_columns(df: &DataFrame, columns: Vec<Series>) -> Result<DataFrame> {
    let mut out = df.clone();
    for column in columns {
        out.with_column(column)?;
    }
    Ok(out)
}

/// Fill state of each value.
fn filled<T>(values: &[Option<T>]) -> Vec<bool> {
    values.iter().map(Option::is_some).collect()
}
