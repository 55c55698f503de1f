//! Inclusion, identity and history rules of the general view.

use std::sync::LazyLock;

use polars::prelude::DataFrame;
use regex::Regex;

use screen_ingest::{bool_values, int_values, text_values};
use screen_model::RuleContext;
use screen_model::columns::{
    EDUCATION, FAMILY_HISTORY, FAMILY_HISTORY_RELATION, FAMILY_HISTORY_SPECIFY, GENDER_CODE,
    HABITS, ICNUMBER, LESION, MEDICAL_HISTORY, MEDICAL_HISTORY_SPECIFY, OCCUPATION,
    REFER_SPECIALIST, TELEPHONE, VALID_IC,
};
use screen_model::policy::FAMILY_HISTORY as FAMILY_HISTORY_POLICY;
use screen_model::PolicyTable;

use super::{failing_rows, filled};
use crate::error::Result;
use crate::logic::{Verdict, and, ne, not};

/// Mobile or landline number with an optional leading country digit.
static TELEPHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(6?0[1-9])\d{7,9}$").expect("Invalid telephone regex"));

/// Fails when the subject has neither a lesion nor a habit.
pub fn inclusion_lesion_or_habit(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let lesion = bool_values(df, LESION)?;
    let habits = bool_values(df, HABITS)?;
    let verdicts: Vec<Verdict> = lesion
        .iter()
        .zip(&habits)
        .map(|(l, h)| and(not(*l), not(*h)))
        .collect();
    failing_rows(df, &verdicts)
}

pub fn valid_ic(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let verdicts: Vec<Verdict> = bool_values(df, VALID_IC)?
        .into_iter()
        .map(|valid| Some(valid != Some(true)))
        .collect();
    failing_rows(df, &verdicts)
}

/// Fails when the parity of the gender code differs from the parity of the
/// last IC digit.
pub fn ic_vs_gender(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let ics = text_values(df, ICNUMBER)?;
    let genders = int_values(df, GENDER_CODE)?;
    let verdicts: Vec<Verdict> = ics
        .iter()
        .zip(&genders)
        .map(|(ic, gender)| {
            let ic_parity = ic
                .as_deref()
                .and_then(|ic| ic.chars().last())
                .and_then(|c| c.to_digit(10))
                .map(|digit| i64::from(digit % 2));
            ne(gender.map(|g| g.rem_euclid(2)), ic_parity)
        })
        .collect();
    failing_rows(df, &verdicts)
}

/// Fails when a subject with a lesion has no telephone number matching the
/// expected pattern. A missing number does not match.
pub fn lesion_vs_telephone(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let lesion = bool_values(df, LESION)?;
    let phones = text_values(df, TELEPHONE)?;
    let verdicts: Vec<Verdict> = lesion
        .iter()
        .zip(&phones)
        .map(|(l, phone)| {
            let matches = phone
                .as_deref()
                .is_some_and(|phone| TELEPHONE_REGEX.is_match(phone));
            and(*l, Some(!matches))
        })
        .collect();
    failing_rows(df, &verdicts)
}

pub fn lesion_vs_refer_specialist(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let lesion = bool_values(df, LESION)?;
    let refer = bool_values(df, REFER_SPECIALIST)?;
    let verdicts: Vec<Verdict> = lesion.iter().zip(&refer).map(|(l, r)| ne(*l, *r)).collect();
    failing_rows(df, &verdicts)
}

/// Subjects with a lesion need education and occupation recorded.
pub fn lesion_vs_additional_details(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let lesion = bool_values(df, LESION)?;
    let education = filled(&text_values(df, EDUCATION)?);
    let occupation = filled(&text_values(df, OCCUPATION)?);
    let verdicts: Vec<Verdict> = lesion
        .iter()
        .zip(education.iter().zip(&occupation))
        .map(|(l, (edu, occ))| and(*l, Some(!(*edu && *occ))))
        .collect();
    failing_rows(df, &verdicts)
}

/// The medical history flag must match whether the history is specified.
pub fn medihist_completeness(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let flag = bool_values(df, MEDICAL_HISTORY)?;
    let specified = filled(&text_values(df, MEDICAL_HISTORY_SPECIFY)?);
    let verdicts: Vec<Verdict> = flag
        .iter()
        .zip(&specified)
        .map(|(f, s)| ne(*f, Some(*s)))
        .collect();
    failing_rows(df, &verdicts)
}

/// Flag, specification and relation of a family cancer history are all given
/// or all absent.
pub fn famihistcancer_completeness(df: &DataFrame, _ctx: &RuleContext) -> Result<DataFrame> {
    let flag = bool_values(df, FAMILY_HISTORY)?;
    let specified = filled(&text_values(df, FAMILY_HISTORY_SPECIFY)?);
    let related = filled(&text_values(df, FAMILY_HISTORY_RELATION)?);
    let verdicts: Vec<Verdict> = (0..df.height())
        .map(|idx| {
            let key = PolicyTable::join(&[
                flag[idx].map(|f| f.to_string()),
                Some(specified[idx].to_string()),
                Some(related[idx].to_string()),
            ]);
            Some(!FAMILY_HISTORY_POLICY.contains(&key))
        })
        .collect();
    failing_rows(df, &verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{column_text, ctx, flag, frame, text};

    #[test]
    fn inclusion_needs_lesion_or_habit() {
        let df = frame(vec![
            text(ICNUMBER, &[Some("a"), Some("b"), Some("c"), Some("d")]),
            flag(LESION, &[Some(false), Some(true), None, Some(false)]),
            flag(HABITS, &[Some(false), Some(false), Some(false), None]),
        ]);
        let out = inclusion_lesion_or_habit(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(column_text(&out, ICNUMBER), vec![Some("a".to_string())]);
    }

    #[test]
    fn gender_parity() {
        let df = frame(vec![
            text(ICNUMBER, &[Some("850101025678"), Some("850101025677"), Some("850101025678")]),
            text(GENDER_CODE, &[Some("1"), Some("1"), None]),
        ]);
        let out = ic_vs_gender(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(
            column_text(&out, ICNUMBER),
            vec![Some("850101025678".to_string())]
        );
    }

    #[test]
    fn telephone_pattern() {
        let df = frame(vec![
            flag(LESION, &[Some(true), Some(true), Some(true), Some(false), Some(true)]),
            text(
                TELEPHONE,
                &[
                    Some("0123456789"),
                    Some("60123456789"),
                    Some("012-3456789"),
                    Some("x"),
                    None,
                ],
            ),
        ]);
        let out = lesion_vs_telephone(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(
            column_text(&out, TELEPHONE),
            vec![Some("012-3456789".to_string()), None]
        );
    }

    #[test]
    fn refer_specialist_must_follow_lesion() {
        let df = frame(vec![
            flag(LESION, &[Some(true), Some(true), None]),
            flag(REFER_SPECIALIST, &[Some(true), Some(false), Some(true)]),
        ]);
        let out = lesion_vs_refer_specialist(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn additional_details_for_lesion_subjects() {
        let df = frame(vec![
            flag(LESION, &[Some(true), Some(true), Some(false)]),
            text(EDUCATION, &[Some("Secondary"), None, None]),
            text(OCCUPATION, &[Some("Farmer"), Some("Farmer"), None]),
        ]);
        let out = lesion_vs_additional_details(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(column_text(&out, EDUCATION), vec![None]);
    }

    #[test]
    fn history_completeness() {
        let df = frame(vec![
            flag(MEDICAL_HISTORY, &[Some(true), Some(false), Some(false)]),
            text(MEDICAL_HISTORY_SPECIFY, &[None, None, Some("Diabetes")]),
            flag(FAMILY_HISTORY, &[Some(true), Some(false), None]),
            text(FAMILY_HISTORY_SPECIFY, &[Some("Oral"), None, None]),
            text(FAMILY_HISTORY_RELATION, &[None, None, None]),
        ]);
        let medical = medihist_completeness(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(medical.height(), 2);

        let family = famihistcancer_completeness(&df, &ctx(2025, 1, 1)).unwrap();
        assert_eq!(
            bool_values(&family, FAMILY_HISTORY).unwrap(),
            vec![Some(true), None]
        );
    }
}
