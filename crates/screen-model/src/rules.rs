//! Rule catalogue.
//!
//! Every validation rule has a stable name and a stable ordinal. Both are used
//! only to identify failures in persisted datasets and compiled reports, never
//! to drive business logic.
//!
//! Ordinals are append-only: a new rule takes the next free number and existing
//! numbers are never reused or renumbered, because historical store datasets
//! reference them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::failure::Category;

/// Identity of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum RuleId {
    // General information
    InclusionLesionOrHabit = 1,
    ValidIc = 2,
    IcVsGender = 3,
    LesionVsTelephone = 4,

    // Dates
    IcVsDatebirth = 5,
    DatescreenVsDaterefer = 6,
    DatereferVsDateSeenSpecialist = 7,
    DatereferQuitVsQuitAppt = 8,

    // Habits
    HabitVsHabitCols = 9,
    TobaccoTalliness = 10,
    AlcoholTalliness = 11,
    BetelTalliness = 12,

    // History
    MedihistCompleteness = 13,
    FamihistcancerCompleteness = 14,

    // Lesion
    LesionVsReferSpecialist = 15,
    LesionVsLesionCols = 16,
    LesionColsCompleteness = 17,

    // Additional details (education and occupation)
    LesionVsAdditionalDetails = 18,

    // Quit services
    ReferralQuitVsReadyQuit = 19,
    ReferralQuitVsDateReferredVsFirstApptDate = 20,
    AttendFirstApptNullCheck = 21,
    AttendFirstApptVsInterventionStatus = 22,
}

impl RuleId {
    /// All rules in ordinal order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::InclusionLesionOrHabit,
            Self::ValidIc,
            Self::IcVsGender,
            Self::LesionVsTelephone,
            Self::IcVsDatebirth,
            Self::DatescreenVsDaterefer,
            Self::DatereferVsDateSeenSpecialist,
            Self::DatereferQuitVsQuitAppt,
            Self::HabitVsHabitCols,
            Self::TobaccoTalliness,
            Self::AlcoholTalliness,
            Self::BetelTalliness,
            Self::MedihistCompleteness,
            Self::FamihistcancerCompleteness,
            Self::LesionVsReferSpecialist,
            Self::LesionVsLesionCols,
            Self::LesionColsCompleteness,
            Self::LesionVsAdditionalDetails,
            Self::ReferralQuitVsReadyQuit,
            Self::ReferralQuitVsDateReferredVsFirstApptDate,
            Self::AttendFirstApptNullCheck,
            Self::AttendFirstApptVsInterventionStatus,
        ]
    }

    /// Stable ordinal persisted as `rule_number`.
    pub const fn ordinal(self) -> u16 {
        self as u16
    }

    /// Stable name persisted as `rule`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InclusionLesionOrHabit => "INCLUSION_LESION_OR_HABIT",
            Self::ValidIc => "VALID_IC",
            Self::IcVsGender => "IC_VS_GENDER",
            Self::LesionVsTelephone => "LESION_VS_TELEPHONE",
            Self::IcVsDatebirth => "IC_VS_DATEBIRTH",
            Self::DatescreenVsDaterefer => "DATESCREEN_VS_DATEREFER",
            Self::DatereferVsDateSeenSpecialist => "DATEREFER_VS_DATE_SEEN_SPECIALIST",
            Self::DatereferQuitVsQuitAppt => "DATEREFER_QUIT_VS_QUIT_APPT",
            Self::HabitVsHabitCols => "HABIT_VS_HABIT_COLS",
            Self::TobaccoTalliness => "TOBACCO_TALLINESS",
            Self::AlcoholTalliness => "ALCOHOL_TALLINESS",
            Self::BetelTalliness => "BETEL_TALLINESS",
            Self::MedihistCompleteness => "MEDIHIST_COMPLETENESS",
            Self::FamihistcancerCompleteness => "FAMIHISTCANCER_COMPLETENESS",
            Self::LesionVsReferSpecialist => "LESION_VS_REFER_SPECIALIST",
            Self::LesionVsLesionCols => "LESION_VS_LESION_COLS",
            Self::LesionColsCompleteness => "LESION_COLS_COMPLETENESS",
            Self::LesionVsAdditionalDetails => "LESION_VS_ADDITIONAL_DETAILS",
            Self::ReferralQuitVsReadyQuit => "REFERRAL_QUIT_VS_READY_QUIT",
            Self::ReferralQuitVsDateReferredVsFirstApptDate => {
                "REFERRAL_QUIT_VS_DATE_REFERRED_VS_FIRST_APPT_DATE"
            }
            Self::AttendFirstApptNullCheck => "ATTEND_FIRST_APPT_NULL_CHECK",
            Self::AttendFirstApptVsInterventionStatus => {
                "ATTEND_FIRST_APPT_VS_INTERVENTION_STATUS"
            }
        }
    }

    /// Rule group (and therefore store category) the rule belongs to.
    pub const fn category(self) -> Category {
        match self {
            Self::LesionVsLesionCols | Self::LesionColsCompleteness => Category::Lesion,
            _ => Category::General,
        }
    }

    /// Short human-readable description, used by the `rules` listing.
    pub const fn description(self) -> &'static str {
        match self {
            Self::InclusionLesionOrHabit => "Subject must have a lesion or a habit",
            Self::ValidIc => "IC number must be 12 digits encoding a calendar date",
            Self::IcVsGender => "IC parity must tally with gender code",
            Self::LesionVsTelephone => "Subjects with lesion must have a valid telephone number",
            Self::IcVsDatebirth => "Birth date derived from IC must equal DATEBIRTH",
            Self::DatescreenVsDaterefer => "Referral dates must not precede screening date",
            Self::DatereferVsDateSeenSpecialist => {
                "Specialist visit must not precede referral date"
            }
            Self::DatereferQuitVsQuitAppt => {
                "Quit service referral and appointment dates must be complete and ordered"
            }
            Self::HabitVsHabitCols => "HABITS must tally with habit detail columns",
            Self::TobaccoTalliness => "Tobacco status, advice and quit must be a valid combination",
            Self::AlcoholTalliness => "Alcohol status, advice and quit must be a valid combination",
            Self::BetelTalliness => {
                "Betel quid status, advice and quit must be a valid combination"
            }
            Self::MedihistCompleteness => "Medical history flag must tally with its details",
            Self::FamihistcancerCompleteness => {
                "Family history of cancer flag must tally with its details"
            }
            Self::LesionVsReferSpecialist => "LESION must equal referral to specialist",
            Self::LesionVsLesionCols => "LESION must tally with filled lesion columns",
            Self::LesionColsCompleteness => "Filled lesion must have type, size and site",
            Self::LesionVsAdditionalDetails => {
                "Subjects with lesion must have education and occupation"
            }
            Self::ReferralQuitVsReadyQuit => {
                "Referral to quit services requires readiness to quit tobacco"
            }
            Self::ReferralQuitVsDateReferredVsFirstApptDate => {
                "Referral to quit services must tally with referral and appointment dates"
            }
            Self::AttendFirstApptNullCheck => "Past first appointment must record attendance",
            Self::AttendFirstApptVsInterventionStatus => {
                "Attendance and intervention status must be a valid combination"
            }
        }
    }

    /// Look up a rule by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|rule| rule.name().eq_ignore_ascii_case(wanted))
    }

    /// Look up a rule by its stable ordinal.
    pub fn from_ordinal(ordinal: u16) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|rule| rule.ordinal() == ordinal)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ModelError::UnknownRule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_contiguous_and_sorted() {
        for (idx, rule) in RuleId::all().iter().enumerate() {
            assert_eq!(usize::from(rule.ordinal()), idx + 1, "{rule}");
        }
    }

    #[test]
    fn pinned_ordinals() {
        // Historical datasets reference these numbers.
        assert_eq!(RuleId::InclusionLesionOrHabit.ordinal(), 1);
        assert_eq!(RuleId::IcVsDatebirth.ordinal(), 5);
        assert_eq!(RuleId::BetelTalliness.ordinal(), 12);
        assert_eq!(RuleId::LesionColsCompleteness.ordinal(), 17);
        assert_eq!(RuleId::AttendFirstApptVsInterventionStatus.ordinal(), 22);
    }

    #[test]
    fn name_lookup_round_trips() {
        for rule in RuleId::all() {
            assert_eq!(RuleId::from_name(rule.name()), Some(*rule));
            assert_eq!(RuleId::from_ordinal(rule.ordinal()), Some(*rule));
        }
        assert_eq!(RuleId::from_name("ic_vs_gender"), Some(RuleId::IcVsGender));
        assert!("NOT_A_RULE".parse::<RuleId>().is_err());
        assert_eq!(RuleId::from_ordinal(0), None);
    }

    #[test]
    fn serde_uses_stable_name() {
        let json = serde_json::to_string(&RuleId::LesionVsTelephone).unwrap();
        assert_eq!(json, "\"LESION_VS_TELEPHONE\"");
    }
}
