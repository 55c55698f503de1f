//! Domain policy tables.
//!
//! Some rules accept a tuple of field values only when the tuple is one of a
//! fixed set of combinations. The combinations are domain policy, so they are
//! kept here as named, versioned tables rather than inline in the rules.
//! Membership must not change without confirmation from the data owners; a
//! changed list gets a new version constant instead of an edit in place.

/// Vocabulary of the habit status columns.
pub const HABIT_NONE: &str = "0 - No such habit";
pub const HABIT_CURRENT: &str = "1 - Current";
pub const HABIT_PAST: &str = "2 - Past (stopped >= 6 months)";

/// Yes/no answers used by advice, quit, readiness and attendance fields.
pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Intervention status vocabulary.
pub const INTERVENTION_ONGOING: &str = "1 - Ongoing";
pub const INTERVENTION_COMPLETED: &str = "2 - Completed";
pub const INTERVENTION_DEFAULTED: &str = "3 - Defaulted";

/// Token replacing a missing value before a tuple is joined.
pub const NULL_TOKEN: &str = "Null";
/// Separator between tuple members.
pub const SEPARATOR: &str = "|";

/// A whitelist of joined value tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyTable {
    pub name: &'static str,
    pub version: u32,
    pub allowed: &'static [&'static str],
}

impl PolicyTable {
    /// Join a tuple the way the table stores it: missing values become
    /// [`NULL_TOKEN`] and members are separated by [`SEPARATOR`].
    pub fn join<S: AsRef<str>>(parts: &[Option<S>]) -> String {
        parts
            .iter()
            .map(|part| part.as_ref().map_or(NULL_TOKEN, |value| value.as_ref()))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Whether the joined key is an allowed combination.
    pub fn contains(&self, key: &str) -> bool {
        self.allowed.contains(&key)
    }

    /// Whether the tuple is an allowed combination.
    pub fn allows<S: AsRef<str>>(&self, parts: &[Option<S>]) -> bool {
        self.contains(&Self::join(parts))
    }
}

/// Habit (status, advised, quit) combinations.
pub const HABIT_DETAIL_V1: PolicyTable = PolicyTable {
    name: "habit_detail",
    version: 1,
    allowed: &[
        "Null|Null|Null",
        "0 - No such habit|Null|Null",
        "1 - Current|Yes|Yes",
        "1 - Current|Yes|No",
        "2 - Past (stopped >= 6 months)|Yes|Null",
    ],
};

/// First appointment (attendance, intervention status) combinations.
pub const ATTENDANCE_INTERVENTION_V1: PolicyTable = PolicyTable {
    name: "attendance_intervention",
    version: 1,
    allowed: &[
        "Null|Null",
        "Yes|1 - Ongoing",
        "Yes|2 - Completed",
        "Yes|3 - Defaulted",
        "No|Null",
    ],
};

/// Family history of cancer (flag, specify filled, relation filled) combinations.
pub const FAMILY_HISTORY_V1: PolicyTable = PolicyTable {
    name: "family_history",
    version: 1,
    allowed: &["false|false|false", "true|true|true"],
};

/// Tables in force for the current rule catalogue.
pub const HABIT_DETAIL: PolicyTable = HABIT_DETAIL_V1;
pub const ATTENDANCE_INTERVENTION: PolicyTable = ATTENDANCE_INTERVENTION_V1;
pub const FAMILY_HISTORY: PolicyTable = FAMILY_HISTORY_V1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_missing_values() {
        let key = PolicyTable::join(&[Some(HABIT_CURRENT), Some(YES), None]);
        assert_eq!(key, "1 - Current|Yes|Null");
    }

    #[test]
    fn habit_table_matches_vocabulary() {
        assert!(HABIT_DETAIL.allows::<&str>(&[None, None, None]));
        assert!(HABIT_DETAIL.allows(&[Some(HABIT_NONE), None, None]));
        assert!(HABIT_DETAIL.allows(&[Some(HABIT_CURRENT), Some(YES), Some(YES)]));
        assert!(HABIT_DETAIL.allows(&[Some(HABIT_CURRENT), Some(YES), Some(NO)]));
        assert!(HABIT_DETAIL.allows(&[Some(HABIT_PAST), Some(YES), None]));
        assert!(!HABIT_DETAIL.allows(&[Some(HABIT_CURRENT), Some(NO), None]));
        assert!(!HABIT_DETAIL.allows(&[Some(HABIT_PAST), Some(YES), Some(YES)]));
    }

    #[test]
    fn attendance_table_matches_vocabulary() {
        assert!(ATTENDANCE_INTERVENTION.allows(&[Some(YES), Some(INTERVENTION_COMPLETED)]));
        assert!(ATTENDANCE_INTERVENTION.allows(&[Some(NO), None]));
        assert!(!ATTENDANCE_INTERVENTION.allows(&[Some(NO), Some(INTERVENTION_ONGOING)]));
        assert!(!ATTENDANCE_INTERVENTION.allows(&[None, Some(INTERVENTION_DEFAULTED)]));
    }
}
