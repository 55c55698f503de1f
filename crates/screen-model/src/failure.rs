//! Failure descriptors and the rows persisted by the result store.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::rules::RuleId;

/// Rule group, which is also the persisted store category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// One row per subject.
    General,
    /// One row per subject per lesion slot.
    Lesion,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[Self::General, Self::Lesion]
    }

    /// Directory name under the store root.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Lesion => "lesion",
        }
    }

    /// Whether failure rows of this category carry a lesion slot.
    pub const fn has_lesion_id(self) -> bool {
        matches!(self, Self::Lesion)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "lesion" => Ok(Self::Lesion),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}

/// Composite natural key of a screening record.
///
/// Unique within one source file only; the same key may appear in several
/// files.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub district: Option<String>,
    pub location: Option<String>,
    pub date_screen: Option<NaiveDate>,
    pub ic_number: Option<String>,
}

/// Uniform description of why a row failed a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDescriptor {
    pub rule: RuleId,
    /// `"COLUMN: value"` entries, in the rule's explanation-column order.
    pub data: Vec<String>,
}

impl FailureDescriptor {
    pub fn new(rule: RuleId, data: Vec<String>) -> Self {
        Self { rule, data }
    }

    /// Format one explanation entry.
    pub fn entry(column: &str, value: &str) -> String {
        format!("{column}: {value}")
    }
}

/// One failing row produced by an annotated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub key: RecordKey,
    /// Lesion slot for lesion-scope failures.
    pub lesion_id: Option<String>,
    pub fail: FailureDescriptor,
}

/// A persisted failure row: a failure record tagged with its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub file: String,
    pub key: RecordKey,
    pub lesion_id: Option<String>,
    pub fail: FailureDescriptor,
}

impl StoreRecord {
    pub fn from_failure(file: &str, record: FailureRecord) -> Self {
        Self {
            file: file.to_string(),
            key: record.key,
            lesion_id: record.lesion_id,
            fail: record.fail,
        }
    }

    /// Deterministic report ordering: file, rule ordinal, key, lesion slot.
    pub fn sort_key(&self) -> (&str, u16, &RecordKey, Option<&str>) {
        (
            self.file.as_str(),
            self.fail.rule.ordinal(),
            &self.key,
            self.lesion_id.as_deref(),
        )
    }
}
