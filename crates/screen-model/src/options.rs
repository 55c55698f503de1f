//! Configuration options for reshaping and rule evaluation.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Treatment of "not applicable" sentinel strings in lesion descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotApplicableMode {
    /// Keep sentinels as meaningful, non-null values.
    #[default]
    Keep,
    /// Replace sentinels with nulls before fill checks.
    ToNull,
}

/// Options for building record views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeOptions {
    pub not_applicable: NotApplicableMode,
}

impl ReshapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_not_applicable(mut self, mode: NotApplicableMode) -> Self {
        self.not_applicable = mode;
        self
    }

    pub fn normalizes_not_applicable(&self) -> bool {
        self.not_applicable == NotApplicableMode::ToNull
    }
}

/// Processing parameters shared by every rule of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContext {
    /// Processing date. Drives IC century resolution and "in the past" checks.
    pub today: NaiveDate,
    pub reshape: ReshapeOptions,
}

impl RuleContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            reshape: ReshapeOptions::default(),
        }
    }

    pub fn with_reshape(mut self, reshape: ReshapeOptions) -> Self {
        self.reshape = reshape;
        self
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}
