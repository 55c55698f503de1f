//! Screening rule evaluation.
//!
//! - **rule**: rules as values (guard, body, explanation columns) and rule groups
//! - **rules**: the rule functions and the rule tables of each group
//! - **annotate**: conversion of failing rows into failure records
//! - **runner**: per (group, file) evaluation with store persistence

pub mod annotate;
pub mod error;
pub mod logic;
pub mod rule;
pub mod rules;
pub mod runner;

pub use annotate::{annotate, record_keys};
pub use error::{Result, ValidateError};
pub use rule::{Guard, Rule, RuleBody, RuleGroup};
pub use runner::{FileReport, GroupReport, RuleError, run_group, run_rule, validate_table};
