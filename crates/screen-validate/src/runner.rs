//! Validation runner.
//!
//! For each (rule group, source file) pair the runner builds the group's
//! record view, evaluates every rule of the group in catalogue order, collects
//! the annotated failures into a [`ResultStore`] and flushes it. A rule that
//! errors is logged and skipped; the remaining rules still run and the store
//! is flushed on every path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, error, info, info_span};

use screen_model::{Category, FailureRecord, RuleContext, RuleId};
use screen_store::ResultStore;

use crate::annotate::annotate;
use crate::error::Result;
use crate::rule::{Rule, RuleGroup};

/// A rule that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleError {
    pub rule: RuleId,
    pub message: String,
}

/// Outcome of one (rule group, source file) run.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub category: Category,
    pub file: String,
    /// Rows of the record view.
    pub rows: usize,
    /// Failure rows per rule, for rules that completed.
    pub failures: BTreeMap<RuleId, usize>,
    pub rule_errors: Vec<RuleError>,
    /// The record view could not be built, so no rule ran.
    pub view_error: Option<String>,
    pub persist_error: Option<String>,
    pub dataset: Option<PathBuf>,
}

impl GroupReport {
    pub fn new(category: Category, file: &str) -> Self {
        Self {
            category,
            file: file.to_string(),
            rows: 0,
            failures: BTreeMap::new(),
            rule_errors: Vec::new(),
            view_error: None,
            persist_error: None,
            dataset: None,
        }
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn has_errors(&self) -> bool {
        self.view_error.is_some() || self.persist_error.is_some() || !self.rule_errors.is_empty()
    }
}

/// Outcome of validating one source file across every group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    pub file: String,
    /// Rows of the source table.
    pub rows: usize,
    pub groups: Vec<GroupReport>,
}

impl FileReport {
    pub fn group(&self, category: Category) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.category == category)
    }

    pub fn failures(&self, category: Category) -> usize {
        self.group(category).map_or(0, GroupReport::total_failures)
    }

    pub fn has_errors(&self) -> bool {
        self.groups.iter().any(GroupReport::has_errors)
    }
}

/// Guard, evaluate and annotate one rule against a view.
pub fn run_rule(
    rule: &Rule,
    category: Category,
    view: &DataFrame,
    ctx: &RuleContext,
) -> Result<Vec<FailureRecord>> {
    let failing = rule.evaluate(view, ctx)?;
    annotate(rule, category, &failing)
}

/// Run one rule group over a source table and persist its failures.
pub fn run_group(
    group: &RuleGroup,
    table: &DataFrame,
    file: &str,
    store_root: &Path,
    ctx: &RuleContext,
) -> GroupReport {
    let span = info_span!("group", category = %group.category, file = %file);
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = GroupReport::new(group.category, file);
    let mut store = ResultStore::open(store_root, group.category, file);
    if let Err(err) = store.discard_previous() {
        error!(
            file = %file,
            category = %group.category,
            error = %err,
            "failed to remove previous failure dataset"
        );
        report.persist_error = Some(err.to_string());
    }

    match group.build_view(table, ctx) {
        Ok(view) => {
            report.rows = view.height();
            for rule in group.rules {
                match run_rule(rule, group.category, &view, ctx) {
                    Ok(records) => {
                        debug!(
                            rule = rule.id.name(),
                            rule_number = rule.id.ordinal(),
                            rows = records.len(),
                            "rule evaluated"
                        );
                        report.failures.insert(rule.id, records.len());
                        store.extend(records);
                    }
                    Err(err) => {
                        error!(
                            file = %file,
                            rule = rule.id.name(),
                            rule_number = rule.id.ordinal(),
                            error = %err,
                            "rule evaluation failed"
                        );
                        report.rule_errors.push(RuleError {
                            rule: rule.id,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }
        Err(err) => {
            error!(
                file = %file,
                category = %group.category,
                error = %err,
                "failed to build record view"
            );
            report.view_error = Some(err.to_string());
        }
    }

    match store.flush() {
        Ok(path) => report.dataset = path,
        Err(err) => {
            error!(
                file = %file,
                category = %group.category,
                error = %err,
                "failed to persist failures"
            );
            report.persist_error = Some(err.to_string());
        }
    }

    info!(
        rows = report.rows,
        failures = report.total_failures(),
        rule_errors = report.rule_errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "group validated"
    );
    report
}

/// Validate one source table with every rule group.
pub fn validate_table(
    table: &DataFrame,
    file: &str,
    store_root: &Path,
    ctx: &RuleContext,
) -> FileReport {
    let groups = RuleGroup::all()
        .iter()
        .map(|group| run_group(group, table, file, store_root, ctx))
        .collect();
    FileReport {
        file: file.to_string(),
        rows: table.height(),
        groups,
    }
}
