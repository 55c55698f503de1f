use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use screen_model::{Category, RuleId};
use screen_report::CompiledReport;
use screen_validate::FileReport;

/// A source file that could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct LoadError {
    pub file: String,
    pub path: PathBuf,
    pub message: String,
}

/// Everything a `validate` run did, written as `run_summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub today: NaiveDate,
    pub input_dir: PathBuf,
    pub store_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<FileReport>,
    pub load_errors: Vec<LoadError>,
    pub reports: Vec<CompiledReport>,
    pub compile_error: Option<String>,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        !self.load_errors.is_empty()
            || self.compile_error.is_some()
            || self.files.iter().any(FileReport::has_errors)
    }

    /// Failure rows per rule across every file.
    pub fn rule_failures(&self) -> BTreeMap<RuleId, usize> {
        let mut totals = BTreeMap::new();
        for group in self.files.iter().flat_map(|file| &file.groups) {
            for (rule, count) in &group.failures {
                *totals.entry(*rule).or_default() += count;
            }
        }
        totals
    }

    pub fn total_failures(&self, category: Category) -> usize {
        self.files.iter().map(|file| file.failures(category)).sum()
    }
}
