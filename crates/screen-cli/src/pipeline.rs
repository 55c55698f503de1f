//! Run orchestration: discover source files, validate each one with every
//! rule group, then compile the category reports.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use screen_ingest::{IngestError, TableSource, discover_input_files, source_name};
use screen_model::{Category, RuleContext};
use screen_report::compile_all;
use screen_store::{dataset_path, remove_dataset};
use screen_validate::validate_table;

use crate::logging::redact_value;
use crate::types::{LoadError, RunSummary};

/// Name of the machine-readable run summary in the output directory.
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Settings of one `validate` run.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub input_dir: PathBuf,
    pub store_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ctx: RuleContext,
    /// Compile the category reports after validation.
    pub compile: bool,
    /// Delete the store datasets once compiled.
    pub cleanup: bool,
}

/// Validate every source file of the input directory.
///
/// A file that cannot be loaded is recorded and skipped, and any datasets a
/// previous run stored for it are removed. Only a missing or
/// unreadable input directory aborts the run.
pub fn run_validation<S: TableSource>(source: &S, config: &ValidateConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let inputs = discover_input_files(&config.input_dir)
        .with_context(|| format!("discover inputs in {}", config.input_dir.display()))?;
    info!(
        input_dir = %config.input_dir.display(),
        file_count = inputs.len(),
        today = %config.ctx.today,
        "inputs discovered"
    );

    let mut summary = RunSummary {
        today: config.ctx.today,
        input_dir: config.input_dir.clone(),
        store_dir: config.store_dir.clone(),
        output_dir: config.output_dir.clone(),
        files: Vec::new(),
        load_errors: Vec::new(),
        reports: Vec::new(),
        compile_error: None,
    };

    for path in &inputs {
        let file = source_name(path);
        let span = info_span!("file", file = %file);
        let _guard = span.enter();
        match source.load(path) {
            Ok(table) => {
                info!(rows = table.height(), "source loaded");
                let report = validate_table(&table, &file, &config.store_dir, &config.ctx);
                summary.files.push(report);
            }
            Err(err) => {
                let message = load_error_message(&err);
                error!(file = %file, error = %message, "failed to load source file");
                summary.load_errors.push(LoadError {
                    file: file.clone(),
                    path: path.clone(),
                    message,
                });
                discard_stale_datasets(&config.store_dir, &file);
            }
        }
    }

    if config.compile {
        match compile_all(&config.store_dir, &config.output_dir, config.cleanup) {
            Ok(reports) => summary.reports = reports,
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "report compilation failed");
                summary.compile_error = Some(message);
            }
        }
    }

    info!(
        files = summary.files.len(),
        load_errors = summary.load_errors.len(),
        reports = summary.reports.len(),
        duration_ms = start.elapsed().as_millis(),
        "validation run complete"
    );
    Ok(summary)
}

/// Write `run_summary.json` into the summary's output directory.
pub fn write_run_summary(summary: &RunSummary) -> Result<PathBuf> {
    fs::create_dir_all(&summary.output_dir)
        .with_context(|| format!("create {}", summary.output_dir.display()))?;
    let path = summary.output_dir.join(RUN_SUMMARY_FILE);
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Remove every category dataset stored for `file` by an earlier run.
fn discard_stale_datasets(store_dir: &Path, file: &str) {
    for category in Category::all() {
        let path = dataset_path(store_dir, *category, file);
        match remove_dataset(&path) {
            Ok(true) => info!(
                category = %category,
                path = %path.display(),
                "stale failure dataset removed"
            ),
            Ok(false) => {}
            Err(err) => error!(
                category = %category,
                error = %err,
                "failed to remove stale failure dataset"
            ),
        }
    }
}

/// Human-readable load error with cell contents redacted unless
/// subject-value logging is enabled.
fn load_error_message(err: &IngestError) -> String {
    match err {
        IngestError::InvalidValue {
            column,
            expected,
            value,
            row,
        } => format!(
            "invalid {expected} value '{}' in column '{column}' (row {row})",
            redact_value(value)
        ),
        other => other.to_string(),
    }
}
