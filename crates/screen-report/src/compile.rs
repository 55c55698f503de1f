use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info, info_span};

use screen_model::{Category, StoreRecord};
use screen_store::{list_datasets, load_dataset};

use crate::rows::{report_header, report_row};

/// A written category report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledReport {
    pub category: Category,
    pub path: PathBuf,
    pub rows: usize,
    /// Store datasets merged into the report.
    pub datasets: usize,
}

/// Location of the report of a category.
pub fn report_path(output_dir: &Path, category: Category) -> PathBuf {
    output_dir.join(format!("validation_{category}.csv"))
}

/// Merge every dataset of a category into one CSV report.
///
/// Rows are ordered by source file, rule ordinal, record key and lesion slot.
/// When `cleanup` is set, the merged datasets are deleted once the report is
/// written. A category without datasets produces no report.
pub fn compile_category(
    store_root: &Path,
    output_dir: &Path,
    category: Category,
    cleanup: bool,
) -> Result<Option<CompiledReport>> {
    let span = info_span!("compile", category = %category);
    let _guard = span.enter();
    let start = Instant::now();

    let datasets = list_datasets(store_root, category)
        .with_context(|| format!("list {category} datasets in {}", store_root.display()))?;
    if datasets.is_empty() {
        debug!("no datasets to compile");
        return Ok(None);
    }

    let mut records: Vec<StoreRecord> = Vec::new();
    for path in &datasets {
        let loaded =
            load_dataset(path).with_context(|| format!("load dataset {}", path.display()))?;
        debug!(dataset = %path.display(), rows = loaded.len(), "dataset loaded");
        records.extend(loaded);
    }
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let path = report_path(output_dir, category);
    write_report(&path, category, &records)?;

    if cleanup {
        for dataset in &datasets {
            fs::remove_file(dataset)
                .with_context(|| format!("remove dataset {}", dataset.display()))?;
        }
    }

    info!(
        report = %path.display(),
        rows = records.len(),
        datasets = datasets.len(),
        cleanup,
        duration_ms = start.elapsed().as_millis(),
        "report compiled"
    );
    Ok(Some(CompiledReport {
        category,
        path,
        rows: records.len(),
        datasets: datasets.len(),
    }))
}

/// Compile the report of every category.
pub fn compile_all(
    store_root: &Path,
    output_dir: &Path,
    cleanup: bool,
) -> Result<Vec<CompiledReport>> {
    let mut reports = Vec::new();
    for category in Category::all() {
        if let Some(report) = compile_category(store_root, output_dir, *category, cleanup)? {
            reports.push(report);
        }
    }
    Ok(reports)
}

fn write_report(path: &Path, category: Category, records: &[StoreRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("create report {}", path.display()))?;
    writer
        .write_record(report_header(category))
        .with_context(|| format!("write header: {}", path.display()))?;
    for record in records {
        writer
            .write_record(report_row(category, record))
            .with_context(|| format!("write record: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush report {}", path.display()))?;
    Ok(())
}
