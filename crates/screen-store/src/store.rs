//! Accumulator for the failure rows of one (category, source file) pair.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use screen_model::{Category, FailureRecord, StoreRecord};

use crate::dataset::{dataset_path, records_to_frame, remove_dataset, write_dataset};
use crate::error::Result;

/// Collects failure rows for one source file and persists them as one dataset.
///
/// Rows are kept typed until [`ResultStore::flush`], which tags them with the
/// source file name, writes the dataset and clears the accumulator. A store
/// dropped with unflushed rows flushes itself and logs any error.
#[derive(Debug)]
pub struct ResultStore {
    root: PathBuf,
    category: Category,
    file: String,
    rows: Vec<FailureRecord>,
}

impl ResultStore {
    pub fn open(root: impl Into<PathBuf>, category: Category, file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            category,
            file: file.into(),
            rows: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path the dataset is written to.
    pub fn path(&self) -> PathBuf {
        dataset_path(&self.root, self.category, &self.file)
    }

    /// Remove the dataset a previous run left for this (category, file).
    ///
    /// Returns whether a dataset was removed. A run that then collects no
    /// failures leaves no dataset behind.
    pub fn discard_previous(&self) -> Result<bool> {
        let path = self.path();
        let removed = remove_dataset(&path)?;
        if removed {
            debug!(
                category = %self.category,
                file = %self.file,
                path = %path.display(),
                "previous failure dataset removed"
            );
        }
        Ok(removed)
    }

    /// Append the failure rows of one rule. Empty input is a no-op.
    ///
    /// General-category rows never carry a lesion slot.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = FailureRecord>) {
        let has_lesion_id = self.category.has_lesion_id();
        let before = self.rows.len();
        self.rows.extend(rows.into_iter().map(|mut row| {
            if !has_lesion_id {
                row.lesion_id = None;
            }
            row
        }));
        let added = self.rows.len() - before;
        if added > 0 {
            debug!(
                category = %self.category,
                file = %self.file,
                rows = added,
                "failure rows collected"
            );
        }
    }

    /// Persist the accumulated rows and clear the accumulator.
    ///
    /// Returns the dataset path, or `None` when there was nothing to write.
    pub fn flush(&mut self) -> Result<Option<PathBuf>> {
        if self.rows.is_empty() {
            return Ok(None);
        }
        let rows = std::mem::take(&mut self.rows);
        let records: Vec<StoreRecord> = rows
            .into_iter()
            .map(|row| StoreRecord::from_failure(&self.file, row))
            .collect();
        let path = self.path();
        let mut df = records_to_frame(self.category, &records)?;
        write_dataset(&path, &mut df)?;
        info!(
            category = %self.category,
            file = %self.file,
            rows = records.len(),
            path = %path.display(),
            "failure dataset written"
        );
        Ok(Some(path))
    }
}

impl Drop for ResultStore {
    fn drop(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        if let Err(err) = self.flush() {
            error!(
                category = %self.category,
                file = %self.file,
                error = %err,
                "failed to flush result store on drop"
            );
        }
    }
}
