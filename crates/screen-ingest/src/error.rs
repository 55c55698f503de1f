//! Error types for screening data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source table or reading its columns.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Source table has no rows.
    #[error("source table is empty: {path}")]
    EmptyTable { path: PathBuf },

    /// A cell could not be coerced to the column's contractual type.
    #[error("invalid {expected} value '{value}' in column '{column}' (row {row})")]
    InvalidValue {
        column: String,
        expected: &'static str,
        value: String,
        row: usize,
    },

    // === Shape Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Column has a different semantic type than the rule expects.
    #[error("column '{column}' has type {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Whether the error describes a table that does not have the contractual shape.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. } | Self::ColumnType { .. })
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
