//! Error types for the result store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting or reloading failure datasets.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create a directory or open a dataset file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a dataset.
    #[error("failed to write dataset {path}: {message}")]
    Persist { path: PathBuf, message: String },

    /// A dataset does not have the store schema.
    #[error("dataset {path} does not match the store schema: {message}")]
    Schema { path: PathBuf, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for StoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
