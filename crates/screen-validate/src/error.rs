//! Error types for rule evaluation.

use thiserror::Error;

use screen_ingest::IngestError;
use screen_store::StoreError;

/// Errors raised while building a view, evaluating a rule or persisting results.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The record table does not have the shape a rule or view needs.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failure rows could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl ValidateError {
    /// Whether the error is an input-shape error (missing or mistyped column).
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::Ingest(err) if err.is_shape_error())
    }
}

impl From<polars::prelude::PolarsError> for ValidateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
