//! # Ingestion Errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while turning the source file into transactions
#[derive(Debug, Error)]
pub enum IngestError {
    /// Dataset file could not be opened
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV framing or column decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row decoded but holds values the store cannot accept
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

impl IngestError {
    pub fn invalid_row(row: usize, reason: impl Into<String>) -> Self {
        IngestError::InvalidRow {
            row,
            reason: reason.into(),
        }
    }
}
