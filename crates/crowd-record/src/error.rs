//! Error types for crowd-record.

use thiserror::Error;

/// Errors that can occur while writing recording output.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, RecordError>`.
pub type RecordResult<T> = Result<T, RecordError>;
