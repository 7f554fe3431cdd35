//! Error types for the qs-app service layer.

use qs_table::BatchId;
use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified interface for both CLI and GUI.
///
/// The variants the frontends render as distinct states (missing data
/// source, unknown batch) are preserved as such instead of being
/// flattened into strings.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Data source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Invalid table: {message}")]
    InvalidTable { message: String },

    #[error("Batch not found: {batch_id}")]
    BatchNotFound { batch_id: BatchId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for qs-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<qs_table::TableError> for AppError {
    fn from(err: qs_table::TableError) -> Self {
        match err {
            qs_table::TableError::SourceNotFound { path } => AppError::SourceNotFound { path },
            other => AppError::InvalidTable {
                message: other.to_string(),
            },
        }
    }
}

impl From<qs_analytics::AnalyticsError> for AppError {
    fn from(err: qs_analytics::AnalyticsError) -> Self {
        match err {
            qs_analytics::AnalyticsError::BatchNotFound { batch_id } => {
                AppError::BatchNotFound { batch_id }
            }
        }
    }
}
