//! qs-table: typed batch-log table and CSV loader/validator.

pub mod loader;
pub mod schema;

pub use loader::load_csv;
pub use schema::{BatchId, BatchTable, ProcessVariable, Reading};

pub type TableResult<T> = Result<T, TableError>;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("Data source not found: {path}")]
    SourceNotFound { path: std::path::PathBuf },

    #[error("Missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("Unparseable timestamp '{value}' at line {line}")]
    TimestampUnparseable { value: String, line: usize },

    #[error("Empty batch id at line {line}")]
    MissingBatchId { line: usize },

    #[error("Unparseable value '{value}' in column '{column}' at line {line}")]
    ValueUnparseable {
        value: String,
        column: &'static str,
        line: usize,
    },

    #[error("Table contains no readings")]
    EmptyTable,

    #[error(transparent)]
    Numeric(#[from] qs_core::QsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
