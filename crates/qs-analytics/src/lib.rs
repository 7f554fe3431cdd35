//! qs-analytics: batch segmentation and per-variable summary statistics.

pub mod stats;
pub mod summary;

pub use stats::{VariableStats, summarize_values};
pub use summary::{BatchSummary, VariableSummary, list_batch_ids, series_for, summarize};

use qs_table::BatchId;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(thiserror::Error, Debug)]
pub enum AnalyticsError {
    #[error("Batch not found: {batch_id}")]
    BatchNotFound { batch_id: BatchId },
}
