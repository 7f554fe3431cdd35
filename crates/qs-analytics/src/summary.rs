//! Batch time-window derivation and per-variable summaries.

use crate::stats::{VariableStats, summarize_values};
use crate::{AnalyticsError, AnalyticsResult};
use chrono::NaiveDateTime;
use qs_table::{BatchId, BatchTable, ProcessVariable, Reading};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read-only summary of one batch's stable phase.
///
/// Derived on demand from the table; holds no reference back into it
/// and is never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: BatchId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: f64,
    pub variables: Vec<VariableSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSummary {
    pub variable: ProcessVariable,
    /// `None` when the batch has no valid samples for this variable.
    pub stats: Option<VariableStats>,
}

impl BatchSummary {
    pub fn stats_for(&self, variable: ProcessVariable) -> Option<&VariableStats> {
        self.variables
            .iter()
            .find(|v| v.variable == variable)
            .and_then(|v| v.stats.as_ref())
    }
}

/// Distinct batch identifiers in the table, ascending.
pub fn list_batch_ids(table: &BatchTable) -> Vec<BatchId> {
    let ids: BTreeSet<BatchId> = table
        .readings()
        .iter()
        .map(|r| r.batch_id().clone())
        .collect();
    ids.into_iter().collect()
}

/// Summarize one batch: time window, duration, and per-variable
/// statistics over the non-missing samples.
pub fn summarize(table: &BatchTable, batch_id: &BatchId) -> AnalyticsResult<BatchSummary> {
    let rows: Vec<&Reading> = table
        .readings()
        .iter()
        .filter(|r| r.batch_id() == batch_id)
        .collect();

    if rows.is_empty() {
        return Err(AnalyticsError::BatchNotFound {
            batch_id: batch_id.clone(),
        });
    }

    let mut start_time = rows[0].timestamp();
    let mut end_time = rows[0].timestamp();
    for row in &rows {
        start_time = start_time.min(row.timestamp());
        end_time = end_time.max(row.timestamp());
    }
    let duration_minutes = (end_time - start_time).num_milliseconds() as f64 / 60_000.0;

    let variables = ProcessVariable::ALL
        .iter()
        .map(|&variable| {
            let values: Vec<f64> = rows.iter().filter_map(|r| r.value(variable)).collect();
            VariableSummary {
                variable,
                stats: summarize_values(&values),
            }
        })
        .collect();

    Ok(BatchSummary {
        batch_id: batch_id.clone(),
        start_time,
        end_time,
        duration_minutes,
        variables,
    })
}

/// One variable's samples for one batch, sorted ascending by timestamp.
///
/// This is the only place sort order is guaranteed; charts need a
/// monotonic time axis. Missing samples are skipped, so a known batch
/// with no valid samples yields an empty series rather than an error.
pub fn series_for(
    table: &BatchTable,
    batch_id: &BatchId,
    variable: ProcessVariable,
) -> AnalyticsResult<Vec<(NaiveDateTime, f64)>> {
    let mut seen_batch = false;
    let mut series = Vec::new();

    for reading in table.readings() {
        if reading.batch_id() == batch_id {
            seen_batch = true;
            if let Some(value) = reading.value(variable) {
                series.push((reading.timestamp(), value));
            }
        }
    }

    if !seen_batch {
        return Err(AnalyticsError::BatchNotFound {
            batch_id: batch_id.clone(),
        });
    }

    series.sort_by_key(|(timestamp, _)| *timestamp);
    Ok(series)
}
