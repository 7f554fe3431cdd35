//! Session-wide handle over the loaded batch table.

use crate::error::AppResult;
use chrono::NaiveDateTime;
use qs_analytics::{BatchSummary, list_batch_ids, series_for, summarize};
use qs_table::{BatchId, BatchTable, ProcessVariable, load_csv};
use std::path::{Path, PathBuf};

/// Owns the validated table for the lifetime of one operator session.
///
/// The table is loaded and validated exactly once; every query below is
/// a pure function of it, so reloading means constructing a new
/// session. Shared references to the session may be handed to several
/// consumers without synchronization.
#[derive(Debug)]
pub struct Session {
    source: PathBuf,
    table: BatchTable,
}

impl Session {
    /// Load and validate the source table.
    pub fn open(source: &Path) -> AppResult<Self> {
        let table = load_csv(source)?;
        tracing::info!(
            rows = table.len(),
            source = %source.display(),
            "session table loaded"
        );
        Ok(Self {
            source: source.to_path_buf(),
            table,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn table(&self) -> &BatchTable {
        &self.table
    }

    /// Distinct batch identifiers, ascending.
    pub fn batch_ids(&self) -> Vec<BatchId> {
        list_batch_ids(&self.table)
    }

    /// Summary for one batch: time window, duration, per-variable stats.
    pub fn summarize(&self, batch_id: &BatchId) -> AppResult<BatchSummary> {
        Ok(summarize(&self.table, batch_id)?)
    }

    /// One variable's samples for one batch, sorted by timestamp.
    pub fn series(
        &self,
        batch_id: &BatchId,
        variable: ProcessVariable,
    ) -> AppResult<Vec<(NaiveDateTime, f64)>> {
        Ok(series_for(&self.table, batch_id, variable)?)
    }
}
