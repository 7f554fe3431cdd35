//! CSV ingestion for batch process logs.

use crate::schema::{BATCH_ID_COLUMN, TIMESTAMP_COLUMN};
use crate::{BatchId, BatchTable, ProcessVariable, Reading, TableError, TableResult};
use chrono::NaiveDateTime;
use qs_core::ensure_finite;
use std::path::Path;

/// Accepted timestamp layouts, tried in order. Fractional seconds are
/// optional in both.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Load and validate a batch log.
///
/// The whole load fails on the first malformed row: downstream window
/// and duration logic has no defined behavior on missing times, so a
/// partial table is never produced. Loading the same bytes twice yields
/// an identical table.
pub fn load_csv(path: &Path) -> TableResult<BatchTable> {
    if !path.exists() {
        return Err(TableError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let timestamp_col = require_column(&headers, TIMESTAMP_COLUMN)?;
    let batch_col = require_column(&headers, BATCH_ID_COLUMN)?;
    let mut variable_cols = [0usize; ProcessVariable::COUNT];
    for variable in ProcessVariable::ALL {
        variable_cols[variable.index()] = require_column(&headers, variable.column_name())?;
    }

    let mut readings = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = idx + 2; // the header occupies line 1

        let timestamp = parse_timestamp(record.get(timestamp_col).unwrap_or(""), line)?;

        let batch_raw = record.get(batch_col).unwrap_or("").trim();
        if batch_raw.is_empty() {
            return Err(TableError::MissingBatchId { line });
        }

        let mut values = [None; ProcessVariable::COUNT];
        for variable in ProcessVariable::ALL {
            let raw = record.get(variable_cols[variable.index()]).unwrap_or("");
            values[variable.index()] = parse_value(raw, variable, line)?;
        }

        readings.push(Reading::new(timestamp, BatchId::new(batch_raw), values));
    }

    if readings.is_empty() {
        return Err(TableError::EmptyTable);
    }

    tracing::debug!(rows = readings.len(), path = %path.display(), "batch log loaded");
    Ok(BatchTable::new(readings))
}

fn require_column(headers: &csv::StringRecord, column: &'static str) -> TableResult<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or(TableError::MissingColumn { column })
}

fn parse_timestamp(raw: &str, line: usize) -> TableResult<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    Err(TableError::TimestampUnparseable {
        value: raw.to_string(),
        line,
    })
}

fn parse_value(raw: &str, variable: ProcessVariable, line: usize) -> TableResult<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.parse().map_err(|_| TableError::ValueUnparseable {
        value: raw.to_string(),
        column: variable.column_name(),
        line,
    })?;

    // The upstream exporter writes NaN for missing samples.
    if value.is_nan() {
        return Ok(None);
    }

    Ok(Some(ensure_finite(value, variable.column_name())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    const HEADER: &str = "Timestamp,batch_id,Process Temp,Process Temp SP,Pressure SP,\
Inlet Steam Pressure,Outlet Steam Pressure,Steam Flow Rate,QualSteam Valve Opening";

    fn write_log(name: &str, content: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("qs_table_{}_{}", name, nanos));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        let path = dir.join("log.csv");
        fs::write(&path, content).expect("failed to write log fixture");
        path
    }

    #[test]
    fn loads_rows_with_missing_values() {
        let content = format!(
            "{HEADER}\n\
             2024-03-01 10:01:00,2,71.2,72.0,2.5,6.1,2.4,412.0,55.0\n\
             2024-03-01 10:00:00,1,70.0,72.0,2.5,6.0,,410.5,NaN\n"
        );
        let path = write_log("missing_values", &content);
        let table = load_csv(&path).expect("load should succeed");

        assert_eq!(table.len(), 2);
        let second = &table.readings()[1];
        assert_eq!(second.batch_id(), &BatchId::new("1"));
        assert_eq!(second.value(ProcessVariable::ProcessTemp), Some(70.0));
        assert_eq!(second.value(ProcessVariable::OutletSteamPressure), None);
        assert_eq!(second.value(ProcessVariable::ValveOpening), None);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let path = std::env::temp_dir().join("qs_table_no_such_file").join("log.csv");
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, TableError::SourceNotFound { .. }));
    }

    #[test]
    fn dropped_column_fails_validation() {
        let content = "Timestamp,batch_id,Process Temp\n2024-03-01 10:00:00,1,70.0\n";
        let path = write_log("dropped_column", content);
        let err = load_csv(&path).unwrap_err();
        match err {
            TableError::MissingColumn { column } => assert_eq!(column, "Process Temp SP"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn malformed_timestamp_fails_whole_load() {
        let content = format!(
            "{HEADER}\n\
             2024-03-01 10:00:00,1,70.0,72.0,2.5,6.0,2.3,410.5,54.0\n\
             not-a-time,1,70.5,72.0,2.5,6.0,2.3,411.0,54.5\n"
        );
        let path = write_log("bad_timestamp", &content);
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(
            err,
            TableError::TimestampUnparseable { line: 3, .. }
        ));
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let content = format!(
            "{HEADER}\n\
             2024-03-01T10:00:00.250,1,70.0,72.0,2.5,6.0,2.3,410.5,54.0\n"
        );
        let path = write_log("fractional", &content);
        let table = load_csv(&path).expect("load should succeed");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn header_only_file_is_empty_table() {
        let path = write_log("header_only", &format!("{HEADER}\n"));
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, TableError::EmptyTable));
    }

    #[test]
    fn blank_batch_id_is_rejected() {
        let content = format!(
            "{HEADER}\n\
             2024-03-01 10:00:00,,70.0,72.0,2.5,6.0,2.3,410.5,54.0\n"
        );
        let path = write_log("blank_batch", &content);
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, TableError::MissingBatchId { line: 2 }));
    }

    #[test]
    fn infinite_value_is_rejected() {
        let content = format!(
            "{HEADER}\n\
             2024-03-01 10:00:00,1,inf,72.0,2.5,6.0,2.3,410.5,54.0\n"
        );
        let path = write_log("infinite", &content);
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, TableError::Numeric(_)));
    }

    #[test]
    fn repeated_loads_are_identical() {
        let content = format!(
            "{HEADER}\n\
             2024-03-01 10:00:00,1,70.0,72.0,2.5,6.0,2.3,410.5,54.0\n\
             2024-03-01 10:01:00,2,71.2,72.0,2.5,6.1,2.4,412.0,55.0\n"
        );
        let path = write_log("idempotent", &content);
        let first = load_csv(&path).expect("first load");
        let second = load_csv(&path).expect("second load");
        assert_eq!(first, second);
    }
}
