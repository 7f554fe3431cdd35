//! Smoke test for the qs-app service layer.

use qs_app::{AppError, Session};
use qs_table::{BatchId, ProcessVariable};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn write_fixture_log(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("failed to create temp dir");
    let path = dir.join("log.csv");
    let content = "\
Timestamp,batch_id,Process Temp,Process Temp SP,Pressure SP,Inlet Steam Pressure,Outlet Steam Pressure,Steam Flow Rate,QualSteam Valve Opening
2024-03-01 10:01:00,1,72.0,72.0,2.5,6.1,2.4,412.0,55.0
2024-03-01 10:00:00,1,70.0,72.0,2.5,6.0,2.3,410.5,54.0
2024-03-01 10:02:00,1,71.0,72.0,2.5,6.2,2.4,413.5,55.5
2024-03-01 11:00:00,10,65.0,66.0,2.2,5.5,2.1,380.0,48.0
2024-03-01 11:01:00,2,66.0,66.0,2.2,5.6,2.1,381.0,48.5
";
    fs::write(&path, content).expect("failed to write log fixture");
    path
}

#[test]
fn open_list_summarize_series() {
    let dir = unique_temp_dir("qs_app_smoke");
    let path = write_fixture_log(&dir);

    let session = Session::open(&path).expect("session should open");
    assert_eq!(session.table().len(), 5);

    let ids = session.batch_ids();
    let order: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(order, ["1", "2", "10"]);

    let summary = session
        .summarize(&BatchId::new("1"))
        .expect("batch 1 exists");
    assert_eq!(summary.duration_minutes, 2.0);
    let temp = summary
        .stats_for(ProcessVariable::ProcessTemp)
        .expect("temperature stats defined");
    assert_eq!(temp.samples, 3);
    assert_eq!(temp.min, 70.0);
    assert_eq!(temp.max, 72.0);

    let series = session
        .series(&BatchId::new("1"), ProcessVariable::ProcessTemp)
        .expect("batch 1 exists");
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, [70.0, 72.0, 71.0]);
}

#[test]
fn missing_source_is_a_distinct_state() {
    let dir = unique_temp_dir("qs_app_missing");
    let err = Session::open(&dir.join("log.csv")).unwrap_err();
    assert!(matches!(err, AppError::SourceNotFound { .. }));
}

#[test]
fn unknown_batch_is_recoverable() {
    let dir = unique_temp_dir("qs_app_unknown_batch");
    let path = write_fixture_log(&dir);
    let session = Session::open(&path).expect("session should open");

    let err = session.summarize(&BatchId::new("42")).unwrap_err();
    assert!(matches!(err, AppError::BatchNotFound { .. }));

    // The session stays usable after a bad selection.
    assert!(session.summarize(&BatchId::new("2")).is_ok());
}
