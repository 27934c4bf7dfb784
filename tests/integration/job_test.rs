use std::fs;

use chrono::NaiveDate;
use mongodb::bson::Document;
use trip_unify::{TripSource, TripUnifyError, run_job};

use crate::utils::{FailingSink, MemorySink, fixture_dir, test_config, write_source};

fn millis(h: u32, m: u32, s: u32) -> i64 {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

fn pickup_millis(document: &Document) -> i64 {
    document
        .get_datetime("pickup_datetime")
        .unwrap()
        .timestamp_millis()
}

/// Four single-trip extracts end up as four documents in source order
#[tokio::test]
async fn test_end_to_end_four_sources() -> trip_unify::Result<()> {
    let dir = fixture_dir();
    let sink = MemorySink::default();

    let summary = run_job(&test_config(dir.path()), &sink).await?;
    assert_eq!(summary.unified_rows, 4);
    assert_eq!(summary.written, 4);
    assert_eq!(
        summary.initial_counts,
        TripSource::UNION_ORDER.iter().map(|s| (*s, 1)).collect::<Vec<_>>()
    );

    let documents = sink.documents();
    assert_eq!(sink.append_calls(), 1);
    assert_eq!(documents.len(), 4);

    for document in &documents {
        assert_eq!(document.len(), 5);
        assert_eq!(document.get_i32("PULocationID").unwrap(), 10);
        assert_eq!(document.get_i32("DOLocationID").unwrap(), 20);
        assert!(document.get_datetime("dropoff_datetime").is_ok());
    }

    // Yellow: RatecodeID, Green: trip_type, FHV: SR_Flag, FHVHV: tag
    assert_eq!(documents[0].get_i32("trip_type").unwrap(), 1);
    assert_eq!(documents[1].get_i32("trip_type").unwrap(), 2);
    assert_eq!(documents[2].get_i32("trip_type").unwrap(), 1);
    assert_eq!(documents[3].get_str("trip_type").unwrap(), "FHVHV");

    assert_eq!(pickup_millis(&documents[0]), millis(0, 18, 38));
    assert_eq!(pickup_millis(&documents[1]), millis(0, 3, 1));
    assert_eq!(pickup_millis(&documents[2]), millis(0, 0, 0));
    assert_eq!(pickup_millis(&documents[3]), millis(0, 14, 0));
    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_skips_write() {
    let dir = fixture_dir();
    fs::remove_file(TripSource::Fhvhv.file_path(dir.path(), "2025-01")).unwrap();
    let sink = MemorySink::default();

    let err = run_job(&test_config(dir.path()), &sink).await.unwrap_err();
    match &err {
        TripUnifyError::IoError { path, .. } => {
            let path = path.as_ref().expect("I/O error should carry the path");
            assert!(path.ends_with("fhvhv_tripdata_2025-01.csv"));
        }
        other => panic!("expected an I/O error, got {other}"),
    }
    assert!(err.is_pre_write());
    assert_eq!(sink.append_calls(), 0);
    assert!(sink.documents().is_empty());
}

#[tokio::test]
async fn test_yellow_without_rate_code_is_schema_error() {
    let dir = fixture_dir();
    write_source(
        dir.path(),
        TripSource::Yellow,
        "tpep_pickup_datetime,tpep_dropoff_datetime\n\
         2025-01-01 00:18:38,2025-01-01 00:26:59\n",
    );
    let sink = MemorySink::default();

    let err = run_job(&test_config(dir.path()), &sink).await.unwrap_err();
    assert!(matches!(err, TripUnifyError::SchemaError(_)));
    assert!(err.to_string().contains("Yellow source"));
    assert_eq!(sink.append_calls(), 0);
}

#[tokio::test]
async fn test_sink_failure_after_transform() {
    let dir = fixture_dir();
    let sink = FailingSink::default();

    let err = run_job(&test_config(dir.path()), &sink).await.unwrap_err();
    assert!(matches!(err, TripUnifyError::SinkError(_)));
    assert!(!err.is_pre_write());
    assert_eq!(sink.offered(), 4);
}

#[tokio::test]
async fn test_invalid_config_skips_everything() {
    let dir = fixture_dir();
    let mut config = test_config(dir.path());
    config.collection.clear();
    let sink = MemorySink::default();

    let err = run_job(&config, &sink).await.unwrap_err();
    assert!(matches!(err, TripUnifyError::ConfigError(_)));
    assert_eq!(sink.append_calls(), 0);
}
