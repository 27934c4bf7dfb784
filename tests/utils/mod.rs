use std::fs;
use std::path::Path;
use std::sync::Mutex;

use mongodb::bson::Document;
use tempfile::TempDir;
use trip_unify::sink::SinkFuture;
use trip_unify::{TripSink, TripSource, TripUnifyError, UnifierConfig};

pub const YELLOW_CSV: &str = "\
VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,RatecodeID,store_and_fwd_flag,PULocationID,DOLocationID,payment_type,fare_amount
1,2025-01-01 00:18:38,2025-01-01 00:26:59,1,1.6,1,N,10,20,1,10.0
";

pub const GREEN_CSV: &str = "\
VendorID,lpep_pickup_datetime,lpep_dropoff_datetime,store_and_fwd_flag,RatecodeID,PULocationID,DOLocationID,passenger_count,trip_distance,trip_type
2,2025-01-01 00:03:01,2025-01-01 00:17:12,N,5,10,20,1,3.2,2
";

pub const FHV_CSV: &str = "\
dispatching_base_num,pickup_datetime,dropOff_datetime,PUlocationID,DOlocationID,SR_Flag,Affiliated_base_number
B00009,2025-01-01 00:00:00,2025-01-01 00:30:00,10,20,1,B00009
";

pub const FHVHV_CSV: &str = "\
hvfhs_license_num,dispatching_base_num,originating_base_num,request_datetime,pickup_datetime,dropoff_datetime,PULocationID,DOLocationID,trip_miles
HV0003,B03404,B03404,2025-01-01 00:10:00,2025-01-01 00:14:00,2025-01-01 00:40:00,10,20,5.4
";

/// Fixture content for each source, one trip each with zones 10 -> 20
#[must_use]
pub fn fixture_csv(source: TripSource) -> &'static str {
    match source {
        TripSource::Yellow => YELLOW_CSV,
        TripSource::Green => GREEN_CSV,
        TripSource::Fhv => FHV_CSV,
        TripSource::Fhvhv => FHVHV_CSV,
    }
}

/// Write one source's extract into `dir` under its January file name
pub fn write_source(dir: &Path, source: TripSource, contents: &str) {
    fs::write(source.file_path(dir, "2025-01"), contents).expect("failed to write fixture");
}

/// Create a directory holding all four single-trip fixtures
#[must_use]
pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for source in TripSource::UNION_ORDER {
        write_source(dir.path(), source, fixture_csv(source));
    }
    dir
}

/// Quiet configuration reading from `dir`
#[must_use]
pub fn test_config(dir: &Path) -> UnifierConfig {
    UnifierConfig {
        show_progress: false,
        ..UnifierConfig::new(dir, "mongodb://localhost:27017")
    }
}

/// Sink that keeps appended documents in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<Vec<Document>>,
    appends: Mutex<usize>,
}

impl MemorySink {
    #[must_use]
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    #[must_use]
    pub fn append_calls(&self) -> usize {
        *self.appends.lock().unwrap()
    }
}

impl TripSink for MemorySink {
    fn append(&self, documents: Vec<Document>) -> SinkFuture<'_, usize> {
        Box::pin(async move {
            *self.appends.lock().unwrap() += 1;
            let written = documents.len();
            self.documents.lock().unwrap().extend(documents);
            Ok(written)
        })
    }

    fn shutdown(&self) -> SinkFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Sink whose writes always fail, remembering how many documents it was offered
#[derive(Debug, Default)]
pub struct FailingSink {
    offered: Mutex<usize>,
}

impl FailingSink {
    #[must_use]
    pub fn offered(&self) -> usize {
        *self.offered.lock().unwrap()
    }
}

impl TripSink for FailingSink {
    fn append(&self, documents: Vec<Document>) -> SinkFuture<'_, usize> {
        Box::pin(async move {
            *self.offered.lock().unwrap() += documents.len();
            Err(TripUnifyError::sink("connection refused"))
        })
    }

    fn shutdown(&self) -> SinkFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}
