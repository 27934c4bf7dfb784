//! Configuration for the trip unifier.

use std::path::{Path, PathBuf};

use crate::error::{Result, TripUnifyError};
use crate::schema::adapt::DateFormatConfig;
use crate::source::TripSource;

/// Reporting period whose extracts are processed
pub const DEFAULT_PERIOD: &str = "2025-01";
/// Destination database
pub const DEFAULT_DATABASE: &str = "nyc_taxi";
/// Default number of rows per CSV record batch
pub const DEFAULT_BATCH_SIZE: usize = 16384;
/// Environment override for the CSV batch size
pub const BATCH_SIZE_ENV: &str = "TRIP_UNIFY_BATCH_SIZE";

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var(BATCH_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Collection name for a reporting period, e.g. `2025-01` -> `trips_2025_01`
#[must_use]
pub fn collection_for_period(period: &str) -> String {
    format!("trips_{}", period.replace('-', "_"))
}

/// Configuration for a unification run
#[derive(Debug, Clone)]
pub struct UnifierConfig {
    /// Directory holding the four source extracts
    pub input_dir: PathBuf,
    /// Connection URI of the document store
    pub output_uri: String,
    /// Reporting period used to build file names
    pub period: String,
    /// Destination database
    pub database: String,
    /// Destination collection
    pub collection: String,
    /// Rows per CSV record batch
    pub batch_size: usize,
    /// Rows scanned for type inference; `None` scans the whole file
    pub infer_schema_rows: Option<usize>,
    /// Rows of the unified set logged as a sample
    pub sample_rows: usize,
    /// Show a spinner while writing to the sink
    pub show_progress: bool,
    /// Datetime formats for timestamp columns inferred as text
    pub date_format_config: DateFormatConfig,
}

impl Default for UnifierConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_uri: "mongodb://localhost:27017".to_string(),
            period: DEFAULT_PERIOD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: collection_for_period(DEFAULT_PERIOD),
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
            infer_schema_rows: None,
            sample_rows: 5,
            show_progress: true,
            date_format_config: DateFormatConfig::default(),
        }
    }
}

impl UnifierConfig {
    /// Configuration for an input directory and sink URI, everything else default
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_uri: impl Into<String>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_uri: output_uri.into(),
            ..Default::default()
        }
    }

    /// Path of one source's extract
    #[must_use]
    pub fn source_path(&self, source: TripSource) -> PathBuf {
        source.file_path(&self.input_dir, &self.period)
    }

    #[must_use]
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> Result<()> {
        if self.output_uri.trim().is_empty() {
            return Err(TripUnifyError::ConfigError(
                "output URI must not be empty".to_string(),
            ));
        }
        if self.database.is_empty() || self.collection.is_empty() {
            return Err(TripUnifyError::ConfigError(
                "database and collection names must not be empty".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(TripUnifyError::ConfigError(
                "batch size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
