//! The four trip-record datasets and the in-memory frames read from them.

use std::fmt;
use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::schema::field_mapping::{FHV_MAPPING, FHVHV_MAPPING, GREEN_MAPPING, YELLOW_MAPPING};
use crate::schema::SourceMapping;

/// A trip-record dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TripSource {
    Yellow,
    Green,
    Fhv,
    Fhvhv,
}

impl TripSource {
    /// Order in which sources are concatenated into the unified set
    pub const UNION_ORDER: [Self; 4] = [Self::Yellow, Self::Green, Self::Fhv, Self::Fhvhv];

    /// File name prefix used by the published monthly extracts
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Fhv => "fhv",
            Self::Fhvhv => "fhvhv",
        }
    }

    /// File name of this source's extract for a reporting period such as `2025-01`
    #[must_use]
    pub fn file_name(self, period: &str) -> String {
        format!("{}_tripdata_{period}.csv", self.file_prefix())
    }

    #[must_use]
    pub fn file_path(self, input_dir: &Path, period: &str) -> PathBuf {
        input_dir.join(self.file_name(period))
    }

    #[must_use]
    pub const fn mapping(self) -> &'static SourceMapping {
        match self {
            Self::Yellow => &YELLOW_MAPPING,
            Self::Green => &GREEN_MAPPING,
            Self::Fhv => &FHV_MAPPING,
            Self::Fhvhv => &FHVHV_MAPPING,
        }
    }

    /// Position of this source in [`Self::UNION_ORDER`]
    #[must_use]
    pub const fn union_rank(self) -> usize {
        match self {
            Self::Yellow => 0,
            Self::Green => 1,
            Self::Fhv => 2,
            Self::Fhvhv => 3,
        }
    }
}

impl fmt::Display for TripSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Fhv => "FHV",
            Self::Fhvhv => "FHVHV",
        };
        f.write_str(label)
    }
}

/// Record batches belonging to one source, with the schema they share
#[derive(Debug, Clone)]
pub struct SourceFrame {
    pub source: TripSource,
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
}

impl SourceFrame {
    #[must_use]
    pub fn new(source: TripSource, schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self {
            source,
            schema,
            batches,
        }
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}
