//! A Rust library for unifying NYC for-hire and taxi trip extracts into a
//! single canonical record set and appending it to a document store.

pub mod config;
pub mod error;
pub mod job;
pub mod models;
pub mod reader;
pub mod schema;
pub mod sink;
pub mod source;
pub mod transform;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::UnifierConfig;
pub use error::{Result, TripUnifyError};
pub use job::{JobSummary, run_job, unify_sources};
pub use models::{TripRecord, TripType};
pub use source::{SourceFrame, TripSource};

// Canonical schema
pub use schema::{CANONICAL_FIELDS, UnifiedTrips, canonical_schema, union_by_name};

// Sinks
pub use sink::{MongoSink, TripSink};

// Arrow types
pub use arrow::record_batch::RecordBatch;
