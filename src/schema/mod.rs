//! Canonical trip schema and the machinery that maps sources onto it.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

pub mod adapt;
pub mod field_mapping;
pub mod union;

pub use adapt::{AdapterError, DateFormatConfig, parse_int_or_null};
pub use field_mapping::{FieldMapping, FieldRule, MappingPlan, SourceMapping};
pub use union::{UnifiedTrips, pad_to_columns, union_by_name, union_columns};

pub const PICKUP_DATETIME: &str = "pickup_datetime";
pub const DROPOFF_DATETIME: &str = "dropoff_datetime";
pub const PU_LOCATION_ID: &str = "PULocationID";
pub const DO_LOCATION_ID: &str = "DOLocationID";
pub const TRIP_TYPE: &str = "trip_type";

/// Canonical field names in output order
pub const CANONICAL_FIELDS: [&str; 5] = [
    PICKUP_DATETIME,
    DROPOFF_DATETIME,
    PU_LOCATION_ID,
    DO_LOCATION_ID,
    TRIP_TYPE,
];

/// Tag stamped into `trip_type` for every high-volume for-hire record
pub const FHVHV_TAG: &str = "FHVHV";

/// Build the canonical schema for one source.
///
/// All sources share the first four columns; `trip_type` is `Int32` for the
/// sources that derive a code and `Utf8` for the tagged source.
#[must_use]
pub fn canonical_schema(trip_type: DataType) -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(PICKUP_DATETIME, adapt::CANONICAL_TIMESTAMP, true),
        Field::new(DROPOFF_DATETIME, adapt::CANONICAL_TIMESTAMP, true),
        Field::new(PU_LOCATION_ID, DataType::Int32, true),
        Field::new(DO_LOCATION_ID, DataType::Int32, true),
        Field::new(TRIP_TYPE, trip_type, true),
    ]))
}

/// Find a column by exact name, falling back to an ASCII case-insensitive match.
#[must_use]
pub fn resolve_column(schema: &Schema, name: &str) -> Option<usize> {
    schema.index_of(name).ok().or_else(|| {
        schema
            .fields()
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case(name))
    })
}
