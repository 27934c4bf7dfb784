//! Per-source field mapping tables
//!
//! Each source dataset names and types its columns differently. A [`SourceMapping`]
//! is a fixed table saying, for every canonical field, which source column feeds it
//! and how. Mapping happens in two steps: [`SourceMapping::plan`] resolves the table
//! against a file's inferred schema once, then [`MappingPlan::apply`] runs over each
//! record batch.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::error::{Result, TripUnifyError};
use crate::schema::adapt::{
    CANONICAL_TIMESTAMP, DateFormatConfig, constant_string_array, convert_to_timestamp,
    create_null_array, parse_int_or_null,
};
use crate::schema::{
    DO_LOCATION_ID, DROPOFF_DATETIME, FHVHV_TAG, PICKUP_DATETIME, PU_LOCATION_ID, TRIP_TYPE,
    resolve_column,
};

/// How a canonical field is produced from a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Copy a timestamp column. The column must exist.
    Timestamp(&'static str),
    /// Parse a column into a nullable integer. The column must exist.
    Integer(&'static str),
    /// Parse a column into a nullable integer. A missing column yields nulls.
    OptionalInteger(&'static str),
    /// Stamp the same text on every row, ignoring the source columns.
    Constant(&'static str),
}

impl FieldRule {
    /// Arrow type this rule produces
    #[must_use]
    pub fn output_type(&self) -> DataType {
        match self {
            Self::Timestamp(_) => CANONICAL_TIMESTAMP,
            Self::Integer(_) | Self::OptionalInteger(_) => DataType::Int32,
            Self::Constant(_) => DataType::Utf8,
        }
    }

    /// Source column the rule reads, if any
    #[must_use]
    pub fn source_column(&self) -> Option<&'static str> {
        match *self {
            Self::Timestamp(name) | Self::Integer(name) | Self::OptionalInteger(name) => {
                Some(name)
            }
            Self::Constant(_) => None,
        }
    }

    /// Whether planning fails when the source column is absent
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Timestamp(_) | Self::Integer(_))
    }
}

/// One canonical field and the rule that fills it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub target: &'static str,
    pub rule: FieldRule,
}

impl FieldMapping {
    #[must_use]
    pub const fn new(target: &'static str, rule: FieldRule) -> Self {
        Self { target, rule }
    }
}

/// The full mapping table for one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapping {
    pub fields: [FieldMapping; 5],
}

pub const YELLOW_MAPPING: SourceMapping = SourceMapping {
    fields: [
        FieldMapping::new(PICKUP_DATETIME, FieldRule::Timestamp("tpep_pickup_datetime")),
        FieldMapping::new(DROPOFF_DATETIME, FieldRule::Timestamp("tpep_dropoff_datetime")),
        FieldMapping::new(PU_LOCATION_ID, FieldRule::Integer("PULocationID")),
        FieldMapping::new(DO_LOCATION_ID, FieldRule::Integer("DOLocationID")),
        FieldMapping::new(TRIP_TYPE, FieldRule::Integer("RatecodeID")),
    ],
};

pub const GREEN_MAPPING: SourceMapping = SourceMapping {
    fields: [
        FieldMapping::new(PICKUP_DATETIME, FieldRule::Timestamp("lpep_pickup_datetime")),
        FieldMapping::new(DROPOFF_DATETIME, FieldRule::Timestamp("lpep_dropoff_datetime")),
        FieldMapping::new(PU_LOCATION_ID, FieldRule::Integer("PULocationID")),
        FieldMapping::new(DO_LOCATION_ID, FieldRule::Integer("DOLocationID")),
        FieldMapping::new(TRIP_TYPE, FieldRule::Integer("trip_type")),
    ],
};

pub const FHV_MAPPING: SourceMapping = SourceMapping {
    fields: [
        FieldMapping::new(PICKUP_DATETIME, FieldRule::Timestamp("pickup_datetime")),
        FieldMapping::new(DROPOFF_DATETIME, FieldRule::Timestamp("dropOff_datetime")),
        FieldMapping::new(PU_LOCATION_ID, FieldRule::Integer("PUlocationID")),
        FieldMapping::new(DO_LOCATION_ID, FieldRule::Integer("DOlocationID")),
        FieldMapping::new(TRIP_TYPE, FieldRule::Integer("SR_Flag")),
    ],
};

// The license identifier in this source has no counterpart in the other code
// spaces, so the record is tagged instead. The tag is stamped even when the
// zone columns are absent.
pub const FHVHV_MAPPING: SourceMapping = SourceMapping {
    fields: [
        FieldMapping::new(PICKUP_DATETIME, FieldRule::Timestamp("pickup_datetime")),
        FieldMapping::new(DROPOFF_DATETIME, FieldRule::Timestamp("dropoff_datetime")),
        FieldMapping::new(PU_LOCATION_ID, FieldRule::OptionalInteger("PULocationID")),
        FieldMapping::new(DO_LOCATION_ID, FieldRule::OptionalInteger("DOLocationID")),
        FieldMapping::new(TRIP_TYPE, FieldRule::Constant(FHVHV_TAG)),
    ],
};

impl SourceMapping {
    /// Schema every batch has after this mapping is applied
    #[must_use]
    pub fn output_schema(&self) -> SchemaRef {
        Arc::new(Schema::new(
            self.fields
                .iter()
                .map(|m| Field::new(m.target, m.rule.output_type(), true))
                .collect::<Vec<_>>(),
        ))
    }

    /// Resolve this table against a source file's schema.
    ///
    /// Fails if a required column is absent. Absent optional columns are recorded
    /// in [`MappingPlan::missing_columns`] and produce null columns.
    pub fn plan(&self, source_schema: &Schema) -> Result<MappingPlan> {
        let mut steps = Vec::with_capacity(self.fields.len());
        let mut missing = Vec::new();

        for mapping in &self.fields {
            let index = match mapping.rule.source_column() {
                Some(column) => {
                    let index = resolve_column(source_schema, column);
                    if index.is_none() {
                        if mapping.rule.is_required() {
                            return Err(TripUnifyError::schema(format!(
                                "required column '{column}' for '{}' not found; available columns: [{}]",
                                mapping.target,
                                source_schema
                                    .fields()
                                    .iter()
                                    .map(|f| f.name().as_str())
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            )));
                        }
                        missing.push(column);
                    }
                    index
                }
                None => None,
            };
            steps.push(PlannedField {
                rule: mapping.rule,
                index,
            });
        }

        Ok(MappingPlan {
            steps,
            missing,
            output_schema: self.output_schema(),
        })
    }
}

#[derive(Debug, Clone)]
struct PlannedField {
    rule: FieldRule,
    index: Option<usize>,
}

/// A mapping table resolved against one source schema
#[derive(Debug, Clone)]
pub struct MappingPlan {
    steps: Vec<PlannedField>,
    missing: Vec<&'static str>,
    output_schema: SchemaRef,
}

impl MappingPlan {
    /// Optional source columns that were not found
    #[must_use]
    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing
    }

    #[must_use]
    pub fn output_schema(&self) -> SchemaRef {
        self.output_schema.clone()
    }

    /// Map one source batch onto the canonical schema
    pub fn apply(&self, batch: &RecordBatch, date_config: &DateFormatConfig) -> Result<RecordBatch> {
        let rows = batch.num_rows();
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let column = match (step.rule, step.index) {
                (FieldRule::Constant(value), _) => constant_string_array(value, rows),
                (FieldRule::Timestamp(_), Some(idx)) => {
                    convert_to_timestamp(batch.column(idx), date_config)?
                }
                (FieldRule::Integer(_) | FieldRule::OptionalInteger(_), Some(idx)) => {
                    parse_int_or_null(batch.column(idx))?
                }
                (rule, None) => create_null_array(&rule.output_type(), rows),
            };
            columns.push(column);
        }

        let options = RecordBatchOptions::new().with_row_count(Some(rows));
        Ok(RecordBatch::try_new_with_options(
            self.output_schema.clone(),
            columns,
            &options,
        )?)
    }
}
