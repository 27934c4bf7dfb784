//! Canonical trip record
//!
//! The unified set is columnar until it reaches the sink. [`TripRecord`] is the
//! row view used for sampling, tests, and document conversion.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Int32Type, TimeUnit, TimestampMicrosecondType};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDateTime};
use mongodb::bson::{Bson, Document};
use serde::Serialize;

use crate::error::{Result, TripUnifyError};
use crate::schema::{DO_LOCATION_ID, DROPOFF_DATETIME, PICKUP_DATETIME, PU_LOCATION_ID, TRIP_TYPE};

/// Value of the `trip_type` field.
///
/// Three sources carry an integer code with source-specific meaning (rate code,
/// street-hail/dispatch code, shared-ride flag); the fourth carries a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TripType {
    Code(i32),
    Tag(String),
}

impl From<&TripType> for Bson {
    fn from(value: &TripType) -> Self {
        match value {
            TripType::Code(code) => Self::Int32(*code),
            TripType::Tag(tag) => Self::String(tag.clone()),
        }
    }
}

/// One canonical trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    pub pickup_datetime: Option<NaiveDateTime>,
    pub dropoff_datetime: Option<NaiveDateTime>,
    #[serde(rename = "PULocationID")]
    pub pu_location_id: Option<i32>,
    #[serde(rename = "DOLocationID")]
    pub do_location_id: Option<i32>,
    pub trip_type: Option<TripType>,
}

fn datetime_to_bson(value: Option<NaiveDateTime>) -> Bson {
    value.map_or(Bson::Null, |dt| {
        Bson::DateTime(mongodb::bson::DateTime::from_millis(
            dt.and_utc().timestamp_millis(),
        ))
    })
}

fn int_to_bson(value: Option<i32>) -> Bson {
    value.map_or(Bson::Null, Bson::Int32)
}

impl TripRecord {
    /// Convert to the document appended to the collection
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(PICKUP_DATETIME, datetime_to_bson(self.pickup_datetime));
        document.insert(DROPOFF_DATETIME, datetime_to_bson(self.dropoff_datetime));
        document.insert(PU_LOCATION_ID, int_to_bson(self.pu_location_id));
        document.insert(DO_LOCATION_ID, int_to_bson(self.do_location_id));
        document.insert(
            TRIP_TYPE,
            self.trip_type.as_ref().map_or(Bson::Null, Bson::from),
        );
        document
    }

    /// Decode every row of a canonical (or null-padded) batch
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let pickup = timestamp_column(batch, PICKUP_DATETIME)?;
        let dropoff = timestamp_column(batch, DROPOFF_DATETIME)?;
        let pu = int_column(batch, PU_LOCATION_ID)?;
        let dox = int_column(batch, DO_LOCATION_ID)?;
        let trip_type = trip_type_column(batch)?;

        Ok((0..batch.num_rows())
            .map(|row| Self {
                pickup_datetime: pickup(row),
                dropoff_datetime: dropoff(row),
                pu_location_id: pu(row),
                do_location_id: dox(row),
                trip_type: trip_type(row),
            })
            .collect())
    }
}

type Extractor<'a, T> = Box<dyn Fn(usize) -> Option<T> + 'a>;

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    batch.schema_ref().index_of(name).ok().map(|idx| batch.column(idx))
}

fn unexpected_type(name: &str, data_type: &DataType) -> TripUnifyError {
    TripUnifyError::schema(format!(
        "column '{name}' has unexpected type {data_type:?} in the unified set"
    ))
}

fn timestamp_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<Extractor<'a, NaiveDateTime>> {
    match column(batch, name) {
        None => Ok(Box::new(|_| None)),
        Some(array) => match array.data_type() {
            DataType::Null => Ok(Box::new(|_| None)),
            DataType::Timestamp(TimeUnit::Microsecond, None) => {
                let values = array.as_primitive::<TimestampMicrosecondType>();
                Ok(Box::new(move |row| {
                    if values.is_null(row) {
                        None
                    } else {
                        DateTime::from_timestamp_micros(values.value(row)).map(|dt| dt.naive_utc())
                    }
                }))
            }
            other => Err(unexpected_type(name, other)),
        },
    }
}

fn int_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<Extractor<'a, i32>> {
    match column(batch, name) {
        None => Ok(Box::new(|_| None)),
        Some(array) => match array.data_type() {
            DataType::Null => Ok(Box::new(|_| None)),
            DataType::Int32 => {
                let values = array.as_primitive::<Int32Type>();
                Ok(Box::new(move |row| {
                    (!values.is_null(row)).then(|| values.value(row))
                }))
            }
            other => Err(unexpected_type(name, other)),
        },
    }
}

fn trip_type_column(batch: &RecordBatch) -> Result<Extractor<'_, TripType>> {
    let Some(array) = column(batch, TRIP_TYPE) else {
        return Ok(Box::new(|_| None));
    };
    match array.data_type() {
        DataType::Null => Ok(Box::new(|_| None)),
        DataType::Int32 => {
            let values = array.as_primitive::<Int32Type>();
            Ok(Box::new(move |row| {
                (!values.is_null(row)).then(|| TripType::Code(values.value(row)))
            }))
        }
        DataType::Utf8 => {
            let values = array.as_string::<i32>();
            Ok(Box::new(move |row| {
                (!values.is_null(row)).then(|| TripType::Tag(values.value(row).to_string()))
            }))
        }
        other => Err(unexpected_type(TRIP_TYPE, other)),
    }
}
