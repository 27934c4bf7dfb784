//! Union of per-source record sets
//!
//! Concatenation tolerates sources whose mapped schemas differ. The output
//! column set is the union of every source's columns in first-seen order, and
//! each batch is padded with null columns for names it lacks before it is
//! appended. Columns may still differ in type between sources (`trip_type` is
//! an integer for three sources and text for the fourth); each padded batch
//! keeps its own types.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use itertools::Itertools;
use mongodb::bson::Document;

use crate::error::Result;
use crate::models::TripRecord;
use crate::schema::adapt::create_null_array;
use crate::source::{SourceFrame, TripSource};

/// Column names across all schemas, deduplicated in first-seen order
#[must_use]
pub fn union_columns(schemas: &[SchemaRef]) -> Vec<String> {
    schemas
        .iter()
        .flat_map(|schema| schema.fields().iter().map(|f| f.name().clone()))
        .unique()
        .collect()
}

/// Reorder a batch to `columns`, adding all-null columns for absent names.
///
/// Columns of `batch` not listed in `columns` are dropped.
pub fn pad_to_columns(batch: &RecordBatch, columns: &[String]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let rows = batch.num_rows();
    let mut fields = Vec::with_capacity(columns.len());
    let mut arrays = Vec::with_capacity(columns.len());

    for name in columns {
        if let Ok(idx) = schema.index_of(name) {
            fields.push(schema.field(idx).clone());
            arrays.push(batch.column(idx).clone());
        } else {
            fields.push(Field::new(name, DataType::Null, true));
            arrays.push(create_null_array(&DataType::Null, rows));
        }
    }

    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

/// Concatenate source frames in [`TripSource::UNION_ORDER`], padding each
/// batch to the union of all column names.
pub fn union_by_name(mut frames: Vec<SourceFrame>) -> Result<UnifiedTrips> {
    frames.sort_by_key(|frame| frame.source.union_rank());

    let schemas: Vec<SchemaRef> = frames.iter().map(|f| f.schema.clone()).collect();
    let columns = union_columns(&schemas);

    let mut parts = Vec::with_capacity(frames.iter().map(|f| f.batches.len()).sum());
    for frame in &frames {
        for batch in &frame.batches {
            parts.push((frame.source, pad_to_columns(batch, &columns)?));
        }
    }

    Ok(UnifiedTrips { columns, parts })
}

/// The concatenated trip set, still columnar
#[derive(Debug, Clone)]
pub struct UnifiedTrips {
    columns: Vec<String>,
    parts: Vec<(TripSource, RecordBatch)>,
}

impl UnifiedTrips {
    /// Output column set
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Padded batches, each tagged with the source it came from
    #[must_use]
    pub fn parts(&self) -> &[(TripSource, RecordBatch)] {
        &self.parts
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.parts.iter().map(|(_, batch)| batch.num_rows()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Origin of every row, in output order
    #[must_use]
    pub fn row_sources(&self) -> Vec<TripSource> {
        self.parts
            .iter()
            .flat_map(|(source, batch)| std::iter::repeat(*source).take(batch.num_rows()))
            .collect()
    }

    /// Row counts per source, in output order
    #[must_use]
    pub fn counts_by_source(&self) -> Vec<(TripSource, usize)> {
        self.parts
            .iter()
            .chunk_by(|(source, _)| *source)
            .into_iter()
            .map(|(source, group)| (source, group.map(|(_, b)| b.num_rows()).sum()))
            .collect()
    }

    /// Decode every row into a [`TripRecord`]
    pub fn records(&self) -> Result<Vec<TripRecord>> {
        let mut records = Vec::with_capacity(self.num_rows());
        for (_, batch) in &self.parts {
            records.extend(TripRecord::from_batch(batch)?);
        }
        Ok(records)
    }

    /// Convert every row into a store document, releasing each batch as soon
    /// as its rows are converted
    pub fn into_documents(self) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(self.num_rows());
        for (_, batch) in self.parts {
            documents.extend(
                TripRecord::from_batch(&batch)?
                    .iter()
                    .map(TripRecord::to_document),
            );
        }
        Ok(documents)
    }

    /// Decode the first `n` rows
    pub fn sample(&self, n: usize) -> Result<Vec<TripRecord>> {
        let mut records = Vec::with_capacity(n);
        for (_, batch) in &self.parts {
            let remaining = n - records.len();
            if remaining == 0 {
                break;
            }
            let head = batch.slice(0, remaining.min(batch.num_rows()));
            records.extend(TripRecord::from_batch(&head)?);
        }
        Ok(records)
    }
}
