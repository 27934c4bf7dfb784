//! Module for reading trip CSV extracts into Arrow record batches.
//!
//! Column types are inferred from the file contents before the batches are
//! decoded, so a source's columns arrive typed as integers, floats, timestamps
//! or text depending on what the extract holds.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::config::UnifierConfig;
use crate::error::util::{safe_open_file, validate_directory};
use crate::error::{Result, TripUnifyError};
use crate::source::{SourceFrame, TripSource};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a header-having CSV file with inferred column types
///
/// # Arguments
/// * `path` - The CSV file
/// * `batch_size` - Rows per record batch
/// * `infer_rows` - Rows scanned for type inference, `None` for all
pub fn read_csv(
    path: &Path,
    batch_size: usize,
    infer_rows: Option<usize>,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let mut file = safe_open_file(path, "reading trip records")?;

    let format = Format::default().with_header(true);
    let (schema, scanned) = format.infer_schema(&mut file, infer_rows)?;
    log::debug!(
        "Inferred {} columns from {} rows of {}",
        schema.fields().len(),
        scanned,
        path.display()
    );

    file.rewind().map_err(|e| {
        TripUnifyError::io_error_with_source("Failed to rewind after schema inference", e)
            .with_path(path)
    })?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Read one source's extract from the configured input directory
pub fn read_source(source: TripSource, config: &UnifierConfig) -> Result<SourceFrame> {
    let path = config.source_path(source);
    log_operation_start(&format!("Reading {source} trips from"), &path);

    let start = Instant::now();
    let (schema, batches) = read_csv(&path, config.batch_size, config.infer_schema_rows)?;
    let frame = SourceFrame::new(source, schema, batches);

    log_operation_complete("read", &path, frame.num_rows(), Some(start.elapsed()));
    Ok(frame)
}

/// Read all four sources in parallel, returned in [`TripSource::UNION_ORDER`]
pub fn load_sources_parallel(config: &UnifierConfig) -> Result<Vec<SourceFrame>> {
    validate_directory(config.input_dir(), "trip record extracts")?;

    TripSource::UNION_ORDER
        .par_iter()
        .map(|source| read_source(*source, config))
        .collect()
}
