//! Mapping raw source frames onto the canonical trip schema.

use rayon::prelude::*;

use crate::error::{Result, TripUnifyError};
use crate::schema::DateFormatConfig;
use crate::source::SourceFrame;
use crate::utils::log_warning;

/// Apply a source's mapping table to every batch of its frame
pub fn transform_source(frame: &SourceFrame, date_config: &DateFormatConfig) -> Result<SourceFrame> {
    let source = frame.source;
    let plan = source.mapping().plan(&frame.schema).map_err(|e| match e {
        TripUnifyError::SchemaError(msg) => TripUnifyError::schema(format!("{source} source: {msg}")),
        other => other,
    })?;

    for column in plan.missing_columns() {
        log_warning(
            &format!("{source} source has no '{column}' column, filling with nulls"),
            None,
        );
    }

    let batches = frame
        .batches
        .iter()
        .map(|batch| plan.apply(batch, date_config))
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e| log::error!("Failed to map {source} trips: {e}"))?;

    Ok(SourceFrame::new(source, plan.output_schema(), batches))
}

/// Transform all frames in parallel, keeping their order
pub fn transform_all(frames: &[SourceFrame], date_config: &DateFormatConfig) -> Result<Vec<SourceFrame>> {
    frames
        .par_iter()
        .map(|frame| transform_source(frame, date_config))
        .collect()
}
