//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::path::Path;

use itertools::Itertools;

use crate::source::TripSource;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `rows` - Number of rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    rows: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} rows from {} in {:?}",
            operation,
            rows,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} rows from {}",
            operation,
            rows,
            path.display()
        );
    }
}

/// Log per-source row counts on a single line, e.g.
/// `Initial counts - Yellow: 3, Green: 1, FHV: 2, FHVHV: 5`
pub fn log_row_counts(stage: &str, counts: &[(TripSource, usize)]) {
    let rendered = counts
        .iter()
        .map(|(source, rows)| format!("{source}: {rows}"))
        .join(", ");
    log::info!("{stage} counts - {rendered}");
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
