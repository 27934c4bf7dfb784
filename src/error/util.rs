//! Utility functions for error handling
//!
//! Path-aware wrappers around filesystem access so that a missing or unreadable
//! input surfaces with the file it concerns.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, TripUnifyError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(TripUnifyError::io_error_with_source(
            format!("File not found, needed for: {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        )
        .with_path(path));
    }

    if !path.is_file() {
        return Err(TripUnifyError::io_error_with_source(
            format!("Path is not a file, expected a file for: {purpose}"),
            io::Error::from(io::ErrorKind::InvalidInput),
        )
        .with_path(path));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        TripUnifyError::io_error_with_source(context, e).with_path(path)
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(TripUnifyError::io_error_with_source(
            format!("Directory not found, needed for: {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        )
        .with_path(path));
    }

    if !path.is_dir() {
        return Err(TripUnifyError::io_error_with_source(
            format!("Path is not a directory, expected a directory for: {purpose}"),
            io::Error::from(io::ErrorKind::InvalidInput),
        )
        .with_path(path));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => format!("Failed to access directory for: {purpose}"),
            };
            Err(TripUnifyError::io_error_with_source(context, e).with_path(path))
        }
    }
}
