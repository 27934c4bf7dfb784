//! Core types and error definitions for schema adaptation.

use arrow::error::ArrowError;

/// Errors that can occur during type adaptation
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// Error during type conversion
    #[error("Type conversion error: {0}")]
    ConversionError(String),

    /// Date parsing error
    #[error("Date parsing error: {0}")]
    DateParsingError(String),
}

/// Alias for Result with `AdapterError`
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Configuration for datetime handling when a timestamp column was inferred as text
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Datetime format strings tried in order
    pub datetime_formats: Vec<String>,
    /// Date-only format strings, interpreted as midnight
    pub date_formats: Vec<String>,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            datetime_formats: vec![
                "%Y-%m-%d %H:%M:%S".to_string(),    // 2025-01-01 00:18:38
                "%Y-%m-%dT%H:%M:%S".to_string(),    // 2025-01-01T00:18:38
                "%Y-%m-%d %H:%M:%S%.f".to_string(), // 2025-01-01 00:18:38.123
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
                "%m/%d/%Y %H:%M:%S".to_string(), // 01/01/2025 00:18:38
                "%m/%d/%Y %I:%M:%S %p".to_string(), // 01/01/2025 12:18:38 AM
                "%m/%d/%Y %H:%M".to_string(),
            ],
            date_formats: vec!["%Y-%m-%d".to_string(), "%m/%d/%Y".to_string()],
        }
    }
}
