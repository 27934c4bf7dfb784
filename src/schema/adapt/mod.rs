//! Module for adapting source column types to the canonical trip schema.

pub mod conversions;
pub mod date_utils;
pub mod types;

// Re-export the main types and functions for easier access
pub use conversions::{
    CANONICAL_TIMESTAMP, constant_string_array, convert_to_timestamp, create_null_array,
    parse_int_or_null, parse_integer,
};
pub use date_utils::parse_datetime_string;
pub use types::{AdapterError, DateFormatConfig, Result};
