//! Module for converting source columns into canonical column types.
//!
//! Two policies live here. Zone identifiers and trip codes use [`parse_int_or_null`]:
//! anything that does not read as an integer becomes null. Timestamps use
//! [`convert_to_timestamp`], where an unreadable value is an error.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, GenericStringArray, Int32Array, OffsetSizeTrait, StringArray,
    TimestampMicrosecondArray, new_null_array,
};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, TimeUnit};

use crate::schema::adapt::date_utils::parse_datetime_string;
use crate::schema::adapt::types::{AdapterError, DateFormatConfig, Result};

/// Canonical type of the pickup/dropoff columns
pub const CANONICAL_TIMESTAMP: DataType = DataType::Timestamp(TimeUnit::Microsecond, None);

/// Parse a single text value as an integer, or `None` if it is not one.
///
/// Accepts an optional sign and an optional all-digit fractional part, which is
/// truncated (`"2.0"` reads as `2`). Surrounding whitespace is ignored.
#[must_use]
pub fn parse_integer(value: &str) -> Option<i32> {
    let value = value.trim();
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    whole.parse::<i32>().ok()
}

fn parse_integer_strings<O: OffsetSizeTrait>(array: &GenericStringArray<O>) -> Int32Array {
    array.iter().map(|v| v.and_then(parse_integer)).collect()
}

/// Convert any column into a nullable `Int32` column, turning every value that
/// cannot be read as an integer into null.
///
/// Numeric and boolean columns go through Arrow's safe cast (out-of-range and
/// NaN become null, floats truncate). Text columns go through [`parse_integer`].
pub fn parse_int_or_null(array: &ArrayRef) -> Result<ArrayRef> {
    match array.data_type() {
        DataType::Int32 => Ok(array.clone()),
        DataType::Null => Ok(new_null_array(&DataType::Int32, array.len())),
        DataType::Utf8 => Ok(Arc::new(parse_integer_strings(array.as_string::<i32>()))),
        DataType::LargeUtf8 => Ok(Arc::new(parse_integer_strings(array.as_string::<i64>()))),
        t if t.is_numeric() || matches!(t, DataType::Boolean) => {
            cast::cast(array, &DataType::Int32).map_err(AdapterError::ArrowError)
        }
        other => Err(AdapterError::ConversionError(format!(
            "cannot derive an integer from a {other:?} column"
        ))),
    }
}

fn parse_timestamp_strings<O: OffsetSizeTrait>(
    array: &GenericStringArray<O>,
    date_config: &DateFormatConfig,
) -> Result<TimestampMicrosecondArray> {
    let mut values = Vec::with_capacity(array.len());
    for value in array.iter() {
        match value.map(str::trim) {
            None | Some("") => values.push(None),
            Some(text) => {
                let parsed = parse_datetime_string(text, date_config).ok_or_else(|| {
                    AdapterError::DateParsingError(format!("unrecognised datetime '{text}'"))
                })?;
                values.push(Some(parsed.and_utc().timestamp_micros()));
            }
        }
    }
    Ok(TimestampMicrosecondArray::from(values))
}

/// Convert a column into the canonical timestamp type.
///
/// Timestamp and date columns are cast; text columns are parsed with the
/// configured formats and fail on any non-empty value that does not parse.
pub fn convert_to_timestamp(array: &ArrayRef, date_config: &DateFormatConfig) -> Result<ArrayRef> {
    match array.data_type() {
        t if *t == CANONICAL_TIMESTAMP => Ok(array.clone()),
        DataType::Null => Ok(new_null_array(&CANONICAL_TIMESTAMP, array.len())),
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => {
            cast::cast(array, &CANONICAL_TIMESTAMP).map_err(AdapterError::ArrowError)
        }
        DataType::Utf8 => Ok(Arc::new(parse_timestamp_strings(
            array.as_string::<i32>(),
            date_config,
        )?)),
        DataType::LargeUtf8 => Ok(Arc::new(parse_timestamp_strings(
            array.as_string::<i64>(),
            date_config,
        )?)),
        other => Err(AdapterError::ConversionError(format!(
            "cannot derive a timestamp from a {other:?} column"
        ))),
    }
}

/// Create a null array of the specified type and length
#[must_use]
pub fn create_null_array(data_type: &DataType, length: usize) -> ArrayRef {
    new_null_array(data_type, length)
}

/// Create a text column holding the same value on every row
#[must_use]
pub fn constant_string_array(value: &str, length: usize) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(
        std::iter::repeat(value).take(length),
    ))
}
