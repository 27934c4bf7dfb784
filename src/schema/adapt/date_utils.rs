//! Datetime string parsing for timestamp columns that arrive as text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::schema::adapt::types::DateFormatConfig;

/// Parse a datetime string using the configured formats.
///
/// RFC 3339 strings with an offset are normalised to UTC. Date-only values map
/// to midnight.
#[must_use]
pub fn parse_datetime_string(value: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in &config.datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
