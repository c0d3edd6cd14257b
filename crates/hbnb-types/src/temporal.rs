//! Timestamp helpers.
//!
//! Entity timestamps are timezone-naive local wall-clock times with
//! microsecond precision. They are persisted as ISO-8601 strings without an
//! offset, e.g. `2026-10-17T09:30:12.004512`.

use chrono::{Local, NaiveDateTime, Timelike};

use crate::error::TypeError;

/// Format used when rendering timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The current local time, truncated to microseconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    // Truncate so a rendered timestamp parses back to the same value.
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// Render a timestamp as ISO-8601.
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an ISO-8601 timestamp. The fractional part is optional.
pub fn parse(field: &str, value: &str) -> Result<NaiveDateTime, TypeError> {
    value
        .parse::<NaiveDateTime>()
        .map_err(|_| TypeError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}
