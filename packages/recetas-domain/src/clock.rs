//! Millisecond-precision UTC timestamps.
//!
//! Collection timestamps are persisted as Unix milliseconds, so every timestamp handed to the
//! store is truncated to that precision first. Values read back compare equal to the originals.

use time::{OffsetDateTime, error::ComponentRange};

pub fn now() -> OffsetDateTime {
	truncate(OffsetDateTime::now_utc())
}

pub fn truncate(value: OffsetDateTime) -> OffsetDateTime {
	value.replace_millisecond(value.millisecond()).unwrap_or(value)
}

pub fn to_millis(value: OffsetDateTime) -> i64 {
	(value.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn from_millis(millis: i64) -> Result<OffsetDateTime, ComponentRange> {
	OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
}
