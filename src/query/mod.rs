//! Blocking SQL for each aggregation
//!
//! Every function here takes a connection already inside a read
//! transaction (see [`crate::store::Store`]) and returns a fully
//! materialised result.
//!
//! Ordering conventions shared by all queries:
//! - "latest first" is `<timestamp> DESC, id DESC`
//! - chronological is `<timestamp> ASC, id ASC`
//!
//! SQLite sorts NULL below every value, so an undated thread or email
//! is treated as the oldest in both directions.

pub(crate) mod folders;
pub(crate) mod search;
pub(crate) mod threads;
pub(crate) mod users;

use chrono::{DateTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

/// Correlated subquery yielding the id of the most recent email of
/// the thread aliased `t`.
pub(crate) const LATEST_EMAIL_ID: &str = "(SELECT le.id FROM emails le
     WHERE le.thread_id = t.id
     ORDER BY le.sent_date DESC, le.id DESC
     LIMIT 1)";

/// Read an epoch-milliseconds column as a UTC timestamp.
pub(crate) fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<i64>>(idx)?
        .map(|ms| {
            DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    Type::Integer,
                    format!("timestamp {ms} out of range").into(),
                )
            })
        })
        .transpose()
}
