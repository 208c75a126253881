//! Conversions between the stored [`Post`](crate::domain::Post) and the
//! editable [`PostForm`](crate::domain::PostForm).
//!
//! Both directions are total. Dates and times of day are interpreted in the
//! listing's time zone, which callers pass explicitly.

mod materialize;
mod project;

pub use materialize::materialize;
pub use project::project;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Combine a local calendar date and time of day into a UTC instant.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
/// Times skipped by a DST gap yield `None`.
pub fn combine_local(zone: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Split a UTC instant into the local date and time of day.
pub fn split_local(zone: Tz, instant: DateTime<Utc>) -> (NaiveDate, NaiveTime) {
    let local = instant.with_timezone(&zone).naive_local();
    (local.date(), local.time())
}
