//! # Retention Policy
//!
//! Caps raw sample storage at a fixed 7-day horizon. This is purely a
//! storage-growth bound: the Aggregator works over unbounded history, and
//! the rolled-up buckets it produces are never persisted, so pruning raw
//! samples is the only lifecycle management the store needs. At 1 Hz the
//! retained set stays at or below 604,800 records.

use chrono::{DateTime, Duration, Local};

use crate::sample::Sample;

/// Raw samples older than this many days are pruned from the store.
pub const RETENTION_DAYS: i64 = 7;

/// The cutoff instant for retention relative to `now`.
pub fn horizon(now: DateTime<Local>) -> DateTime<Local> {
    now - Duration::days(RETENTION_DAYS)
}

/// Drops samples at or beyond the retention horizon.
///
/// Retains exactly `{ s : s.timestamp > now - 7 days }`; a sample sitting
/// precisely on the horizon is excluded (strict comparison). Invoked after
/// each append so the persisted store never exceeds the horizon.
pub fn prune(samples: Vec<Sample>, now: DateTime<Local>) -> Vec<Sample> {
    let cutoff = horizon(now);
    samples
        .into_iter()
        .filter(|sample| sample.timestamp > cutoff)
        .collect()
}
