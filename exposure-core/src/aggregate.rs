//! # Aggregator
//!
//! Folds an unbounded sequence of raw samples into the fixed bucket sets the
//! dashboard renders: 24 hourly buckets for today, 7 daily buckets for this
//! week, and 6 decibel-range buckets for the time distribution. Buckets are
//! always emitted complete and in canonical order, zero-filled where no
//! samples landed; the UI renders every row every time, never a sparse list.
//!
//! Aggregation only sums, so the result is independent of sample arrival
//! order, and two samples with the same timestamp are both counted.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Timelike, Weekday};

use crate::sample::Sample;
use crate::window::{week_start, TimeWindow};

/// Duration one 1 Hz sample contributes to its bucket, in hours.
pub const SAMPLE_INTERVAL_HOURS: f32 = 1.0 / 3600.0;

/// The four dashboard views the Aggregator can produce buckets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// 24 hour-of-day buckets over today.
    Hourly,
    /// 7 weekday buckets (Mon–Sun) over this week.
    Daily,
    /// 6 decibel-range buckets over today.
    RangeDay,
    /// 6 decibel-range buckets over this week.
    RangeWeek,
}

/// Fixed 6-way decibel partition for the time-by-range views.
///
/// Variants are ordered ascending; the discriminant doubles as the canonical
/// bucket position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecibelRange {
    Below40,
    From40To60,
    From60To80,
    From80To90,
    From90To100,
    Above100,
}

impl DecibelRange {
    /// All ranges in canonical ascending order.
    pub const ALL: [DecibelRange; 6] = [
        DecibelRange::Below40,
        DecibelRange::From40To60,
        DecibelRange::From60To80,
        DecibelRange::From80To90,
        DecibelRange::From90To100,
        DecibelRange::Above100,
    ];

    /// The range a sound level falls into. Total over all finite levels.
    pub fn from_level(level_db: f32) -> Self {
        if level_db < 40.0 {
            DecibelRange::Below40
        } else if level_db < 60.0 {
            DecibelRange::From40To60
        } else if level_db < 80.0 {
            DecibelRange::From60To80
        } else if level_db < 90.0 {
            DecibelRange::From80To90
        } else if level_db < 100.0 {
            DecibelRange::From90To100
        } else {
            DecibelRange::Above100
        }
    }

    /// Stable display label, part of any exported form.
    pub fn label(self) -> &'static str {
        match self {
            DecibelRange::Below40 => "20-40dB",
            DecibelRange::From40To60 => "40-60dB",
            DecibelRange::From60To80 => "60-80dB",
            DecibelRange::From80To90 => "80-90dB",
            DecibelRange::From90To100 => "90-100dB",
            DecibelRange::Above100 => "100+dB",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Identity of one aggregation cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKey {
    /// Hour of day, 0–23.
    Hour(u32),
    /// One calendar day of the anchor week.
    Day { weekday: Weekday, date: NaiveDate },
    /// One decibel range.
    Range(DecibelRange),
}

/// One aggregation cell: running sums for a single hour, day, or range.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    pub level_sum: f32,
    pub duration_hours: f32,
    pub count: u32,
}

impl Bucket {
    fn zero(key: BucketKey) -> Self {
        Self {
            key,
            level_sum: 0.0,
            duration_hours: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, level_db: f32) {
        self.level_sum += level_db;
        self.duration_hours += SAMPLE_INTERVAL_HOURS;
        self.count += 1;
    }

    /// Average level over the bucket's samples; 0 for an empty bucket.
    pub fn avg_level(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.level_sum / self.count as f32
        }
    }
}

/// Rolls raw samples up into the fixed bucket set for one view.
///
/// Single pass: each in-window sample is assigned to exactly one bucket and
/// accumulated; samples outside the view's window (the anchor's day for
/// `Hourly`/`RangeDay`, the anchor's Monday-based week for the others) are
/// skipped. The result always contains every canonical key exactly once, in
/// canonical order (hours 0–23, weekdays Mon–Sun, ranges ascending),
/// regardless of input order or gaps. Empty input yields all-zero buckets,
/// never an error.
///
/// # Arguments
/// * `samples` - Raw samples, in any order
/// * `view` - Which bucket set to produce
/// * `anchor` - The instant the view is anchored on (usually now)
pub fn aggregate(samples: &[Sample], view: View, anchor: DateTime<Local>) -> Vec<Bucket> {
    let window = match view {
        View::Hourly | View::RangeDay => TimeWindow::today(anchor),
        View::Daily | View::RangeWeek => TimeWindow::this_week(anchor),
    };

    let mut buckets = canonical_buckets(view, anchor);

    for sample in samples {
        if !window.contains(sample.timestamp) {
            continue;
        }
        let index = match view {
            View::Hourly => sample.timestamp.hour() as usize,
            View::Daily => sample
                .timestamp
                .weekday()
                .num_days_from_monday() as usize,
            View::RangeDay | View::RangeWeek => DecibelRange::from_level(sample.level_db).index(),
        };
        buckets[index].add(sample.level_db);
    }

    buckets
}

/// The zero-filled bucket list for a view, in canonical order.
fn canonical_buckets(view: View, anchor: DateTime<Local>) -> Vec<Bucket> {
    match view {
        View::Hourly => (0u32..24)
            .map(|hour| Bucket::zero(BucketKey::Hour(hour)))
            .collect(),
        View::Daily => {
            let monday = week_start(anchor.date_naive());
            (0u64..7)
                .map(|offset| {
                    let date = monday + Days::new(offset);
                    Bucket::zero(BucketKey::Day {
                        weekday: date.weekday(),
                        date,
                    })
                })
                .collect()
        }
        View::RangeDay | View::RangeWeek => DecibelRange::ALL
            .iter()
            .map(|&range| Bucket::zero(BucketKey::Range(range)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, level: f32) -> Sample {
        Sample::new(
            Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap(),
            level,
        )
        .unwrap()
    }

    // 2026-03-04 is a Wednesday.
    fn anchor() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 4, 16, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_all_zero_buckets() {
        for view in [View::Hourly, View::Daily, View::RangeDay, View::RangeWeek] {
            let buckets = aggregate(&[], view, anchor());
            let expected = match view {
                View::Hourly => 24,
                View::Daily => 7,
                _ => 6,
            };
            assert_eq!(buckets.len(), expected);
            for bucket in &buckets {
                assert_eq!(bucket.count, 0);
                assert_eq!(bucket.avg_level(), 0.0);
                assert_eq!(bucket.duration_hours, 0.0);
            }
        }
    }

    #[test]
    fn hourly_buckets_are_in_canonical_order() {
        let buckets = aggregate(&[], View::Hourly, anchor());
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.key, BucketKey::Hour(i as u32));
        }
    }

    #[test]
    fn daily_buckets_cover_monday_through_sunday() {
        let buckets = aggregate(&[], View::Daily, anchor());
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(
                bucket.key,
                BucketKey::Day {
                    weekday: weekdays[i],
                    date: monday + Days::new(i as u64),
                }
            );
        }
    }

    #[test]
    fn known_sequence_round_trip() {
        // Three samples at 90 dB in hour 10, one at 50 dB in hour 14.
        let samples = [
            sample(2026, 3, 4, 10, 0, 0, 90.0),
            sample(2026, 3, 4, 10, 0, 1, 90.0),
            sample(2026, 3, 4, 10, 0, 2, 90.0),
            sample(2026, 3, 4, 14, 30, 0, 50.0),
        ];
        let buckets = aggregate(&samples, View::Hourly, anchor());

        let hour10 = &buckets[10];
        assert_eq!(hour10.count, 3);
        assert_eq!(hour10.avg_level(), 90.0);
        assert!((hour10.duration_hours - 3.0 / 3600.0).abs() < 1e-9);

        let hour14 = &buckets[14];
        assert_eq!(hour14.count, 1);
        assert_eq!(hour14.avg_level(), 50.0);
        assert!((hour14.duration_hours - 1.0 / 3600.0).abs() < 1e-9);

        for (hour, bucket) in buckets.iter().enumerate() {
            if hour != 10 && hour != 14 {
                assert_eq!(bucket.count, 0, "hour {} should be empty", hour);
            }
        }
    }

    #[test]
    fn counts_sum_to_in_window_samples() {
        let samples = [
            sample(2026, 3, 4, 9, 0, 0, 70.0),
            sample(2026, 3, 4, 9, 0, 1, 75.0),
            sample(2026, 3, 3, 9, 0, 0, 80.0),  // yesterday: in week, not today
            sample(2026, 2, 20, 9, 0, 0, 80.0), // out of both windows
        ];

        let hourly: u32 = aggregate(&samples, View::Hourly, anchor())
            .iter()
            .map(|b| b.count)
            .sum();
        assert_eq!(hourly, 2);

        let daily: u32 = aggregate(&samples, View::Daily, anchor())
            .iter()
            .map(|b| b.count)
            .sum();
        assert_eq!(daily, 3);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut samples = vec![
            sample(2026, 3, 4, 8, 0, 0, 65.0),
            sample(2026, 3, 4, 8, 0, 1, 85.0),
            sample(2026, 3, 4, 12, 0, 0, 95.0),
            sample(2026, 3, 4, 23, 59, 59, 42.0),
        ];
        let forward = aggregate(&samples, View::Hourly, anchor());
        samples.reverse();
        let reversed = aggregate(&samples, View::Hourly, anchor());
        assert_eq!(forward, reversed);

        samples.swap(0, 2);
        let swapped = aggregate(&samples, View::Hourly, anchor());
        assert_eq!(forward, swapped);
    }

    #[test]
    fn duplicate_timestamps_are_both_counted() {
        let samples = [
            sample(2026, 3, 4, 10, 0, 0, 90.0),
            sample(2026, 3, 4, 10, 0, 0, 90.0),
        ];
        let buckets = aggregate(&samples, View::Hourly, anchor());
        assert_eq!(buckets[10].count, 2);
    }

    #[test]
    fn range_partition_boundaries() {
        assert_eq!(DecibelRange::from_level(0.0), DecibelRange::Below40);
        assert_eq!(DecibelRange::from_level(39.9), DecibelRange::Below40);
        assert_eq!(DecibelRange::from_level(40.0), DecibelRange::From40To60);
        assert_eq!(DecibelRange::from_level(59.9), DecibelRange::From40To60);
        assert_eq!(DecibelRange::from_level(60.0), DecibelRange::From60To80);
        assert_eq!(DecibelRange::from_level(80.0), DecibelRange::From80To90);
        assert_eq!(DecibelRange::from_level(90.0), DecibelRange::From90To100);
        assert_eq!(DecibelRange::from_level(100.0), DecibelRange::Above100);
        assert_eq!(DecibelRange::from_level(128.0), DecibelRange::Above100);
    }

    #[test]
    fn range_labels_are_stable() {
        let labels: Vec<_> = DecibelRange::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            ["20-40dB", "40-60dB", "60-80dB", "80-90dB", "90-100dB", "100+dB"]
        );
    }

    #[test]
    fn range_views_bucket_by_level() {
        let samples = [
            sample(2026, 3, 4, 10, 0, 0, 35.0),
            sample(2026, 3, 4, 11, 0, 0, 85.0),
            sample(2026, 3, 4, 12, 0, 0, 86.0),
        ];
        let buckets = aggregate(&samples, View::RangeDay, anchor());
        assert_eq!(buckets[DecibelRange::Below40 as usize].count, 1);
        assert_eq!(buckets[DecibelRange::From80To90 as usize].count, 2);
        assert_eq!(buckets[DecibelRange::From80To90 as usize].avg_level(), 85.5);
    }
}
