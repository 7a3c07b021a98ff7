//! # Time Windows
//!
//! Half-open local-time windows used to scope storage loads and the
//! Aggregator's view filter. The week is Monday-based to match the fixed
//! Mon–Sun bucket order of the weekly views.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate};

/// A half-open window of local time: `start <= t < end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeWindow {
    /// The calendar day containing `now` (midnight to midnight).
    pub fn today(now: DateTime<Local>) -> Self {
        let day = now.date_naive();
        Self {
            start: start_of_day(day),
            end: start_of_day(day + Days::new(1)),
        }
    }

    /// The Monday-based calendar week containing `now`.
    pub fn this_week(now: DateTime<Local>) -> Self {
        let monday = week_start(now.date_naive());
        Self {
            start: start_of_day(monday),
            end: start_of_day(monday + Days::new(7)),
        }
    }

    pub fn contains(&self, t: DateTime<Local>) -> bool {
        self.start <= t && t < self.end
    }
}

/// The Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    // Midnight can be ambiguous or skipped on DST transition days; take the
    // earliest valid instant of the day.
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is a valid wall-clock time")
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn today_window_spans_one_day() {
        // 2026-03-04 is a Wednesday.
        let now = Local.with_ymd_and_hms(2026, 3, 4, 15, 30, 0).unwrap();
        let window = TimeWindow::today(now);
        assert!(window.contains(now));
        assert!(window.contains(Local.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap()));
        assert!(!window.contains(Local.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap()));
        assert!(!window.contains(Local.with_ymd_and_hms(2026, 3, 3, 23, 59, 59).unwrap()));
    }

    #[test]
    fn week_window_is_monday_based() {
        let wednesday = Local.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let window = TimeWindow::this_week(wednesday);
        // Monday of that week is 2026-03-02.
        assert!(window.contains(Local.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()));
        assert!(window.contains(Local.with_ymd_and_hms(2026, 3, 8, 23, 0, 0).unwrap()));
        assert!(!window.contains(Local.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap()));
        assert!(!window.contains(Local.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap()));
    }

    #[test]
    fn week_start_of_a_monday_is_itself() {
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(week_start(monday), monday);
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert_eq!(week_start(sunday), monday);
    }
}
