//! # Dashboard Renderer
//!
//! Text rendering of one aggregated view: a labelled row per bucket with a
//! bar sized by `intensity_fraction`, the average level, the accumulated
//! duration and the risk tag. Every canonical row is rendered every time,
//! zero buckets included, so the dashboard shape never changes with the
//! data.

use chrono::Datelike;
use exposure_core::{classify_bucket, intensity_fraction, Bucket, BucketKey, View};

/// Width of the bar column in characters.
const BAR_WIDTH: usize = 24;

/// Rendering cap for hourly bars: a fully filled bar is one hour of sound.
const HOURLY_BAR_CAP_HOURS: f32 = 1.0;

/// Rendering cap for daily and range bars: a full OSHA baseline shift.
const DAILY_BAR_CAP_HOURS: f32 = 8.0;

/// Renders one view's bucket list as dashboard lines.
pub fn render_view(buckets: &[Bucket], view: View) -> String {
    let mut out = String::new();
    out.push_str(title(view));
    out.push('\n');

    for bucket in buckets {
        let risk = classify_bucket(bucket, view);
        let fraction = intensity_fraction(bucket.duration_hours, bar_cap(view));
        let filled = (fraction * BAR_WIDTH as f32).round() as usize;

        let mut bar = String::with_capacity(BAR_WIDTH);
        for i in 0..BAR_WIDTH {
            bar.push(if i < filled { '#' } else { '.' });
        }

        out.push_str(&format!(
            "{:>9} |{}| {:>5.1} dB {:>7} {}\n",
            key_label(&bucket.key),
            bar,
            bucket.avg_level(),
            format_duration(bucket.duration_hours),
            risk.label(),
        ));
    }
    out
}

fn title(view: View) -> &'static str {
    match view {
        View::Hourly => "Today by hour",
        View::Daily => "This week by day",
        View::RangeDay => "Today by level range",
        View::RangeWeek => "This week by level range",
    }
}

fn bar_cap(view: View) -> f32 {
    match view {
        View::Hourly => HOURLY_BAR_CAP_HOURS,
        View::Daily | View::RangeDay | View::RangeWeek => DAILY_BAR_CAP_HOURS,
    }
}

fn key_label(key: &BucketKey) -> String {
    match key {
        BucketKey::Hour(hour) => format!("{:02}:00", hour),
        BucketKey::Day { date, .. } => format!("{} {:02}", date.weekday(), date.day()),
        BucketKey::Range(range) => range.label().to_string(),
    }
}

/// Formats an exposure duration compactly: seconds under a minute, minutes
/// under an hour, fractional hours above.
fn format_duration(hours: f32) -> String {
    let seconds = hours * 3600.0;
    if seconds < 60.0 {
        format!("{:.0}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.0}m", seconds / 60.0)
    } else {
        format!("{:.1}h", hours)
    }
}
