//! # Risk Classifier
//!
//! Turns a `(level, accumulated exposure)` pair into a three-tier risk class
//! using the OSHA limit table. Risk is always derived at read time and never
//! stored; every presentation surface calls these same functions instead of
//! re-deriving threshold logic locally.

use crate::aggregate::{Bucket, View};
use crate::osha::{limit_hours, ACTION_LEVEL_DB};

/// Risk classification for an exposure measurement.
///
/// `NoData` is the sentinel for empty buckets (zero level or zero duration);
/// it renders as a blank cell rather than a judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    NoData,
    Safe,
    Caution,
    Danger,
}

impl RiskLevel {
    /// Short display tag for the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::NoData => "--",
            RiskLevel::Safe => "SAFE",
            RiskLevel::Caution => "CAUTION",
            RiskLevel::Danger => "DANGER",
        }
    }
}

/// Classifies a single exposure against the OSHA limit for its level.
///
/// Rules, in order:
/// 1. Zero level or zero exposure means there is nothing to judge: `NoData`.
/// 2. Levels with no OSHA limit are always `Safe`.
/// 3. Within the limit: `Safe`. Up to one hour over: `Caution`.
///    More than one hour over: `Danger`.
///
/// Pure and total. Non-finite levels must be rejected at ingest and never
/// reach this function.
pub fn classify(level_db: f32, exposure_hours: f32) -> RiskLevel {
    if level_db == 0.0 || exposure_hours == 0.0 {
        return RiskLevel::NoData;
    }

    let limit = limit_hours(level_db);
    if limit.is_infinite() {
        return RiskLevel::Safe;
    }

    let over = exposure_hours - limit;
    if over <= 0.0 {
        RiskLevel::Safe
    } else if over <= 1.0 {
        RiskLevel::Caution
    } else {
        RiskLevel::Danger
    }
}

/// Classifies a whole-day (or whole-week-day) rollup.
///
/// More conservative than [`classify`] because an averaged level
/// underestimates peak risk:
/// - an average at or above the 85 dB action level combined with more than
///   6 hours of exposure is always `Danger`;
/// - more than 4 hours at an average of 70 dB or higher is at least
///   `Caution`, even when the raw OSHA limit was never crossed.
pub fn classify_daily(total_exposure_hours: f32, avg_level_db: f32) -> RiskLevel {
    if total_exposure_hours == 0.0 {
        return RiskLevel::NoData;
    }

    if avg_level_db >= ACTION_LEVEL_DB && total_exposure_hours > 6.0 {
        return RiskLevel::Danger;
    }

    let limit = limit_hours(avg_level_db);
    let over = if limit.is_infinite() {
        f32::NEG_INFINITY
    } else {
        total_exposure_hours - limit
    };

    if over > 1.0 {
        RiskLevel::Danger
    } else if over > 0.0 || (avg_level_db >= 70.0 && total_exposure_hours > 4.0) {
        RiskLevel::Caution
    } else {
        RiskLevel::Safe
    }
}

/// Classifies one aggregated bucket for display.
///
/// The weekly daily-rollup view uses the conservative daily variant; the
/// hourly and decibel-range views judge each bucket directly.
pub fn classify_bucket(bucket: &Bucket, view: View) -> RiskLevel {
    match view {
        View::Daily => classify_daily(bucket.duration_hours, bucket.avg_level()),
        View::Hourly | View::RangeDay | View::RangeWeek => {
            classify(bucket.avg_level(), bucket.duration_hours)
        }
    }
}

/// Fraction of a rendering cap consumed by an exposure, clamped to [0, 1].
///
/// Purely cosmetic (it sizes a bar, it is not a risk judgment), but it must
/// be deterministic and monotonic in `exposure_hours`. A cap that is not a
/// positive finite number yields 0.
pub fn intensity_fraction(exposure_hours: f32, cap_hours: f32) -> f32 {
    if !cap_hours.is_finite() || cap_hours <= 0.0 {
        return 0.0;
    }
    (exposure_hours / cap_hours).clamp(0.0, 1.0)
}
