//! # OSHA Limit Table
//!
//! Maps a sound level in decibels to the permitted exposure duration in hours
//! before the occupational risk threshold is crossed. The table follows the
//! OSHA convention of halving the permitted duration every 5 dB above the
//! 85 dB action level, with no limit at all below it.

/// The OSHA action level in dB. Levels below this carry no exposure limit.
pub const ACTION_LEVEL_DB: f32 = 85.0;

/// Returns the permitted exposure duration in hours for a given sound level.
///
/// Lower-bound inclusive table:
/// - below 85 dB: no limit (`f32::INFINITY`)
/// - 85–94 dB: 8 hours
/// - 95–99 dB: 4 hours
/// - 100–104 dB: 2 hours
/// - 105–109 dB: 1 hour
/// - 110–114 dB: 30 minutes
/// - 115 dB and above: 15 minutes
///
/// This is a pure, total function with no failure mode; it is the leaf
/// dependency of every risk judgment in this crate.
pub fn limit_hours(level_db: f32) -> f32 {
    if level_db < 85.0 {
        f32::INFINITY
    } else if level_db < 95.0 {
        8.0
    } else if level_db < 100.0 {
        4.0
    } else if level_db < 105.0 {
        2.0
    } else if level_db < 110.0 {
        1.0
    } else if level_db < 115.0 {
        0.5
    } else {
        0.25
    }
}
