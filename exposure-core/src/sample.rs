//! # Sample Ingest
//!
//! The single record type the whole engine runs on: one timestamped sound
//! level reading, produced by the sensor collaborator at up to 1 Hz.
//! Construction is the validation boundary; a non-finite level is rejected
//! here and never enters the store.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reasons for readings that must never enter the store.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidSample {
    #[error("non-finite sound level reading: {0}")]
    NonFiniteLevel(f32),
}

/// One timestamped sound level reading. Immutable once created.
///
/// The sensor collaborator clamps levels to a sane physical range before
/// they reach the core; only finiteness is re-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Local wall-clock time the reading was taken.
    pub timestamp: DateTime<Local>,
    /// Estimated sound pressure level in dB.
    pub level_db: f32,
}

impl Sample {
    /// Validates and builds a sample from a raw sensor reading.
    ///
    /// # Arguments
    /// * `timestamp` - Local time the reading was taken
    /// * `level_db` - Estimated sound level in dB; must be finite
    ///
    /// # Returns
    /// * `Ok(sample)` - The reading is usable
    /// * `Err(InvalidSample)` - NaN or infinite level, to be dropped silently
    pub fn new(timestamp: DateTime<Local>, level_db: f32) -> Result<Self, InvalidSample> {
        if !level_db.is_finite() {
            return Err(InvalidSample::NonFiniteLevel(level_db));
        }
        Ok(Self {
            timestamp,
            level_db,
        })
    }
}
