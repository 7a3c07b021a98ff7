//! # Storage Contracts
//!
//! The narrow get/set surface the engine needs from its storage
//! collaborator. The core never performs I/O itself; a concrete store (the
//! monitor ships a JSON file store) implements these traits and is expected
//! to provide atomic whole-collection read/replace semantics, which is what
//! lets retention pruning run alongside aggregation reads without locking.
//!
//! A failed load is not fatal anywhere: callers degrade an error to an empty
//! sample set, which aggregates to all-NoData buckets.

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::calibration::CalibrationOffset;
use crate::sample::Sample;
use crate::window::TimeWindow;

/// Durable storage for raw samples.
pub trait SampleStore {
    /// Loads the samples whose timestamps fall inside `window`.
    fn load_samples(&self, window: &TimeWindow) -> Result<Vec<Sample>>;

    /// Appends one validated sample.
    fn append_sample(&mut self, sample: Sample) -> Result<()>;

    /// Drops samples with `timestamp <= horizon`, returning how many were
    /// removed.
    fn prune_older_than(&mut self, horizon: DateTime<Local>) -> Result<usize>;
}

/// Durable storage for the single calibration pair.
pub trait CalibrationStore {
    fn save_calibration(&mut self, calibration: &CalibrationOffset) -> Result<()>;

    /// `None` when the device has never been calibrated.
    fn load_calibration(&self) -> Result<Option<CalibrationOffset>>;
}
