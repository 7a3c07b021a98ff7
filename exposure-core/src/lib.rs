// exposure-core/src/lib.rs

//! The core logic for the ambient noise exposure monitor.
//! This crate is responsible for OSHA exposure classification,
//! sample aggregation, and retention. It is completely headless,
//! performs no I/O, and contains no audio or rendering code.

pub mod aggregate;
pub mod calibration;
pub mod osha;
pub mod retention;
pub mod risk;
pub mod sample;
pub mod store;
pub mod window;

pub use aggregate::{aggregate, Bucket, BucketKey, DecibelRange, View};
pub use calibration::CalibrationOffset;
pub use risk::{classify, classify_bucket, classify_daily, intensity_fraction, RiskLevel};
pub use sample::{InvalidSample, Sample};
pub use store::{CalibrationStore, SampleStore};
pub use window::TimeWindow;
