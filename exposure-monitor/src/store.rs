//! # JSON File Store
//!
//! The storage collaborator: one JSON document holding the raw sample
//! collection and the calibration pair, rewritten whole on every change via
//! a temp-file-and-rename replace. That gives the atomic whole-collection
//! read/replace semantics the core's contracts assume, so retention pruning
//! and aggregation reads can interleave freely.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use exposure_core::{CalibrationOffset, CalibrationStore, Sample, SampleStore, TimeWindow};

/// On-disk document layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    samples: Vec<Sample>,
    calibration: Option<CalibrationOffset>,
}

/// File-backed implementation of the core storage contracts.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document. A missing file is an empty store; a
    /// corrupt or unreadable file is an error for the caller to degrade.
    fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading store file {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing store file {}", self.path.display()))
    }

    /// Replaces the whole document atomically: write a sibling temp file,
    /// then rename it over the target.
    fn write_document(&self, doc: &StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc).context("serializing store document")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("writing store file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing store file {}", self.path.display()))?;
        Ok(())
    }
}

impl SampleStore for JsonFileStore {
    fn load_samples(&self, window: &TimeWindow) -> Result<Vec<Sample>> {
        let doc = self.read_document()?;
        Ok(doc
            .samples
            .into_iter()
            .filter(|s| window.contains(s.timestamp))
            .collect())
    }

    fn append_sample(&mut self, sample: Sample) -> Result<()> {
        let mut doc = self.read_document()?;
        doc.samples.push(sample);
        self.write_document(&doc)
    }

    fn prune_older_than(&mut self, horizon: DateTime<Local>) -> Result<usize> {
        let mut doc = self.read_document()?;
        let before = doc.samples.len();
        doc.samples.retain(|s| s.timestamp > horizon);
        let removed = before - doc.samples.len();
        if removed > 0 {
            self.write_document(&doc)?;
        }
        Ok(removed)
    }
}

impl CalibrationStore for JsonFileStore {
    fn save_calibration(&mut self, calibration: &CalibrationOffset) -> Result<()> {
        let mut doc = self.read_document()?;
        doc.calibration = Some(*calibration);
        self.write_document(&doc)
    }

    fn load_calibration(&self) -> Result<Option<CalibrationOffset>> {
        Ok(self.read_document()?.calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct TempStore {
        store: JsonFileStore,
    }

    impl TempStore {
        fn new(tag: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "exposure-store-test-{}-{}.json",
                tag,
                std::process::id()
            ));
            let _ = fs::remove_file(&path);
            Self {
                store: JsonFileStore::new(path),
            }
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = fs::remove_file(self.store.path());
        }
    }

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 4, hour, 0, 0).unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempStore::new("empty");
        let window = TimeWindow::today(at(12));
        assert!(temp.store.load_samples(&window).unwrap().is_empty());
        assert!(temp.store.load_calibration().unwrap().is_none());
    }

    #[test]
    fn append_and_window_filtered_load() {
        let mut temp = TempStore::new("append");
        let today = Sample::new(at(10), 72.0).unwrap();
        let last_month = Sample::new(
            Local.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap(),
            80.0,
        )
        .unwrap();
        temp.store.append_sample(today).unwrap();
        temp.store.append_sample(last_month).unwrap();

        let loaded = temp.store.load_samples(&TimeWindow::today(at(12))).unwrap();
        assert_eq!(loaded, vec![today]);
    }

    #[test]
    fn prune_removes_and_reports() {
        let mut temp = TempStore::new("prune");
        let old = Sample::new(at(12) - Duration::days(8), 60.0).unwrap();
        let fresh = Sample::new(at(12) - Duration::hours(1), 60.0).unwrap();
        temp.store.append_sample(old).unwrap();
        temp.store.append_sample(fresh).unwrap();

        let horizon = at(12) - Duration::days(7);
        assert_eq!(temp.store.prune_older_than(horizon).unwrap(), 1);
        assert_eq!(temp.store.prune_older_than(horizon).unwrap(), 0);

        let week = TimeWindow::this_week(at(12));
        assert_eq!(temp.store.load_samples(&week).unwrap(), vec![fresh]);
    }

    #[test]
    fn calibration_round_trip() {
        let mut temp = TempStore::new("calibration");
        let cal = CalibrationOffset {
            spl_reading: 70.0,
            dbfs_reading: -32.0,
        };
        temp.store.save_calibration(&cal).unwrap();
        assert_eq!(temp.store.load_calibration().unwrap(), Some(cal));
    }
}
