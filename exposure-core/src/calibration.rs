//! # Calibration Offset
//!
//! A single persisted pair of readings that converts the sensor's
//! device-relative dBFS estimate into an absolute SPL estimate. The core
//! only carries the pair and its derived offset; how the dBFS value was
//! estimated is entirely the sensor collaborator's business.

use serde::{Deserialize, Serialize};

/// One calibration measurement: a reference SPL meter reading taken at the
/// same moment as the device's own dBFS reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOffset {
    /// Reference sound pressure level, from an external meter.
    pub spl_reading: f32,
    /// The device's dBFS estimate at the same moment.
    pub dbfs_reading: f32,
}

impl CalibrationOffset {
    /// The additive offset that maps this device's dBFS onto SPL.
    pub fn offset(&self) -> f32 {
        self.spl_reading - self.dbfs_reading
    }

    /// Converts a device-relative dBFS reading into an SPL estimate.
    pub fn dbfs_to_spl(&self, dbfs: f32) -> f32 {
        dbfs + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_spl_minus_dbfs() {
        let cal = CalibrationOffset {
            spl_reading: 70.0,
            dbfs_reading: -25.0,
        };
        assert_eq!(cal.offset(), 95.0);
        assert_eq!(cal.dbfs_to_spl(-25.0), 70.0);
        assert_eq!(cal.dbfs_to_spl(-10.0), 85.0);
    }

    #[test]
    fn serde_round_trip() {
        let cal = CalibrationOffset {
            spl_reading: 68.5,
            dbfs_reading: -30.25,
        };
        let json = serde_json::to_string(&cal).unwrap();
        let back: CalibrationOffset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cal);
    }
}
