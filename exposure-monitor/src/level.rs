//! # Level Estimation Module
//!
//! Turns one captured audio frame into a single decibel reading. The frame
//! is DC-corrected, Hann-windowed and transformed with RustFFT, then the RMS
//! of the magnitude spectrum gives a device-relative dBFS estimate. The
//! calibration offset (when present) shifts that onto an absolute SPL scale.
//!
//! Decibel estimation is owned entirely by this module; the core engine only
//! ever sees the finished SPL figure.

use exposure_core::CalibrationOffset;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::capture::FRAME_SIZE;

/// SPL readings are clamped into this physically plausible range before
/// they become samples.
pub const MIN_SPL_DB: f32 = 0.0;
pub const MAX_SPL_DB: f32 = 130.0;

/// Floor returned for a silent or empty frame instead of -infinity.
const SILENCE_FLOOR_DBFS: f32 = -120.0;

/// Removes the DC offset from a signal by making its average value zero.
///
/// A DC component shows up as a large bin at 0 Hz and skews the RMS level
/// estimate, so the signal is centered around zero first.
fn remove_dc_offset(signal: &mut [f32]) {
    let len = signal.len();
    if len == 0 {
        return;
    }
    let avg = signal.iter().sum::<f32>() / len as f32;
    if avg.abs() > 1e-6 {
        for sample in signal.iter_mut() {
            *sample -= avg;
        }
    }
}

/// Applies a Hann window to the input buffer to reduce spectral leakage.
fn apply_hann_window(buffer: &mut [f32]) {
    let n = buffer.len();
    if n == 0 {
        return;
    }
    let n_minus_1 = (n - 1) as f32;
    for (i, sample) in buffer.iter_mut().enumerate() {
        let multiplier = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / n_minus_1).cos());
        *sample *= multiplier;
    }
}

/// Estimates the device-relative level of one frame, in dBFS.
///
/// Pipeline: DC removal, Hann window, forward FFT, RMS over the first-half
/// magnitude spectrum (normalized by frame length), `20*log10(rms)`.
/// A silent frame returns the silence floor rather than -infinity, so the
/// result is always finite.
///
/// # Arguments
/// * `frame` - Captured audio frame (must be exactly `FRAME_SIZE` samples)
///
/// # Panics
/// * If the frame length is not `FRAME_SIZE`
pub fn frame_to_dbfs(frame: &[f32]) -> f32 {
    assert_eq!(
        frame.len(),
        FRAME_SIZE,
        "input frame size must be equal to FRAME_SIZE"
    );

    let mut processed = frame.to_vec();
    remove_dc_offset(&mut processed);
    apply_hann_window(&mut processed);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(FRAME_SIZE);

    let mut buffer: Vec<Complex<f32>> = processed
        .into_iter()
        .map(|sample| Complex { re: sample, im: 0.0 })
        .collect();
    fft.process(&mut buffer);

    // Only the first half of the spectrum carries information (Nyquist).
    let half = FRAME_SIZE / 2;
    let sum_squares: f32 = buffer
        .iter()
        .take(half)
        .map(|c| {
            let mag = c.norm() / FRAME_SIZE as f32;
            mag * mag
        })
        .sum();
    let rms = (sum_squares / half as f32).sqrt();

    if rms > 0.0 {
        (20.0 * rms.log10()).max(SILENCE_FLOOR_DBFS)
    } else {
        SILENCE_FLOOR_DBFS
    }
}

/// Estimates the absolute SPL of one frame, clamped to [0, 130] dB.
///
/// Without a stored calibration the dBFS figure is used as-is (offset 0),
/// which still orders levels correctly even if the absolute scale is off.
pub fn frame_to_spl(frame: &[f32], calibration: Option<&CalibrationOffset>) -> f32 {
    let dbfs = frame_to_dbfs(frame);
    let spl = match calibration {
        Some(cal) => cal.dbfs_to_spl(dbfs),
        None => dbfs,
    };
    spl.clamp(MIN_SPL_DB, MAX_SPL_DB)
}
