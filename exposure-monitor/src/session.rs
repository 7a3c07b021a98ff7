//! # Monitoring Session
//!
//! Explicit ownership of the capture lifecycle. The session holds the cpal
//! stream and walks the `Idle -> RequestingPermission -> Monitoring` state
//! machine; a device or permission failure lands back in `Idle` with the
//! error surfaced once to the caller, and is never retried automatically.
//! Stopping the sample stream is the only cancellation signal the rest of
//! the system ever sees.

use anyhow::Result;
use cpal::traits::StreamTrait;
use crossbeam_channel::Sender;

use crate::capture;

/// Monitoring lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not capturing; the sample stream is silent.
    Idle,
    /// Waiting on device/permission acquisition.
    RequestingPermission,
    /// Capture is live and frames are flowing.
    Monitoring,
}

/// Owns the capture stream and its state transitions.
pub struct MonitoringSession {
    state: SessionState,
    stream: Option<cpal::Stream>,
    sample_rate: Option<u32>,
}

impl MonitoringSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            stream: None,
            sample_rate: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Starts capture, transitioning `Idle -> RequestingPermission ->
    /// Monitoring`. On failure the session returns to `Idle` and the error
    /// is handed to the caller; no automatic retry.
    ///
    /// # Arguments
    /// * `frame_sender` - Channel the capture callback pushes frames into
    pub fn start(&mut self, frame_sender: Sender<Vec<f32>>) -> Result<()> {
        if self.state == SessionState::Monitoring {
            return Ok(());
        }

        self.state = SessionState::RequestingPermission;
        eprintln!("[SESSION] Requesting audio input device...");

        match capture::start_audio_capture(frame_sender) {
            Ok((stream, sample_rate)) => {
                self.stream = Some(stream);
                self.sample_rate = Some(sample_rate);
                self.state = SessionState::Monitoring;
                eprintln!("[SESSION] Monitoring started");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Idle;
                eprintln!("[SESSION] Could not start monitoring: {}", e);
                Err(e)
            }
        }
    }

    /// Stops capture and returns to `Idle`. Safe to call in any state.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                eprintln!("[SESSION] Error pausing stream: {}", e);
            }
            drop(stream);
        }
        if self.state != SessionState::Idle {
            eprintln!("[SESSION] Monitoring stopped");
        }
        self.state = SessionState::Idle;
        self.sample_rate = None;
    }
}

impl Drop for MonitoringSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = MonitoringSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.sample_rate(), None);
    }

    #[test]
    fn stop_from_idle_is_a_no_op() {
        let mut session = MonitoringSession::new();
        session.stop();
        assert_eq!(session.state(), SessionState::Idle);
    }
}
