//! Calibration tracker for threshold discovery.
//!
//! While a session runs in calibration mode, the raw (unsmoothed) angle is
//! fed here instead of the repetition state machine. An operator performs a
//! few slow reps, reads off the observed flexion/extension extremes, and
//! hand-tunes the DOWN/UP thresholds before a real counting session.

use serde::{Deserialize, Serialize};

/// Running min/max of the raw angle across a calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationTracker {
    min_angle: f32,
    max_angle: f32,
    samples: u64,
}

impl CalibrationTracker {
    /// Creates a fresh tracker with `min_angle` at +180 and `max_angle`
    /// at 0, so the first sample initializes both bounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_angle: 180.0,
            max_angle: 0.0,
            samples: 0,
        }
    }

    /// Records one raw angle sample.
    pub fn observe(&mut self, raw_angle: f32) {
        self.min_angle = self.min_angle.min(raw_angle);
        self.max_angle = self.max_angle.max(raw_angle);
        self.samples += 1;
    }

    /// Returns the current bounds and sample count.
    #[must_use]
    pub fn snapshot(&self) -> CalibrationSnapshot {
        CalibrationSnapshot {
            min_angle: self.min_angle,
            max_angle: self.max_angle,
            samples: self.samples,
        }
    }

    /// Returns `true` if no samples have been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

impl Default for CalibrationTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Observed angle extremes for operator readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSnapshot {
    /// Smallest raw angle seen (bottom / most bent position)
    pub min_angle: f32,
    /// Largest raw angle seen (top / most extended position)
    pub max_angle: f32,
    /// Number of raw samples observed
    pub samples: u64,
}
