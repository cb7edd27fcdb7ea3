//! Counting session: the single owner of all per-session state.
//!
//! One long-lived [`RepSession`] value holds the smoother, the repetition
//! counter, the calibration tracker, and the wrist trail, and mutates them
//! only inside [`RepSession::update`]. One external loop delivers one
//! frame at a time and runs each update to completion before the next
//! frame; no other access path exists.

use std::time::Instant;

use benchrep_core::PoseFrame;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calibration::{CalibrationSnapshot, CalibrationTracker};
use crate::config::{SessionConfig, SessionMode};
use crate::machine::{RepCounter, RepPhase};
use crate::rate::FrameRateEstimator;
use crate::selector::{AngleSource, ArmSelector};
use crate::smoother::AngleSmoother;
use crate::trail::WristTrail;
use crate::Result;

/// Unique identifier for one counting session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Allocates a new random session id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrows the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the caller needs to render and alert after one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    /// Wall-clock time the report was produced
    pub timestamp: DateTime<Utc>,
    /// Cumulative rep count
    pub count: u32,
    /// Current lift phase
    pub phase: RepPhase,
    /// `true` only on the exact frame a rep completed (one-shot alert
    /// trigger)
    pub rep_completed: bool,
    /// Raw angle selected this frame, if any
    pub raw_angle: Option<f32>,
    /// Smoothed angle after this frame, if any sample has ever been seen
    pub smoothed_angle: Option<f32>,
    /// Which arm(s) produced this frame's sample
    pub angle_source: Option<AngleSource>,
    /// Running calibration extremes; present only in calibration mode
    pub calibration: Option<CalibrationSnapshot>,
}

/// Aggregate statistics over a session so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Total update calls
    pub frames_seen: u64,
    /// Frames that produced no usable angle sample (no detection, low
    /// confidence, or degenerate geometry)
    pub frames_skipped: u64,
    /// Cumulative rep count
    pub reps: u32,
    /// Estimated update rate, once enough frames have been seen
    pub fps: Option<f64>,
    /// Calibration extremes; present only in calibration mode
    pub calibration: Option<CalibrationSnapshot>,
}

/// A bench-press counting session.
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use benchrep_session::{RepSession, SessionConfig};
///
/// let mut session = RepSession::new(SessionConfig::default()).unwrap();
/// // No detection this frame: state persists, nothing counts.
/// let report = session.update(None, Instant::now());
/// assert_eq!(report.count, 0);
/// assert!(!report.rep_completed);
/// ```
#[derive(Debug)]
pub struct RepSession {
    id: SessionId,
    config: SessionConfig,
    selector: ArmSelector,
    smoother: AngleSmoother,
    calibration: CalibrationTracker,
    counter: RepCounter,
    trail: WristTrail,
    rate: FrameRateEstimator,
    frames_seen: u64,
    frames_skipped: u64,
}

impl RepSession {
    /// Creates a new session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::InvalidConfig`] if the configuration
    /// is invalid; a session never starts with bad tunables.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;

        let id = SessionId::new();
        tracing::debug!(
            session = %id,
            mode = ?config.mode,
            policy = config.arm_policy.name(),
            "session created"
        );

        Ok(Self {
            id,
            selector: ArmSelector::new(config.arm_policy, config.visibility_threshold),
            smoother: AngleSmoother::new(config.smoothing_factor),
            calibration: CalibrationTracker::new(),
            counter: RepCounter::new(&config),
            trail: WristTrail::new(config.trail_capacity, config.clear_trail_on_rep),
            rate: FrameRateEstimator::new(),
            frames_seen: 0,
            frames_skipped: 0,
            config,
        })
    }

    /// Processes one frame.
    ///
    /// `frame` is `None` when the detector found no subject; such frames,
    /// like frames whose joints fail the confidence gate, change no state
    /// and are not errors. `now` must come from a monotonic clock owned by
    /// the caller.
    pub fn update(&mut self, frame: Option<&PoseFrame>, now: Instant) -> FrameReport {
        self.frames_seen += 1;
        self.rate.tick(now);

        let Some(sample) = frame.and_then(|pose| self.selector.select(pose)) else {
            self.frames_skipped += 1;
            return self.report(None, None, false);
        };

        let raw = sample.degrees;
        let smoothed = self.smoother.update(raw);

        let rep_completed = match self.config.mode {
            SessionMode::Calibration => {
                self.calibration.observe(raw);
                false
            }
            SessionMode::Counting => self.counter.advance(smoothed, now).rep_completed,
        };

        // Selector guarantees the wrist passed the confidence gate.
        self.trail.push(sample.wrist.x, sample.wrist.y);
        if rep_completed {
            self.trail.on_rep_completed();
        }

        self.report(Some(raw), Some(sample.source), rep_completed)
    }

    fn report(
        &self,
        raw_angle: Option<f32>,
        angle_source: Option<AngleSource>,
        rep_completed: bool,
    ) -> FrameReport {
        FrameReport {
            timestamp: Utc::now(),
            count: self.counter.count(),
            phase: self.counter.phase(),
            rep_completed,
            raw_angle,
            smoothed_angle: self.smoother.value(),
            angle_source,
            calibration: self.calibration_snapshot(),
        }
    }

    fn calibration_snapshot(&self) -> Option<CalibrationSnapshot> {
        match self.config.mode {
            SessionMode::Calibration => Some(self.calibration.snapshot()),
            SessionMode::Counting => None,
        }
    }

    /// Returns aggregate statistics for the session so far.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            frames_seen: self.frames_seen,
            frames_skipped: self.frames_skipped,
            reps: self.counter.count(),
            fps: self.rate.fps(),
            calibration: self.calibration_snapshot(),
        }
    }

    /// Returns the session id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the cumulative rep count.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    /// Returns the current lift phase.
    #[must_use]
    pub fn phase(&self) -> RepPhase {
        self.counter.phase()
    }

    /// Returns the wrist trajectory trail.
    #[must_use]
    pub fn trail(&self) -> &WristTrail {
        &self.trail
    }

    /// Resets all per-session state while keeping the configuration.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.calibration = CalibrationTracker::new();
        self.counter.reset();
        self.trail.clear();
        self.rate = FrameRateEstimator::new();
        self.frames_seen = 0;
        self.frames_skipped = 0;
        tracing::debug!(session = %self.id, "session reset");
    }
}
