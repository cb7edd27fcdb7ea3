//! Repetition state machine.
//!
//! Consumes the smoothed elbow angle once per frame and detects complete
//! up/down cycles using hysteresis: separate thresholds for entering the
//! bottom position and for completing the lift keep angle noise near a
//! single boundary from toggling the phase. An elapsed-time cooldown
//! debounces double counts at lockout.
//!
//! Phases: `Up` (initial, and terminal per cycle) → `Descent` → `Down` →
//! back to `Up` with the count incremented.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Current phase of the lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepPhase {
    /// Arms extended at lockout (initial phase)
    Up,
    /// Lowering acknowledged, bottom not yet reached
    Descent,
    /// Bottom position
    Down,
}

impl RepPhase {
    /// Returns the phase name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Descent => "descent",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for RepPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of feeding one smoothed angle to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepUpdate {
    /// Phase after this frame
    pub phase: RepPhase,
    /// Cumulative rep count after this frame
    pub count: u32,
    /// `true` only on the exact frame a rep completed; lets the caller
    /// fire a one-shot alert instead of one per frame spent in `Up`
    pub rep_completed: bool,
}

/// Hysteresis rep counter with cooldown debounce.
#[derive(Debug, Clone)]
pub struct RepCounter {
    down_threshold: f32,
    reset_threshold: f32,
    up_threshold: f32,
    cooldown: Duration,
    phase: RepPhase,
    count: u32,
    last_rep_at: Option<Instant>,
}

impl RepCounter {
    /// Creates a new counter from a validated configuration.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        debug_assert!(config.down_threshold < config.reset_threshold);
        debug_assert!(config.reset_threshold < config.up_threshold);
        Self {
            down_threshold: config.down_threshold,
            reset_threshold: config.reset_threshold,
            up_threshold: config.up_threshold,
            cooldown: config.cooldown(),
            phase: RepPhase::Up,
            count: 0,
            last_rep_at: None,
        }
    }

    /// Feeds one smoothed angle for one frame.
    ///
    /// Transition rules, evaluated in this fixed order:
    /// 1. angle below the reset threshold while `Up` acknowledges the
    ///    descent (observational; does not gate counting).
    /// 2. angle below the down threshold always reaches `Down`.
    /// 3. angle above the up threshold while `Down` is a candidate
    ///    completion, accepted only once the cooldown has elapsed since
    ///    the previous accepted rep.
    ///
    /// `now` comes from the caller's monotonic clock; frame spacing is
    /// irrelevant, only elapsed wall-clock time gates the debounce.
    pub fn advance(&mut self, angle: f32, now: Instant) -> RepUpdate {
        let mut rep_completed = false;

        if angle < self.reset_threshold && self.phase == RepPhase::Up {
            self.phase = RepPhase::Descent;
            tracing::debug!(angle, "descent acknowledged");
        }

        if angle < self.down_threshold && self.phase != RepPhase::Down {
            self.phase = RepPhase::Down;
            tracing::debug!(angle, "bottom position reached");
        }

        if angle > self.up_threshold && self.phase == RepPhase::Down {
            if self.cooldown_elapsed(now) {
                self.phase = RepPhase::Up;
                self.count += 1;
                self.last_rep_at = Some(now);
                rep_completed = true;
                tracing::info!(count = self.count, angle, "rep counted");
            } else {
                tracing::debug!(angle, "lockout within cooldown, not counted");
            }
        }

        RepUpdate {
            phase: self.phase,
            count: self.count,
            rep_completed,
        }
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_rep_at {
            None => true,
            Some(last) => now.duration_since(last) > self.cooldown,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    /// Returns the cumulative rep count.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns when the last rep was accepted, if any.
    #[must_use]
    pub fn last_rep_at(&self) -> Option<Instant> {
        self.last_rep_at
    }

    /// Resets phase, count, and debounce state.
    pub fn reset(&mut self) {
        self.phase = RepPhase::Up;
        self.count = 0;
        self.last_rep_at = None;
    }
}
