//! Session configuration.
//!
//! All tunables for a counting session live here, with documented defaults.
//! Validation happens once, at session construction; an invalid
//! configuration is fatal to session start and can never be discovered
//! mid-session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SessionError;

/// How the two arms' angles are fused into a single sample per frame.
///
/// Each side is considered available only when all three of its arm joints
/// (shoulder, elbow, wrist) exceed the visibility threshold. The policy
/// decides what to do when one or both sides are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmPolicy {
    /// Average the angles of all available sides.
    #[default]
    AverageOfVisible,
    /// Use the side whose least-confident arm joint is most confident.
    BestConfidence,
    /// Use the side with the larger (more extended) angle. Sides are
    /// still confidence-gated individually.
    MostExtended,
}

impl ArmPolicy {
    /// Returns the policy name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AverageOfVisible => "average_of_visible",
            Self::BestConfidence => "best_confidence",
            Self::MostExtended => "most_extended",
        }
    }
}

/// Whether a session counts reps or records calibration extremes.
///
/// The two modes are mutually exclusive for a given run and the mode is
/// fixed at construction. In calibration mode the repetition state machine
/// is bypassed entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Normal rep counting.
    #[default]
    Counting,
    /// Threshold discovery: track raw-angle min/max, never count.
    Calibration,
}

/// Configuration for a counting session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minimum joint confidence for an arm side to contribute an angle
    /// (0.0 to 1.0)
    pub visibility_threshold: f32,

    /// EMA smoothing factor α in (0.0, 1.0]. Lower is smoother and
    /// laggier; 1.0 disables smoothing entirely.
    pub smoothing_factor: f32,

    /// Angle below which the bottom position is reached (degrees)
    pub down_threshold: f32,

    /// Angle below which a descent from lockout is acknowledged (degrees).
    /// Must lie strictly between `down_threshold` and `up_threshold`.
    pub reset_threshold: f32,

    /// Angle above which a rep completes from the bottom position (degrees)
    pub up_threshold: f32,

    /// Minimum elapsed time between two accepted rep completions, in
    /// seconds. Debounces angle noise near the up threshold.
    pub cooldown_secs: f64,

    /// Maximum number of wrist positions retained in the trajectory trail
    pub trail_capacity: usize,

    /// Whether the trail is cleared after each counted rep, visually
    /// separating successive rep paths
    pub clear_trail_on_rep: bool,

    /// Arm fusion policy
    pub arm_policy: ArmPolicy,

    /// Counting or calibration mode
    pub mode: SessionMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
            smoothing_factor: 0.2,
            down_threshold: 105.0,
            reset_threshold: 150.0,
            up_threshold: 170.0,
            cooldown_secs: 0.5,
            trail_capacity: 64,
            clear_trail_on_rep: true,
            arm_policy: ArmPolicy::default(),
            mode: SessionMode::default(),
        }
    }
}

impl SessionConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }

    /// Returns the cooldown as a [`Duration`].
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_secs)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] if any tunable is out of
    /// range or the angle thresholds violate `down < reset < up`.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(SessionError::InvalidConfig(format!(
                "visibility_threshold must be in [0.0, 1.0], got {}",
                self.visibility_threshold
            )));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(SessionError::InvalidConfig(format!(
                "smoothing_factor must be in (0.0, 1.0], got {}",
                self.smoothing_factor
            )));
        }
        for (name, value) in [
            ("down_threshold", self.down_threshold),
            ("reset_threshold", self.reset_threshold),
            ("up_threshold", self.up_threshold),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(SessionError::InvalidConfig(format!(
                    "{name} must be in [0.0, 180.0] degrees, got {value}"
                )));
            }
        }
        if !(self.down_threshold < self.reset_threshold
            && self.reset_threshold < self.up_threshold)
        {
            return Err(SessionError::InvalidConfig(format!(
                "angle thresholds must satisfy down < reset < up, got {} / {} / {}",
                self.down_threshold, self.reset_threshold, self.up_threshold
            )));
        }
        if !self.cooldown_secs.is_finite() || self.cooldown_secs < 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "cooldown_secs must be finite and non-negative, got {}",
                self.cooldown_secs
            )));
        }
        if self.trail_capacity == 0 {
            return Err(SessionError::InvalidConfig(
                "trail_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Creates a new builder seeded with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    /// Sets the visibility threshold.
    #[must_use]
    pub fn visibility_threshold(mut self, threshold: f32) -> Self {
        self.config.visibility_threshold = threshold;
        self
    }

    /// Sets the EMA smoothing factor.
    #[must_use]
    pub fn smoothing_factor(mut self, alpha: f32) -> Self {
        self.config.smoothing_factor = alpha;
        self
    }

    /// Sets the three angle thresholds at once.
    #[must_use]
    pub fn thresholds(mut self, down: f32, reset: f32, up: f32) -> Self {
        self.config.down_threshold = down;
        self.config.reset_threshold = reset;
        self.config.up_threshold = up;
        self
    }

    /// Sets the cooldown period in seconds.
    #[must_use]
    pub fn cooldown_secs(mut self, secs: f64) -> Self {
        self.config.cooldown_secs = secs;
        self
    }

    /// Sets the trail capacity.
    #[must_use]
    pub fn trail_capacity(mut self, capacity: usize) -> Self {
        self.config.trail_capacity = capacity;
        self
    }

    /// Sets whether the trail clears after each counted rep.
    #[must_use]
    pub fn clear_trail_on_rep(mut self, clear: bool) -> Self {
        self.config.clear_trail_on_rep = clear;
        self
    }

    /// Sets the arm fusion policy.
    #[must_use]
    pub fn arm_policy(mut self, policy: ArmPolicy) -> Self {
        self.config.arm_policy = policy;
        self
    }

    /// Sets the session mode.
    #[must_use]
    pub fn mode(mut self, mode: SessionMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Builds the configuration. Validation happens at session
    /// construction, not here.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::builder()
            .visibility_threshold(0.4)
            .smoothing_factor(0.1)
            .thresholds(95.0, 140.0, 165.0)
            .cooldown_secs(0.8)
            .trail_capacity(32)
            .clear_trail_on_rep(false)
            .arm_policy(ArmPolicy::BestConfidence)
            .mode(SessionMode::Calibration)
            .build();

        assert_eq!(config.visibility_threshold, 0.4);
        assert_eq!(config.smoothing_factor, 0.1);
        assert_eq!(config.down_threshold, 95.0);
        assert_eq!(config.reset_threshold, 140.0);
        assert_eq!(config.up_threshold, 165.0);
        assert_eq!(config.cooldown_secs, 0.8);
        assert_eq!(config.trail_capacity, 32);
        assert!(!config.clear_trail_on_rep);
        assert_eq!(config.arm_policy, ArmPolicy::BestConfidence);
        assert_eq!(config.mode, SessionMode::Calibration);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_ordering_rejected() {
        // reset above up
        let config = SessionConfig::builder().thresholds(105.0, 175.0, 170.0).build();
        assert!(config.validate().is_err());

        // down equal to reset
        let config = SessionConfig::builder().thresholds(150.0, 150.0, 170.0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_tunables_rejected() {
        let config = SessionConfig::builder().smoothing_factor(0.0).build();
        assert!(config.validate().is_err());

        let config = SessionConfig::builder().smoothing_factor(1.5).build();
        assert!(config.validate().is_err());

        let config = SessionConfig::builder().visibility_threshold(1.2).build();
        assert!(config.validate().is_err());

        let config = SessionConfig::builder().cooldown_secs(-1.0).build();
        assert!(config.validate().is_err());

        let config = SessionConfig::builder().trail_capacity(0).build();
        assert!(config.validate().is_err());

        let config = SessionConfig::builder().thresholds(105.0, 150.0, 200.0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cooldown_duration() {
        let config = SessionConfig::builder().cooldown_secs(0.5).build();
        assert_eq!(config.cooldown(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = SessionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.up_threshold, config.up_threshold);
        assert_eq!(back.arm_policy, config.arm_policy);
        assert_eq!(back.mode, config.mode);
    }
}
