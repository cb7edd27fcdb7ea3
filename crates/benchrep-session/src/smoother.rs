//! Exponential moving average over the per-frame raw angle.
//!
//! Reduces high-frequency jitter from the detector before the angle
//! reaches the repetition state machine. Lower smoothing factors are
//! smoother but laggier; higher ones more responsive but noisier.

/// EMA smoother holding one running value.
///
/// Update rule: `smoothed = α·raw + (1−α)·smoothed_prev`, seeded with the
/// first raw sample. Frames that produce no raw sample simply leave the
/// running value untouched; the smoother is never fed a placeholder zero.
#[derive(Debug, Clone)]
pub struct AngleSmoother {
    alpha: f32,
    value: Option<f32>,
}

impl AngleSmoother {
    /// Creates a new smoother.
    ///
    /// `alpha` must already be validated to lie in (0.0, 1.0]; session
    /// construction rejects anything else.
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        debug_assert!(alpha > 0.0 && alpha <= 1.0);
        Self { alpha, value: None }
    }

    /// Feeds one raw sample and returns the updated smoothed value.
    pub fn update(&mut self, raw: f32) -> f32 {
        let smoothed = match self.value {
            None => raw,
            Some(prev) => self.alpha * raw + (1.0 - self.alpha) * prev,
        };
        self.value = Some(smoothed);
        smoothed
    }

    /// Returns the current smoothed value, if any sample has been seen.
    #[must_use]
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Clears the running value; the next sample re-seeds the smoother.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_seeds() {
        let mut smoother = AngleSmoother::new(0.2);
        assert_eq!(smoother.value(), None);
        assert_eq!(smoother.update(140.0), 140.0);
        assert_eq!(smoother.value(), Some(140.0));
    }

    #[test]
    fn test_update_rule() {
        let mut smoother = AngleSmoother::new(0.25);
        smoother.update(100.0);
        let smoothed = smoother.update(180.0);
        // 0.25 * 180 + 0.75 * 100 = 120
        assert!((smoothed - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_converges_to_constant_without_overshoot() {
        let mut smoother = AngleSmoother::new(0.2);
        smoother.update(90.0);

        let mut prev = 90.0;
        for _ in 0..100 {
            let smoothed = smoother.update(170.0);
            // Weighted average: monotonically approaches 170, never exceeds it
            assert!(smoothed >= prev);
            assert!(smoothed <= 170.0);
            prev = smoothed;
        }
        assert!((prev - 170.0).abs() < 0.01);
    }

    #[test]
    fn test_alpha_one_disables_smoothing() {
        let mut smoother = AngleSmoother::new(1.0);
        smoother.update(90.0);
        assert_eq!(smoother.update(170.0), 170.0);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut smoother = AngleSmoother::new(0.2);
        smoother.update(90.0);
        smoother.reset();
        assert_eq!(smoother.value(), None);
        assert_eq!(smoother.update(160.0), 160.0);
    }
}
