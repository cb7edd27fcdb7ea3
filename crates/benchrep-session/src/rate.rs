//! Frame-rate estimation over caller-supplied timestamps.
//!
//! The upstream pose model's inference latency varies frame to frame, so
//! the interval is smoothed with the same EMA scheme used for the angle
//! signal. Used only for session statistics and overlays.

use std::time::Instant;

/// Smoothing factor for the inter-frame interval.
const INTERVAL_ALPHA: f64 = 0.1;

/// EMA estimator of the effective update rate.
#[derive(Debug, Clone, Default)]
pub struct FrameRateEstimator {
    last_tick: Option<Instant>,
    interval_secs: Option<f64>,
}

impl FrameRateEstimator {
    /// Creates a new estimator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one update call.
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            let interval = now.duration_since(last).as_secs_f64();
            self.interval_secs = Some(match self.interval_secs {
                None => interval,
                Some(prev) => INTERVAL_ALPHA * interval + (1.0 - INTERVAL_ALPHA) * prev,
            });
        }
        self.last_tick = Some(now);
    }

    /// Returns the estimated frames per second, once two ticks have been
    /// seen and the smoothed interval is non-zero.
    #[must_use]
    pub fn fps(&self) -> Option<f64> {
        match self.interval_secs {
            Some(interval) if interval > 0.0 => Some(1.0 / interval),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_estimate_before_two_ticks() {
        let mut rate = FrameRateEstimator::new();
        assert_eq!(rate.fps(), None);
        rate.tick(Instant::now());
        assert_eq!(rate.fps(), None);
    }

    #[test]
    fn test_steady_rate() {
        let mut rate = FrameRateEstimator::new();
        let base = Instant::now();
        for i in 0..50 {
            rate.tick(base + Duration::from_millis(i * 40));
        }
        let fps = rate.fps().unwrap();
        assert!((fps - 25.0).abs() < 0.5, "expected ~25 fps, got {fps}");
    }

    #[test]
    fn test_zero_interval_yields_no_estimate() {
        let mut rate = FrameRateEstimator::new();
        let now = Instant::now();
        rate.tick(now);
        rate.tick(now);
        assert_eq!(rate.fps(), None);
    }
}
