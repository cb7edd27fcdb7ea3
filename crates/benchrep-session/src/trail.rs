//! Trajectory trail of the tracked wrist.
//!
//! A bounded history of recent wrist positions for on-screen feedback.
//! Purely cosmetic: nothing here can influence counting. Positions are
//! stored in whatever coordinate space the detector uses; for drawing,
//! [`WristTrail::pixel_points`] scales normalized coordinates up to a
//! frame size.

use std::collections::VecDeque;

/// Bounded FIFO of recent 2D wrist positions.
#[derive(Debug, Clone)]
pub struct WristTrail {
    points: VecDeque<(f32, f32)>,
    capacity: usize,
    clear_on_rep: bool,
}

impl WristTrail {
    /// Creates a trail with the given capacity. When the capacity is
    /// exceeded the oldest point is evicted first.
    #[must_use]
    pub fn new(capacity: usize, clear_on_rep: bool) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            clear_on_rep,
        }
    }

    /// Appends a wrist position.
    pub fn push(&mut self, x: f32, y: f32) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((x, y));
    }

    /// Called by the session on the frame a rep is counted; clears the
    /// trail when the clear-on-rep policy is active, visually separating
    /// successive rep paths.
    pub fn on_rep_completed(&mut self) {
        if self.clear_on_rep {
            self.points.clear();
        }
    }

    /// Empties the trail.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Returns the stored positions, oldest first.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.points.iter().copied()
    }

    /// Returns the positions scaled from normalized [0, 1] coordinates to
    /// pixel space for drawing.
    #[must_use]
    pub fn pixel_points(&self, frame_width: u32, frame_height: u32) -> Vec<(f32, f32)> {
        let (w, h) = (frame_width as f32, frame_height as f32);
        self.points.iter().map(|&(x, y)| (x * w, y * h)).collect()
    }

    /// Returns the number of stored positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the trail holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
