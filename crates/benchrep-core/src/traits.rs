//! Core trait definitions for the benchrep workspace.
//!
//! This module defines the seam between the counting pipeline and the
//! external pose-estimation model. The counting session itself never talks
//! to a detector; a driver loop pulls frames from a [`PoseDetector`] and
//! feeds them to the session one at a time.

use crate::types::PoseFrame;

/// A pose-estimation backend that produces one [`PoseFrame`] per processed
/// video frame.
///
/// Implementations adapt whatever native keypoint representation the
/// backend uses (flat tensors, landmark lists, attribute objects) into the
/// stable [`PoseFrame`] layout at this boundary.
///
/// # Contract
///
/// - `Ok(Some(frame))`: a subject was detected in the frame.
/// - `Ok(None)`: the frame was processed but no subject was found. This is
///   an expected, recoverable condition, not an error.
/// - `Err(_)`: the backend itself failed (model error, closed stream).
///
/// # Example
///
/// ```
/// use benchrep_core::{PoseDetector, PoseFrame};
///
/// /// Replays a pre-recorded sequence of poses, e.g. in tests.
/// struct ScriptedDetector {
///     frames: std::vec::IntoIter<Option<PoseFrame>>,
/// }
///
/// impl PoseDetector for ScriptedDetector {
///     type Error = std::convert::Infallible;
///
///     fn next_pose(&mut self) -> Result<Option<PoseFrame>, Self::Error> {
///         Ok(self.frames.next().flatten())
///     }
/// }
/// ```
pub trait PoseDetector {
    /// Backend-specific failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Acquires and processes the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails; a frame with no
    /// detected subject is `Ok(None)`.
    fn next_pose(&mut self) -> Result<Option<PoseFrame>, Self::Error>;
}
