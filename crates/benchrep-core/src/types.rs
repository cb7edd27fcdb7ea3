//! Core data types for the benchrep workspace.
//!
//! This module defines the stable internal representation of pose data that
//! every detector backend is normalized into:
//!
//! - **Keypoint Types**: [`Keypoint`], [`KeypointType`], [`Side`]
//! - **Frame Types**: [`PoseFrame`]
//! - **Common Types**: [`Confidence`]
//!
//! The topology is the 17-keypoint COCO skeleton used by YOLOv8-pose,
//! MoveNet, and most other 2D pose models. Detector backends that emit a
//! different native layout adapt it at the boundary (see
//! [`PoseFrame::from_flat`]) rather than leaking their index scheme into
//! the counting pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::{DEFAULT_VISIBILITY_THRESHOLD, KEYPOINT_COUNT};

// =============================================================================
// Common Types
// =============================================================================

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence exceeds the default visibility
    /// threshold.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.0 >= DEFAULT_VISIBILITY_THRESHOLD
    }

    /// Returns `true` if the confidence exceeds the given threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Keypoint Types
// =============================================================================

/// Body side, for paired keypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Subject's left side
    Left,
    /// Subject's right side
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Returns the shoulder–elbow–wrist triple for this side, in that
    /// order (the order expected by elbow-angle computation).
    #[must_use]
    pub fn arm_triple(&self) -> [KeypointType; 3] {
        match self {
            Self::Left => [
                KeypointType::LeftShoulder,
                KeypointType::LeftElbow,
                KeypointType::LeftWrist,
            ],
            Self::Right => [
                KeypointType::RightShoulder,
                KeypointType::RightElbow,
                KeypointType::RightWrist,
            ],
        }
    }

    /// Returns the wrist keypoint type for this side.
    #[must_use]
    pub fn wrist(&self) -> KeypointType {
        match self {
            Self::Left => KeypointType::LeftWrist,
            Self::Right => KeypointType::RightWrist,
        }
    }

    /// Returns the side name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of body keypoint (COCO 17-keypoint format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeypointType {
    /// Nose
    Nose = 0,
    /// Left eye
    LeftEye = 1,
    /// Right eye
    RightEye = 2,
    /// Left ear
    LeftEar = 3,
    /// Right ear
    RightEar = 4,
    /// Left shoulder
    LeftShoulder = 5,
    /// Right shoulder
    RightShoulder = 6,
    /// Left elbow
    LeftElbow = 7,
    /// Right elbow
    RightElbow = 8,
    /// Left wrist
    LeftWrist = 9,
    /// Right wrist
    RightWrist = 10,
    /// Left hip
    LeftHip = 11,
    /// Right hip
    RightHip = 12,
    /// Left knee
    LeftKnee = 13,
    /// Right knee
    RightKnee = 14,
    /// Left ankle
    LeftAnkle = 15,
    /// Right ankle
    RightAnkle = 16,
}

impl KeypointType {
    /// Returns all keypoint types in index order.
    #[must_use]
    pub fn all() -> [Self; KEYPOINT_COUNT] {
        [
            Self::Nose,
            Self::LeftEye,
            Self::RightEye,
            Self::LeftEar,
            Self::RightEar,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
        ]
    }

    /// Returns the keypoint name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Returns the side this keypoint belongs to, if it is a paired
    /// keypoint.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Nose => None,
            Self::LeftEye
            | Self::LeftEar
            | Self::LeftShoulder
            | Self::LeftElbow
            | Self::LeftWrist
            | Self::LeftHip
            | Self::LeftKnee
            | Self::LeftAnkle => Some(Side::Left),
            Self::RightEye
            | Self::RightEar
            | Self::RightShoulder
            | Self::RightElbow
            | Self::RightWrist
            | Self::RightHip
            | Self::RightKnee
            | Self::RightAnkle => Some(Side::Right),
        }
    }

    /// Returns `true` if this is an arm keypoint (shoulder, elbow, or
    /// wrist on either side).
    #[must_use]
    pub fn is_arm(&self) -> bool {
        matches!(
            self,
            Self::LeftShoulder
                | Self::RightShoulder
                | Self::LeftElbow
                | Self::RightElbow
                | Self::LeftWrist
                | Self::RightWrist
        )
    }
}

impl TryFrom<u8> for KeypointType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Nose),
            1 => Ok(Self::LeftEye),
            2 => Ok(Self::RightEye),
            3 => Ok(Self::LeftEar),
            4 => Ok(Self::RightEar),
            5 => Ok(Self::LeftShoulder),
            6 => Ok(Self::RightShoulder),
            7 => Ok(Self::LeftElbow),
            8 => Ok(Self::RightElbow),
            9 => Ok(Self::LeftWrist),
            10 => Ok(Self::RightWrist),
            11 => Ok(Self::LeftHip),
            12 => Ok(Self::RightHip),
            13 => Ok(Self::LeftKnee),
            14 => Ok(Self::RightKnee),
            15 => Ok(Self::LeftAnkle),
            16 => Ok(Self::RightAnkle),
            _ => Err(CoreError::validation(format!(
                "Invalid keypoint type: {value}"
            ))),
        }
    }
}

/// A single body keypoint with position and confidence.
///
/// Coordinates may be normalized [0.0, 1.0] or absolute pixels; the
/// convention must stay consistent for a whole session. Angle thresholds
/// are coordinate-space independent either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Type of keypoint
    pub keypoint_type: KeypointType,
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Detection confidence
    pub confidence: Confidence,
}

impl Keypoint {
    /// Creates a new keypoint.
    #[must_use]
    pub fn new(keypoint_type: KeypointType, x: f32, y: f32, confidence: Confidence) -> Self {
        Self {
            keypoint_type,
            x,
            y,
            confidence,
        }
    }

    /// Returns `true` if this keypoint should be considered visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.confidence.is_high()
    }

    /// Returns the 2D position as a tuple.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Calculates the Euclidean distance to another keypoint.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// =============================================================================
// Frame Types
// =============================================================================

/// All keypoints detected for one subject in one video frame.
///
/// A fixed-length, index-stable collection; keypoints the detector did not
/// report are `None`. Absence of any detection at all is expressed by the
/// caller passing no frame to the session, not by an empty `PoseFrame`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrame {
    /// All detected keypoints, indexed by [`KeypointType`]
    keypoints: [Option<Keypoint>; KEYPOINT_COUNT],
}

impl PoseFrame {
    /// Creates a new empty pose frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keypoints: [None; KEYPOINT_COUNT],
        }
    }

    /// Builds a pose frame from the flat `[x, y, confidence] × 17` layout
    /// that YOLOv8-pose and similar detectors emit.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly `17 × 3` values long,
    /// or if any confidence value falls outside [0.0, 1.0].
    pub fn from_flat(values: &[f32]) -> CoreResult<Self> {
        if values.len() != KEYPOINT_COUNT * 3 {
            return Err(CoreError::validation(format!(
                "Expected {} values ([x, y, conf] x {KEYPOINT_COUNT}), got {}",
                KEYPOINT_COUNT * 3,
                values.len()
            )));
        }

        let mut frame = Self::new();
        for (i, keypoint_type) in KeypointType::all().into_iter().enumerate() {
            let confidence = Confidence::new(values[i * 3 + 2])?;
            frame.set_keypoint(Keypoint::new(
                keypoint_type,
                values[i * 3],
                values[i * 3 + 1],
                confidence,
            ));
        }
        Ok(frame)
    }

    /// Sets a keypoint, replacing any previous value of the same type.
    pub fn set_keypoint(&mut self, keypoint: Keypoint) {
        self.keypoints[keypoint.keypoint_type as usize] = Some(keypoint);
    }

    /// Gets a keypoint by type.
    #[must_use]
    pub fn keypoint(&self, keypoint_type: KeypointType) -> Option<&Keypoint> {
        self.keypoints[keypoint_type as usize].as_ref()
    }

    /// Returns the shoulder–elbow–wrist triple for one side, if all three
    /// keypoints are present (no confidence filtering here).
    #[must_use]
    pub fn arm_triple(&self, side: Side) -> Option<[&Keypoint; 3]> {
        let [shoulder, elbow, wrist] = side.arm_triple();
        Some([
            self.keypoint(shoulder)?,
            self.keypoint(elbow)?,
            self.keypoint(wrist)?,
        ])
    }

    /// Returns the number of keypoints whose confidence exceeds the given
    /// threshold.
    #[must_use]
    pub fn visible_count(&self, threshold: f32) -> usize {
        self.keypoints
            .iter()
            .filter(|kp| kp.as_ref().is_some_and(|kp| kp.confidence.exceeds(threshold)))
            .count()
    }
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self::new()
    }
}
