//! Arm selection: from a full pose to zero-or-one elbow angle per frame.
//!
//! Each side is evaluated independently: all three of its arm joints must
//! exceed the visibility threshold and the joint positions must not be
//! degenerate, otherwise the side yields nothing. The configured
//! [`ArmPolicy`] then fuses whatever sides are available into a single
//! sample. When neither side qualifies the frame produces no sample at
//! all, and the caller leaves every piece of downstream state untouched.

use benchrep_core::{Keypoint, PoseFrame, Side};
use serde::{Deserialize, Serialize};

use crate::config::ArmPolicy;
use crate::geometry;

/// Minimum distance between adjacent arm joints for the geometry to be
/// considered well-defined. Coincident points would make the elbow angle
/// numerically meaningless even though it is computable.
const DEGENERATE_DISTANCE: f32 = 1e-4;

/// Which arm(s) produced the angle sample for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleSource {
    /// Only the left arm was usable
    Left,
    /// Only the right arm was usable
    Right,
    /// Both arms contributed (policy-dependent fusion)
    Both,
}

impl AngleSource {
    /// Returns the source name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Both => "both",
        }
    }
}

/// One raw elbow-angle sample selected from a pose frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmAngle {
    /// Elbow angle in degrees, [0, 180]
    pub degrees: f32,
    /// Which side(s) the sample came from
    pub source: AngleSource,
    /// Wrist keypoint of the contributing side (the higher-confidence
    /// wrist when both sides contribute); feeds the trajectory trail
    pub wrist: Keypoint,
}

/// Angle computed for one side, before fusion.
#[derive(Debug, Clone, Copy)]
struct SideAngle {
    degrees: f32,
    min_confidence: f32,
    wrist: Keypoint,
}

/// Selects a representative elbow angle per frame from both-arm joint
/// triples.
#[derive(Debug, Clone)]
pub struct ArmSelector {
    policy: ArmPolicy,
    visibility_threshold: f32,
}

impl ArmSelector {
    /// Creates a new selector.
    #[must_use]
    pub fn new(policy: ArmPolicy, visibility_threshold: f32) -> Self {
        Self {
            policy,
            visibility_threshold,
        }
    }

    /// Returns the configured fusion policy.
    #[must_use]
    pub fn policy(&self) -> ArmPolicy {
        self.policy
    }

    /// Produces zero-or-one raw angle sample from a pose frame.
    #[must_use]
    pub fn select(&self, pose: &PoseFrame) -> Option<ArmAngle> {
        let left = self.side_angle(pose, Side::Left);
        let right = self.side_angle(pose, Side::Right);

        match (left, right) {
            (None, None) => None,
            (Some(side), None) => Some(Self::single(side, AngleSource::Left)),
            (None, Some(side)) => Some(Self::single(side, AngleSource::Right)),
            (Some(left), Some(right)) => Some(self.fuse(left, right)),
        }
    }

    /// Computes the elbow angle for one side, if all three joints are
    /// present, confident, and non-degenerate.
    fn side_angle(&self, pose: &PoseFrame, side: Side) -> Option<SideAngle> {
        let [shoulder, elbow, wrist] = pose.arm_triple(side)?;

        let min_confidence = shoulder
            .confidence
            .value()
            .min(elbow.confidence.value())
            .min(wrist.confidence.value());
        if min_confidence < self.visibility_threshold {
            return None;
        }

        if shoulder.distance_to(elbow) < DEGENERATE_DISTANCE
            || wrist.distance_to(elbow) < DEGENERATE_DISTANCE
        {
            return None;
        }

        Some(SideAngle {
            degrees: geometry::joint_angle(shoulder.position(), elbow.position(), wrist.position()),
            min_confidence,
            wrist: *wrist,
        })
    }

    fn single(side: SideAngle, source: AngleSource) -> ArmAngle {
        ArmAngle {
            degrees: side.degrees,
            source,
            wrist: side.wrist,
        }
    }

    /// Fuses two available sides according to the configured policy.
    fn fuse(&self, left: SideAngle, right: SideAngle) -> ArmAngle {
        match self.policy {
            ArmPolicy::AverageOfVisible => ArmAngle {
                degrees: (left.degrees + right.degrees) / 2.0,
                source: AngleSource::Both,
                wrist: if left.min_confidence >= right.min_confidence {
                    left.wrist
                } else {
                    right.wrist
                },
            },
            ArmPolicy::BestConfidence => {
                if left.min_confidence >= right.min_confidence {
                    Self::single(left, AngleSource::Left)
                } else {
                    Self::single(right, AngleSource::Right)
                }
            }
            ArmPolicy::MostExtended => {
                if left.degrees >= right.degrees {
                    Self::single(left, AngleSource::Left)
                } else {
                    Self::single(right, AngleSource::Right)
                }
            }
        }
    }
}
