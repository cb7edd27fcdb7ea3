//! End-to-end validation of the counting pipeline.
//!
//! These tests drive a whole session through the public API with
//! synthetic keypoints and caller-controlled timestamps, checking the
//! counting properties the pipeline guarantees.

use std::time::{Duration, Instant};

use benchrep_core::{Confidence, Keypoint, PoseDetector, PoseFrame, Side};
use benchrep_session::{
    ArmPolicy, RepPhase, RepSession, SessionConfig, SessionMode,
};

/// Builds a right-arm pose with the requested elbow angle: the shoulder
/// sits left of the elbow and the wrist is rotated off that direction by
/// the angle.
fn arm_pose(elbow_degrees: f32) -> PoseFrame {
    let conf = Confidence::new(0.9).unwrap();
    let [shoulder_type, elbow_type, wrist_type] = Side::Right.arm_triple();

    let elbow = (0.5, 0.5);
    let theta = elbow_degrees.to_radians();
    let mut pose = PoseFrame::new();
    pose.set_keypoint(Keypoint::new(shoulder_type, elbow.0 - 0.2, elbow.1, conf));
    pose.set_keypoint(Keypoint::new(elbow_type, elbow.0, elbow.1, conf));
    pose.set_keypoint(Keypoint::new(
        wrist_type,
        elbow.0 - 0.2 * theta.cos(),
        elbow.1 + 0.2 * theta.sin(),
        conf,
    ));
    pose
}

/// Session with smoothing disabled so angle sequences arrive exactly.
fn unsmoothed_session() -> RepSession {
    let config = SessionConfig::builder()
        .smoothing_factor(1.0)
        .cooldown_secs(0.5)
        .build();
    RepSession::new(config).unwrap()
}

#[test]
fn validate_clean_cycle_counts_exactly_one() {
    let mut session = unsmoothed_session();
    let base = Instant::now();

    // Full cycle with frame spacing well beyond the cooldown
    let angles = [170.0, 140.0, 90.0, 175.0];
    let mut last = None;
    for (i, angle) in angles.into_iter().enumerate() {
        last = Some(session.update(
            Some(&arm_pose(angle)),
            base + Duration::from_secs(i as u64),
        ));
    }

    let report = last.unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(report.phase, RepPhase::Up);
    assert!(report.rep_completed);
}

#[test]
fn validate_cooldown_suppresses_double_count() {
    // Angles oscillating around the up threshold at 50 ms spacing with a
    // 500 ms cooldown must count exactly 1 rep, not 2.
    let mut session = unsmoothed_session();
    let base = Instant::now();

    let angles = [90.0, 170.0, 172.0, 90.0, 171.0];
    let mut counts = Vec::new();
    for (i, angle) in angles.into_iter().enumerate() {
        let report = session.update(
            Some(&arm_pose(angle)),
            base + Duration::from_millis(i as u64 * 50),
        );
        counts.push(report.count);
    }

    assert_eq!(counts, vec![0, 0, 1, 1, 1]);
}

#[test]
fn validate_count_never_decreases() {
    let mut session = unsmoothed_session();
    let base = Instant::now();

    let angles = [
        170.0, 150.0, 100.0, 175.0, 90.0, 171.0, 85.0, 60.0, 174.0, 169.0, 95.0, 178.0,
    ];
    let mut prev = 0;
    for (i, angle) in angles.into_iter().enumerate() {
        let report = session.update(
            Some(&arm_pose(angle)),
            base + Duration::from_secs(i as u64),
        );
        assert!(report.count >= prev);
        assert!(report.count - prev <= 1);
        prev = report.count;
    }
    assert_eq!(prev, 4);
}

#[test]
fn validate_absence_is_a_no_op() {
    let mut session = unsmoothed_session();
    let base = Instant::now();

    session.update(Some(&arm_pose(140.0)), base);
    let valid = session.update(Some(&arm_pose(90.0)), base + Duration::from_secs(1));

    // No detection immediately after a valid frame
    let absent = session.update(None, base + Duration::from_secs(2));
    assert_eq!(absent.count, valid.count);
    assert_eq!(absent.phase, valid.phase);
    assert_eq!(absent.smoothed_angle, valid.smoothed_angle);

    // The cycle still completes normally afterwards
    let report = session.update(Some(&arm_pose(175.0)), base + Duration::from_secs(3));
    assert_eq!(report.count, 1);
}

#[test]
fn validate_ema_converges_without_overshoot() {
    let config = SessionConfig::builder().smoothing_factor(0.2).build();
    let mut session = RepSession::new(config).unwrap();
    let base = Instant::now();

    // Seed well below the target, then hold a constant angle
    session.update(Some(&arm_pose(90.0)), base);

    let mut prev = 90.0f32;
    let mut smoothed = prev;
    for i in 1..120 {
        let report = session.update(
            Some(&arm_pose(160.0)),
            base + Duration::from_millis(i * 40),
        );
        smoothed = report.smoothed_angle.unwrap();
        assert!(smoothed >= prev - 1e-3, "EMA must approach monotonically");
        assert!(smoothed <= 160.5, "EMA must never exceed a constant input");
        prev = smoothed;
    }
    assert!(
        (smoothed - 160.0).abs() < 0.5,
        "EMA should converge to the constant input, got {smoothed}"
    );
}

#[test]
fn validate_calibration_mode_only_observes() {
    let config = SessionConfig::builder()
        .smoothing_factor(1.0)
        .mode(SessionMode::Calibration)
        .build();
    let mut session = RepSession::new(config).unwrap();
    let base = Instant::now();

    // Several full "reps" worth of motion
    let angles = [170.0, 140.0, 90.0, 175.0, 88.0, 176.0, 92.0, 171.0];
    for (i, angle) in angles.into_iter().enumerate() {
        let report = session.update(
            Some(&arm_pose(angle)),
            base + Duration::from_secs(i as u64),
        );
        assert_eq!(report.count, 0, "calibration must never count");
        assert_eq!(report.phase, RepPhase::Up, "calibration must never change phase");

        let snap = report.calibration.expect("calibration snapshot present");
        // min/max must bound every raw angle seen so far; the synthetic
        // poses land within half a degree of the requested angle.
        assert!(snap.min_angle <= angle + 0.5);
        assert!(snap.max_angle >= angle - 0.5);
    }

    let snap = session.stats().calibration.unwrap();
    assert!(snap.min_angle < 89.0);
    assert!(snap.max_angle > 175.0);
    assert_eq!(snap.samples, angles.len() as u64);
}

// ---------------------------------------------------------------------------
// Detector seam
// ---------------------------------------------------------------------------

/// Replays a pre-recorded pose sequence through the detector contract.
struct ScriptedDetector {
    frames: std::vec::IntoIter<Option<PoseFrame>>,
}

impl ScriptedDetector {
    fn from_angles(angles: &[Option<f32>]) -> Self {
        let frames: Vec<Option<PoseFrame>> = angles
            .iter()
            .map(|angle| angle.map(arm_pose))
            .collect();
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl PoseDetector for ScriptedDetector {
    type Error = std::convert::Infallible;

    fn next_pose(&mut self) -> Result<Option<PoseFrame>, Self::Error> {
        Ok(self.frames.next().flatten())
    }
}

#[test]
fn validate_driver_loop_over_detector_seam() {
    // Three clean cycles with occlusion gaps in between
    let script = [
        Some(170.0), Some(120.0), Some(90.0), Some(175.0),
        None, None,
        Some(140.0), Some(88.0), Some(176.0),
        Some(130.0), None, Some(92.0), Some(174.0),
    ];
    let mut detector = ScriptedDetector::from_angles(&script);
    let mut session = unsmoothed_session();
    let base = Instant::now();

    let mut completions = 0;
    for i in 0..script.len() {
        let frame = detector.next_pose().unwrap();
        let report = session.update(frame.as_ref(), base + Duration::from_secs(i as u64));
        if report.rep_completed {
            completions += 1;
        }
    }

    assert_eq!(session.count(), 3);
    assert_eq!(completions, 3, "each rep signals completion exactly once");

    let stats = session.stats();
    assert_eq!(stats.frames_seen, script.len() as u64);
    assert_eq!(stats.frames_skipped, 3);
    assert!(stats.fps.is_some());
}

#[test]
fn validate_report_serialization() {
    let mut session = unsmoothed_session();
    let report = session.update(Some(&arm_pose(150.0)), Instant::now());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"phase\":\"up\""));
    assert!(json.contains("\"rep_completed\":false"));
}
