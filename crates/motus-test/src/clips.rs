//! Synthetic clip generators

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use motus_core::{
    CoordinateSpace, Frame, Hand, HandLandmark, JointKey, JointSet, LandmarkPoint, MotionClip,
    PoseLandmark, Vec3,
};

/// A plausible standing figure in normalized image space
pub fn standing_pose() -> BTreeMap<JointKey, Vec3> {
    let mut joints = BTreeMap::new();
    let mut place = |lm: PoseLandmark, x: f32, y: f32| {
        joints.insert(JointKey::Pose(lm), Vec3::new(x, y, 0.0));
    };
    place(PoseLandmark::Nose, 0.5, 0.18);
    place(PoseLandmark::LeftEar, 0.54, 0.19);
    place(PoseLandmark::RightEar, 0.46, 0.19);
    place(PoseLandmark::LeftShoulder, 0.6, 0.34);
    place(PoseLandmark::RightShoulder, 0.4, 0.34);
    place(PoseLandmark::LeftElbow, 0.65, 0.48);
    place(PoseLandmark::RightElbow, 0.35, 0.48);
    place(PoseLandmark::LeftWrist, 0.68, 0.6);
    place(PoseLandmark::RightWrist, 0.32, 0.6);
    place(PoseLandmark::LeftHip, 0.57, 0.6);
    place(PoseLandmark::RightHip, 0.43, 0.6);
    place(PoseLandmark::LeftKnee, 0.57, 0.76);
    place(PoseLandmark::RightKnee, 0.43, 0.76);
    place(PoseLandmark::LeftAnkle, 0.57, 0.92);
    place(PoseLandmark::RightAnkle, 0.43, 0.92);
    joints
}

fn frame_from_positions(t: f64, positions: &BTreeMap<JointKey, Vec3>) -> Frame {
    let mut frame = Frame::new(t);
    frame.overall_confidence = Some(0.92);
    for (&key, &p) in positions {
        frame.joints.insert(
            key,
            LandmarkPoint {
                x: p.x,
                y: p.y,
                z: Some(p.z),
                visibility: Some(0.95),
                confidence: Some(0.92),
            },
        );
    }
    frame
}

/// Clip of a motionless standing figure.
pub fn still_clip(frames: usize, fps: f32) -> MotionClip {
    let base = standing_pose();
    let mut clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
    for i in 0..frames {
        clip.frames
            .push(frame_from_positions(i as f64 / f64::from(fps), &base));
    }
    clip
}

/// Clip of a figure waving its left forearm side to side.
pub fn wave_clip(frames: usize, fps: f32) -> MotionClip {
    let base = standing_pose();
    let mut clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
    for i in 0..frames {
        let phase = i as f32 / frames.max(1) as f32 * std::f32::consts::TAU;
        let mut positions = base.clone();
        let elbow = positions[&JointKey::Pose(PoseLandmark::LeftElbow)];
        positions.insert(
            JointKey::Pose(PoseLandmark::LeftWrist),
            elbow + Vec3::new(0.12 * phase.sin(), -0.1, 0.0),
        );
        clip.frames
            .push(frame_from_positions(i as f64 / f64::from(fps), &positions));
    }
    clip
}

/// Still clip with per-point Gaussian-ish jitter, seeded for repeatability.
pub fn jittered_clip(seed: u64, frames: usize, fps: f32, jitter: f32) -> MotionClip {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = standing_pose();
    let mut clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
    for i in 0..frames {
        let mut positions = base.clone();
        for p in positions.values_mut() {
            *p = *p
                + Vec3::new(
                    rng.gen_range(-jitter..=jitter),
                    rng.gen_range(-jitter..=jitter),
                    0.0,
                );
        }
        clip.frames
            .push(frame_from_positions(i as f64 / f64::from(fps), &positions));
    }
    clip
}

fn add_hand(positions: &mut BTreeMap<JointKey, Vec3>, hand: Hand, wrist: Vec3, dir: f32) {
    for (i, lm) in HandLandmark::ALL.iter().enumerate() {
        let spread = (i % 4) as f32 * 0.01;
        let finger = (i / 4) as f32 * 0.008;
        positions.insert(
            JointKey::Hand(hand, *lm),
            wrist + Vec3::new(dir * (0.01 + spread), -finger, 0.0),
        );
    }
}

/// Still clip with both hands tracked.
pub fn hands_clip(frames: usize, fps: f32) -> MotionClip {
    let mut base = standing_pose();
    let lw = base[&JointKey::Pose(PoseLandmark::LeftWrist)];
    let rw = base[&JointKey::Pose(PoseLandmark::RightWrist)];
    add_hand(&mut base, Hand::Left, lw, 1.0);
    add_hand(&mut base, Hand::Right, rw, -1.0);
    let mut clip = MotionClip::new(JointSet::PoseHands, CoordinateSpace::Normalized);
    for i in 0..frames {
        clip.frames
            .push(frame_from_positions(i as f64 / f64::from(fps), &base));
    }
    clip
}

/// Still clip with a fraction of joints randomly dropped per frame.
pub fn sparse_clip(seed: u64, frames: usize, fps: f32, drop_rate: f64) -> MotionClip {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = standing_pose();
    let mut clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
    for i in 0..frames {
        let mut frame = frame_from_positions(i as f64 / f64::from(fps), &base);
        frame
            .joints
            .retain(|_, _| !rng.gen_bool(drop_rate.clamp(0.0, 0.95)));
        clip.frames.push(frame);
    }
    clip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_clip_shape() {
        let clip = still_clip(10, 30.0);
        assert_eq!(clip.frames.len(), 10);
        assert_eq!(clip.joint_set, JointSet::Pose);
        assert!((clip.duration() - 9.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_wave_clip_moves_wrist() {
        let clip = wave_clip(20, 30.0);
        let key = JointKey::Pose(PoseLandmark::LeftWrist);
        let first = clip.frames[0].joint(key).unwrap();
        let moved = clip
            .frames
            .iter()
            .any(|f| f.joint(key).unwrap().distance(&first) > 0.05);
        assert!(moved);
    }

    #[test]
    fn test_jittered_clip_is_repeatable() {
        let a = jittered_clip(7, 5, 30.0, 0.01);
        let b = jittered_clip(7, 5, 30.0, 0.01);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hands_clip_joint_counts() {
        let clip = hands_clip(2, 30.0);
        assert_eq!(clip.joint_set, JointSet::PoseHands);
        let hand_joints = clip.frames[0]
            .joints
            .keys()
            .filter(|k| matches!(k, JointKey::Hand(..)))
            .count();
        assert_eq!(hand_joints, 42);
    }

    #[test]
    fn test_sparse_clip_drops_joints() {
        let full = still_clip(5, 30.0);
        let sparse = sparse_clip(3, 5, 30.0, 0.5);
        let full_count: usize = full.frames.iter().map(|f| f.joints.len()).sum();
        let sparse_count: usize = sparse.frames.iter().map(|f| f.joints.len()).sum();
        assert!(sparse_count < full_count);
    }
}
