//! Landmark edge sets for visualization
//!
//! Unknown joint-set identifiers yield an empty edge set rather than an
//! error; rendering simply draws nothing.

use std::sync::OnceLock;

use motus_core::{Hand, HandLandmark, JointKey, PoseLandmark};

fn pose_edge(a: PoseLandmark, b: PoseLandmark) -> (JointKey, JointKey) {
    (JointKey::Pose(a), JointKey::Pose(b))
}

fn build_pose_edges() -> Vec<(JointKey, JointKey)> {
    use PoseLandmark::*;
    vec![
        // Face reference points
        pose_edge(Nose, LeftEyeInner),
        pose_edge(LeftEyeInner, LeftEye),
        pose_edge(LeftEye, LeftEyeOuter),
        pose_edge(LeftEyeOuter, LeftEar),
        pose_edge(Nose, RightEyeInner),
        pose_edge(RightEyeInner, RightEye),
        pose_edge(RightEye, RightEyeOuter),
        pose_edge(RightEyeOuter, RightEar),
        pose_edge(MouthLeft, MouthRight),
        // Torso box
        pose_edge(LeftShoulder, RightShoulder),
        pose_edge(LeftShoulder, LeftHip),
        pose_edge(RightShoulder, RightHip),
        pose_edge(LeftHip, RightHip),
        // Arms
        pose_edge(LeftShoulder, LeftElbow),
        pose_edge(LeftElbow, LeftWrist),
        pose_edge(LeftWrist, LeftThumb),
        pose_edge(LeftWrist, LeftIndex),
        pose_edge(LeftWrist, LeftPinky),
        pose_edge(RightShoulder, RightElbow),
        pose_edge(RightElbow, RightWrist),
        pose_edge(RightWrist, RightThumb),
        pose_edge(RightWrist, RightIndex),
        pose_edge(RightWrist, RightPinky),
        // Legs
        pose_edge(LeftHip, LeftKnee),
        pose_edge(LeftKnee, LeftAnkle),
        pose_edge(LeftAnkle, LeftHeel),
        pose_edge(LeftHeel, LeftFootIndex),
        pose_edge(RightHip, RightKnee),
        pose_edge(RightKnee, RightAnkle),
        pose_edge(RightAnkle, RightHeel),
        pose_edge(RightHeel, RightFootIndex),
    ]
}

fn push_hand_edges(edges: &mut Vec<(JointKey, JointKey)>, hand: Hand) {
    let key = |lm: HandLandmark| JointKey::Hand(hand, lm);
    for finger in HandLandmark::FINGERS {
        edges.push((key(HandLandmark::Wrist), key(finger[0])));
        for pair in finger.windows(2) {
            edges.push((key(pair[0]), key(pair[1])));
        }
    }
}

fn build_pose_hands_edges() -> Vec<(JointKey, JointKey)> {
    let mut edges = build_pose_edges();
    push_hand_edges(&mut edges, Hand::Left);
    push_hand_edges(&mut edges, Hand::Right);
    edges
}

/// Visualization edges for a joint-set identifier.
///
/// Built once per process; unknown identifiers return an empty slice.
pub fn landmark_edges(joint_set_id: &str) -> &'static [(JointKey, JointKey)] {
    static POSE: OnceLock<Vec<(JointKey, JointKey)>> = OnceLock::new();
    static POSE_HANDS: OnceLock<Vec<(JointKey, JointKey)>> = OnceLock::new();

    match joint_set_id {
        "pose" => POSE.get_or_init(build_pose_edges),
        "pose_hands" => POSE_HANDS.get_or_init(build_pose_hands_edges),
        _ => &[],
    }
}
