//! Clip-to-artifact encoding pipeline
//!
//! Runs the full deterministic chain: conform the clip, pick the rig for
//! its joint set, take the first conformed frame as the rest pose, solve
//! per-frame local rotations, and serialize the result as a BVH document.
//! The same clip always yields byte-identical output.

use tracing::debug;

use motus_core::{MotionClip, MotusError, MotusResult};
use motus_rig::topology_for;

use crate::bvh::{render_bvh, AnimationArtifact};
use crate::normalize::{conform, SHOULDER_WIDTH_CM, TARGET_FPS};
use crate::rigpose::{resolve_positions, rest_pose};
use crate::solve::solve_frame;

/// Tunables for the encoding pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// Output frame rate of the artifact
    pub target_fps: f32,
    /// Real-world shoulder width used for scale calibration
    pub shoulder_width_cm: f32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            shoulder_width_cm: SHOULDER_WIDTH_CM,
        }
    }
}

/// Encode a clip with default options.
pub fn encode(clip: &MotionClip) -> MotusResult<AnimationArtifact> {
    encode_with(clip, &EncodeOptions::default())
}

/// Encode a clip into a BVH animation artifact.
pub fn encode_with(clip: &MotionClip, options: &EncodeOptions) -> MotusResult<AnimationArtifact> {
    if clip.is_empty() {
        return Err(MotusError::EmptyClip);
    }

    let conformed = conform(clip, options.target_fps, options.shoulder_width_cm);
    let topology = topology_for(conformed.joint_set);
    let rest = rest_pose(topology, &conformed.frames[0]);

    let frames: Vec<_> = conformed
        .frames
        .iter()
        .map(|frame| {
            let pose = resolve_positions(topology, frame);
            solve_frame(topology, &rest, &pose)
        })
        .collect();

    debug!(
        frames = frames.len(),
        nodes = topology.len(),
        fps = options.target_fps,
        "encoded clip"
    );

    Ok(render_bvh(
        topology,
        &rest,
        &frames,
        1.0 / f64::from(options.target_fps),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::{
        CoordinateSpace, Frame, JointKey, JointSet, LandmarkPoint, PoseLandmark, Vec3,
    };
    use std::collections::BTreeMap;

    fn point(p: Vec3) -> LandmarkPoint {
        LandmarkPoint {
            x: p.x,
            y: p.y,
            z: Some(p.z),
            visibility: Some(1.0),
            confidence: Some(1.0),
        }
    }

    fn standing_frame(t: f64) -> Frame {
        let mut joints = BTreeMap::new();
        let place = |joints: &mut BTreeMap<JointKey, LandmarkPoint>, lm, x, y| {
            joints.insert(JointKey::Pose(lm), point(Vec3::new(x, y, 0.0)));
        };
        place(&mut joints, PoseLandmark::Nose, 0.5, 0.2);
        place(&mut joints, PoseLandmark::LeftShoulder, 0.6, 0.35);
        place(&mut joints, PoseLandmark::RightShoulder, 0.4, 0.35);
        place(&mut joints, PoseLandmark::LeftElbow, 0.65, 0.5);
        place(&mut joints, PoseLandmark::RightElbow, 0.35, 0.5);
        place(&mut joints, PoseLandmark::LeftWrist, 0.68, 0.62);
        place(&mut joints, PoseLandmark::RightWrist, 0.32, 0.62);
        place(&mut joints, PoseLandmark::LeftHip, 0.57, 0.6);
        place(&mut joints, PoseLandmark::RightHip, 0.43, 0.6);
        place(&mut joints, PoseLandmark::LeftKnee, 0.57, 0.75);
        place(&mut joints, PoseLandmark::RightKnee, 0.43, 0.75);
        place(&mut joints, PoseLandmark::LeftAnkle, 0.57, 0.9);
        place(&mut joints, PoseLandmark::RightAnkle, 0.43, 0.9);
        Frame {
            t,
            overall_confidence: Some(0.9),
            joints,
        }
    }

    fn still_clip(frames: usize) -> MotionClip {
        let mut clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
        for i in 0..frames {
            clip.frames.push(standing_frame(i as f64 / 30.0));
        }
        clip
    }

    #[test]
    fn test_empty_clip_rejected() {
        let clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
        assert!(matches!(encode(&clip), Err(MotusError::EmptyClip)));
    }

    #[test]
    fn test_artifact_structure() {
        let artifact = encode(&still_clip(4)).expect("encode");
        assert!(artifact.text.starts_with("HIERARCHY\n"));
        assert!(artifact.text.contains("ROOT Hips"));
        assert!(artifact.text.contains("MOTION\n"));
        assert!(artifact.frame_count > 0);
        assert!((artifact.frame_time - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_motion_width_matches_hierarchy() {
        let artifact = encode(&still_clip(4)).expect("encode");
        let topo = motus_rig::pose_topology();
        let last = artifact.text.lines().last().expect("motion line");
        assert_eq!(
            last.split_whitespace().count(),
            6 + (topo.len() - 1) * 3
        );
    }

    #[test]
    fn test_still_clip_has_no_motion() {
        let artifact = encode(&still_clip(5)).expect("encode");
        let motion_start = artifact.text.find("Frame Time:").expect("motion header");
        for line in artifact.text[motion_start..].lines().skip(1) {
            for v in line.split_whitespace() {
                let parsed: f32 = v.parse().expect("number");
                assert!(parsed.abs() < 1e-3, "unexpected motion value {parsed}");
            }
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let clip = still_clip(6);
        let a = encode(&clip).expect("encode");
        let b = encode(&clip).expect("encode");
        assert_eq!(a.text, b.text);
    }
}
