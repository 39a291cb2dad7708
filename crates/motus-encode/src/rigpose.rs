//! Per-frame rig position resolution and the rest pose
//!
//! Resolution is a three-pass sweep over the topology:
//! 1. landmark-sourced nodes (with wrist re-basing for hand chains)
//! 2. rig-node midpoints (synthetic torso nodes)
//! 3. parent inheritance for anything still unresolved
//!
//! After the sweep every node has a finite position; a missing landmark
//! degrades one node, never the whole frame.

use motus_core::{Frame, Hand, HandLandmark, JointKey, Vec3};
use motus_rig::{PositionSource, RigTopology};

/// Resolved rig-node positions for one frame, indexed by topology order
#[derive(Debug, Clone)]
pub struct RigPose {
    pub positions: Vec<Vec3>,
}

impl RigPose {
    pub fn position(&self, idx: usize) -> Vec3 {
        self.positions[idx]
    }
}

/// Rest-pose positions, root translated to the origin
#[derive(Debug, Clone)]
pub struct RestPose {
    pub positions: Vec<Vec3>,
}

impl RestPose {
    pub fn position(&self, idx: usize) -> Vec3 {
        self.positions[idx]
    }
}

/// Offset between the pose-derived wrist and the hand source's own wrist
/// landmark, used to keep fingers attached to the arm when the two landmark
/// sources disagree
fn wrist_offset(frame: &Frame, hand: Hand) -> Option<Vec3> {
    let pose_wrist = frame.pose_joint(hand.pose_wrist())?;
    let hand_wrist = frame.joint(JointKey::Hand(hand, HandLandmark::Wrist))?;
    Some(pose_wrist - hand_wrist)
}

/// Resolve every rig node's position for one frame.
pub fn resolve_positions(topology: &RigTopology, frame: &Frame) -> RigPose {
    let left_offset = wrist_offset(frame, Hand::Left);
    let right_offset = wrist_offset(frame, Hand::Right);

    let mut resolved: Vec<Option<Vec3>> = vec![None; topology.len()];

    // Pass 1: landmark-derived nodes
    for (idx, node) in topology.nodes().iter().enumerate() {
        resolved[idx] = match node.source {
            PositionSource::Landmark(key) => {
                let p = frame.joint(key);
                match key {
                    JointKey::Hand(hand, _) => p.map(|p| {
                        let offset = match hand {
                            Hand::Left => left_offset,
                            Hand::Right => right_offset,
                        };
                        p + offset.unwrap_or(Vec3::ZERO)
                    }),
                    JointKey::Pose(_) => p,
                }
            }
            PositionSource::Midpoint(a, b) => match (frame.joint(a), frame.joint(b)) {
                (Some(pa), Some(pb)) => Some(pa.midpoint(&pb)),
                _ => None,
            },
            PositionSource::NodeMidpoint(..) => None,
        };
    }

    // Pass 2: synthetic torso midpoints over pass-1 results
    for (idx, node) in topology.nodes().iter().enumerate() {
        if let PositionSource::NodeMidpoint(a, b) = node.source {
            if let (Some(pa), Some(pb)) = (resolved[a], resolved[b]) {
                resolved[idx] = Some(pa.midpoint(&pb));
            }
        }
    }

    // Pass 3: inherit the parent's resolved position (root falls back to
    // the origin), in traversal order so parents resolve first
    let mut positions = vec![Vec3::ZERO; topology.len()];
    for (idx, node) in topology.nodes().iter().enumerate() {
        positions[idx] = match resolved[idx].filter(Vec3::is_finite) {
            Some(p) => p,
            None => match node.parent {
                Some(p) => positions[p],
                None => Vec3::ZERO,
            },
        };
    }

    RigPose { positions }
}

/// Rest pose from a clip's first frame, with the root re-centered to the
/// origin. Computed once per encode; all per-frame rotations are relative
/// to it.
pub fn rest_pose(topology: &RigTopology, first_frame: &Frame) -> RestPose {
    let pose = resolve_positions(topology, first_frame);
    let root = pose.positions[RigTopology::ROOT];
    RestPose {
        positions: pose.positions.iter().map(|p| *p - root).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::{LandmarkPoint, PoseLandmark};
    use motus_rig::{full_topology, pose_topology};

    fn body_frame() -> Frame {
        let mut f = Frame::new(0.0);
        let mut put = |lm: PoseLandmark, x: f32, y: f32| {
            f.joints
                .insert(JointKey::Pose(lm), LandmarkPoint::new(x, y));
        };
        put(PoseLandmark::Nose, 0.0, 6.0);
        put(PoseLandmark::LeftShoulder, 2.0, 4.0);
        put(PoseLandmark::RightShoulder, -2.0, 4.0);
        put(PoseLandmark::LeftElbow, 3.0, 2.0);
        put(PoseLandmark::LeftWrist, 4.0, 0.0);
        put(PoseLandmark::LeftHip, 1.0, 0.0);
        put(PoseLandmark::RightHip, -1.0, 0.0);
        f
    }

    #[test]
    fn test_synthetic_torso_midpoints() {
        let topo = pose_topology();
        let pose = resolve_positions(&topo, &body_frame());

        let hips = pose.position(topo.index_of("Hips").expect("hips"));
        assert!(hips.distance(&Vec3::new(0.0, 0.0, 0.0)) < 1e-5);

        let chest = pose.position(topo.index_of("Chest").expect("chest"));
        assert!(chest.distance(&Vec3::new(0.0, 4.0, 0.0)) < 1e-5);

        let spine = pose.position(topo.index_of("Spine").expect("spine"));
        assert!(spine.distance(&Vec3::new(0.0, 2.0, 0.0)) < 1e-5);

        let neck = pose.position(topo.index_of("Neck").expect("neck"));
        assert!(neck.distance(&Vec3::new(0.0, 5.0, 0.0)) < 1e-5);
    }

    #[test]
    fn test_missing_landmark_inherits_parent() {
        let topo = pose_topology();
        let mut frame = body_frame();
        frame.joints.remove(&JointKey::Pose(PoseLandmark::LeftWrist));

        let pose = resolve_positions(&topo, &frame);
        let elbow = pose.position(topo.index_of("LeftElbow").expect("elbow"));
        let wrist = pose.position(topo.index_of("LeftWrist").expect("wrist"));
        assert_eq!(elbow, wrist);
    }

    #[test]
    fn test_non_finite_landmark_inherits_parent() {
        let topo = pose_topology();
        let mut frame = body_frame();
        frame.joints.insert(
            JointKey::Pose(PoseLandmark::LeftWrist),
            LandmarkPoint::new(f32::NAN, 0.0),
        );

        let pose = resolve_positions(&topo, &frame);
        for p in &pose.positions {
            assert!(p.is_finite());
        }
    }

    #[test]
    fn test_hand_rebased_to_pose_wrist() {
        let topo = full_topology();
        let mut frame = body_frame();
        // hand source disagrees with the pose wrist by (1, 1)
        frame.joints.insert(
            JointKey::Hand(Hand::Left, HandLandmark::Wrist),
            LandmarkPoint::new(3.0, -1.0),
        );
        frame.joints.insert(
            JointKey::Hand(Hand::Left, HandLandmark::IndexMcp),
            LandmarkPoint::new(3.5, -1.5),
        );

        let pose = resolve_positions(&topo, &frame);
        let index1 = pose.position(topo.index_of("LeftHandIndex1").expect("index1"));
        // re-based by the (1, 1) wrist offset
        assert!(index1.distance(&Vec3::new(4.5, -0.5, 0.0)) < 1e-5);
    }

    #[test]
    fn test_rest_pose_root_at_origin() {
        let topo = pose_topology();
        let mut frame = body_frame();
        // move the whole body so the raw root is away from the origin
        for p in frame.joints.values_mut() {
            p.x += 5.0;
        }
        let rest = rest_pose(&topo, &frame);
        assert!(rest.position(RigTopology::ROOT).length() < 1e-5);
    }

    #[test]
    fn test_empty_frame_all_zero() {
        let topo = pose_topology();
        let pose = resolve_positions(&topo, &Frame::new(0.0));
        for p in &pose.positions {
            assert_eq!(*p, Vec3::ZERO);
        }
    }
}
