//! Rig-node graph used for encoding
//!
//! The rig extends the raw landmark sets with synthetic torso nodes (spine,
//! chest, neck, head) because the landmark sources provide no direct torso
//! skeleton. Topologies are immutable values from pure builders: nodes are
//! stored in depth-first order (every parent precedes its children), so the
//! Vec order doubles as both the rotation-solve traversal order and the
//! artifact declaration order.

use std::sync::OnceLock;

use motus_core::{Hand, HandLandmark, JointKey, JointSet, PoseLandmark};

/// How a rig node's per-frame 3D position is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSource {
    /// Direct landmark lookup
    Landmark(JointKey),
    /// Midpoint of a landmark pair
    Midpoint(JointKey, JointKey),
    /// Midpoint of two other rig nodes; operands must themselves be
    /// landmark-sourced so they resolve in the first pass
    NodeMidpoint(usize, usize),
}

/// Local-rotation method for a rig node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStrategy {
    /// Minimal rotation mapping the rest main-child direction onto the
    /// current one; under-constrains twist about the bone axis
    SingleVector,
    /// Two-vector basis method: primary axis plus a pole axis between two
    /// rig nodes, compared via Gram-Schmidt bases. Falls back to
    /// single-vector when the pole is degenerate.
    TwoVector { pole_from: usize, pole_to: usize },
}

/// A named bone in the rig
#[derive(Debug, Clone)]
pub struct RigNode {
    pub name: &'static str,
    pub parent: Option<usize>,
    pub main_child: Option<usize>,
    pub children: Vec<usize>,
    pub source: PositionSource,
    pub strategy: RotationStrategy,
}

/// Immutable rig topology, nodes in depth-first order
#[derive(Debug, Clone)]
pub struct RigTopology {
    nodes: Vec<RigNode>,
}

impl RigTopology {
    pub const ROOT: usize = 0;

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &RigNode {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[RigNode] {
        &self.nodes
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }
}

#[derive(Default)]
struct Builder {
    nodes: Vec<RigNode>,
}

impl Builder {
    fn add(&mut self, name: &'static str, parent: Option<usize>, source: PositionSource) -> usize {
        let idx = self.nodes.len();
        if let Some(p) = parent {
            self.nodes[p].children.push(idx);
        }
        self.nodes.push(RigNode {
            name,
            parent,
            main_child: None,
            children: Vec::new(),
            source,
            strategy: RotationStrategy::SingleVector,
        });
        idx
    }

    fn chain(&mut self, from: usize, to: usize) {
        self.nodes[from].main_child = Some(to);
    }
}

const LEFT_HAND_NODE_NAMES: [[&str; 4]; 5] = [
    ["LeftHandThumb1", "LeftHandThumb2", "LeftHandThumb3", "LeftHandThumb4"],
    ["LeftHandIndex1", "LeftHandIndex2", "LeftHandIndex3", "LeftHandIndex4"],
    ["LeftHandMiddle1", "LeftHandMiddle2", "LeftHandMiddle3", "LeftHandMiddle4"],
    ["LeftHandRing1", "LeftHandRing2", "LeftHandRing3", "LeftHandRing4"],
    ["LeftHandPinky1", "LeftHandPinky2", "LeftHandPinky3", "LeftHandPinky4"],
];

const RIGHT_HAND_NODE_NAMES: [[&str; 4]; 5] = [
    ["RightHandThumb1", "RightHandThumb2", "RightHandThumb3", "RightHandThumb4"],
    ["RightHandIndex1", "RightHandIndex2", "RightHandIndex3", "RightHandIndex4"],
    ["RightHandMiddle1", "RightHandMiddle2", "RightHandMiddle3", "RightHandMiddle4"],
    ["RightHandRing1", "RightHandRing2", "RightHandRing3", "RightHandRing4"],
    ["RightHandPinky1", "RightHandPinky2", "RightHandPinky3", "RightHandPinky4"],
];

/// Add the five finger chains under a wrist node.
///
/// Returns the middle-finger base index so the wrist can point at it.
fn add_hand(b: &mut Builder, wrist: usize, hand: Hand) -> usize {
    let names = match hand {
        Hand::Left => &LEFT_HAND_NODE_NAMES,
        Hand::Right => &RIGHT_HAND_NODE_NAMES,
    };
    let mut middle_base = wrist;
    for (f, finger) in HandLandmark::FINGERS.iter().enumerate() {
        let mut prev = wrist;
        for (j, lm) in finger.iter().enumerate() {
            let idx = b.add(
                names[f][j],
                Some(prev),
                PositionSource::Landmark(JointKey::Hand(hand, *lm)),
            );
            if prev != wrist {
                b.chain(prev, idx);
            }
            prev = idx;
        }
        if finger[0] == HandLandmark::MiddleMcp {
            middle_base = prev - 3;
        }
    }
    middle_base
}

fn build_topology(with_hands: bool) -> RigTopology {
    use PoseLandmark::*;

    let pose = JointKey::Pose;
    let mut b = Builder::default();

    let hips = b.add(
        "Hips",
        None,
        PositionSource::Midpoint(pose(LeftHip), pose(RightHip)),
    );
    // Spine and Neck midpoints are patched once their operands exist
    let spine = b.add("Spine", Some(hips), PositionSource::NodeMidpoint(0, 0));
    let chest = b.add(
        "Chest",
        Some(spine),
        PositionSource::Midpoint(pose(LeftShoulder), pose(RightShoulder)),
    );
    let neck = b.add("Neck", Some(chest), PositionSource::NodeMidpoint(0, 0));
    let head = b.add("Head", Some(neck), PositionSource::Landmark(pose(Nose)));
    b.nodes[spine].source = PositionSource::NodeMidpoint(hips, chest);
    b.nodes[neck].source = PositionSource::NodeMidpoint(chest, head);

    b.chain(hips, spine);
    b.chain(spine, chest);
    b.chain(chest, neck);
    b.chain(neck, head);

    let l_shoulder = b.add(
        "LeftShoulder",
        Some(chest),
        PositionSource::Landmark(pose(LeftShoulder)),
    );
    let l_elbow = b.add(
        "LeftElbow",
        Some(l_shoulder),
        PositionSource::Landmark(pose(LeftElbow)),
    );
    let l_wrist = b.add(
        "LeftWrist",
        Some(l_elbow),
        PositionSource::Landmark(pose(LeftWrist)),
    );
    b.chain(l_shoulder, l_elbow);
    b.chain(l_elbow, l_wrist);
    if with_hands {
        let middle = add_hand(&mut b, l_wrist, Hand::Left);
        b.chain(l_wrist, middle);
    }

    let r_shoulder = b.add(
        "RightShoulder",
        Some(chest),
        PositionSource::Landmark(pose(RightShoulder)),
    );
    let r_elbow = b.add(
        "RightElbow",
        Some(r_shoulder),
        PositionSource::Landmark(pose(RightElbow)),
    );
    let r_wrist = b.add(
        "RightWrist",
        Some(r_elbow),
        PositionSource::Landmark(pose(RightWrist)),
    );
    b.chain(r_shoulder, r_elbow);
    b.chain(r_elbow, r_wrist);
    if with_hands {
        let middle = add_hand(&mut b, r_wrist, Hand::Right);
        b.chain(r_wrist, middle);
    }

    let l_upleg = b.add(
        "LeftUpLeg",
        Some(hips),
        PositionSource::Landmark(pose(LeftHip)),
    );
    let l_leg = b.add(
        "LeftLeg",
        Some(l_upleg),
        PositionSource::Landmark(pose(LeftKnee)),
    );
    let l_foot = b.add(
        "LeftFoot",
        Some(l_leg),
        PositionSource::Landmark(pose(LeftAnkle)),
    );
    b.chain(l_upleg, l_leg);
    b.chain(l_leg, l_foot);

    let r_upleg = b.add(
        "RightUpLeg",
        Some(hips),
        PositionSource::Landmark(pose(RightHip)),
    );
    let r_leg = b.add(
        "RightLeg",
        Some(r_upleg),
        PositionSource::Landmark(pose(RightKnee)),
    );
    let r_foot = b.add(
        "RightFoot",
        Some(r_leg),
        PositionSource::Landmark(pose(RightAnkle)),
    );
    b.chain(r_upleg, r_leg);
    b.chain(r_leg, r_foot);

    // Two-vector stabilization: shoulder line for the torso chain, torso
    // axis for the shoulders
    let shoulder_line = RotationStrategy::TwoVector {
        pole_from: r_shoulder,
        pole_to: l_shoulder,
    };
    b.nodes[spine].strategy = shoulder_line;
    b.nodes[chest].strategy = shoulder_line;
    b.nodes[neck].strategy = shoulder_line;
    let torso_axis = RotationStrategy::TwoVector {
        pole_from: hips,
        pole_to: chest,
    };
    b.nodes[l_shoulder].strategy = torso_axis;
    b.nodes[r_shoulder].strategy = torso_axis;

    RigTopology { nodes: b.nodes }
}

/// Rig for the pose-only joint set
pub fn pose_topology() -> RigTopology {
    build_topology(false)
}

/// Rig for the pose + hands joint set
pub fn full_topology() -> RigTopology {
    build_topology(true)
}

/// Shared read-only topology for a joint set, built on first use
pub fn topology_for(joint_set: JointSet) -> &'static RigTopology {
    static POSE: OnceLock<RigTopology> = OnceLock::new();
    static FULL: OnceLock<RigTopology> = OnceLock::new();

    match joint_set {
        JointSet::Pose => POSE.get_or_init(pose_topology),
        JointSet::PoseHands => FULL.get_or_init(full_topology),
    }
}
