//! Per-joint local rotation solve
//!
//! Walks the topology in traversal order (parent before child) and aligns
//! each joint's rest main-child direction with the current one, expressed
//! in the parent's local frame. Torso and shoulder joints use the
//! two-vector basis method: a single direction vector under-constrains
//! rotation about its own axis, so a pole axis is tracked as well and the
//! rotation is extracted from the pair of Gram-Schmidt bases.
//!
//! Root rotation stays at the identity; only root translation is emitted.

use tracing::trace;

use motus_core::{orthonormal_basis, Quat, Vec3};
use motus_rig::{RigTopology, RotationStrategy};

use crate::rigpose::{RestPose, RigPose};

/// Solved rotations and root translation for one frame
#[derive(Debug, Clone)]
pub struct FramePose {
    pub root_translation: Vec3,
    /// Local rotations indexed by topology order; identity at the root
    pub locals: Vec<Quat>,
}

/// Two-vector rotation between rest and current bases; `None` when either
/// basis is degenerate
fn basis_rotation(
    rest_primary: Vec3,
    rest_pole: Vec3,
    cur_primary: Vec3,
    cur_pole: Vec3,
) -> Option<Quat> {
    let rest = orthonormal_basis(&rest_primary, &rest_pole)?;
    let cur = orthonormal_basis(&cur_primary, &cur_pole)?;
    Some(cur.mul(&rest.transpose()).to_quat())
}

/// Solve all local rotations for one frame against the rest pose.
pub fn solve_frame(topology: &RigTopology, rest: &RestPose, pose: &RigPose) -> FramePose {
    let n = topology.len();
    let mut locals = vec![Quat::IDENTITY; n];
    let mut globals = vec![Quat::IDENTITY; n];

    let root_translation =
        pose.position(RigTopology::ROOT) - rest.position(RigTopology::ROOT);

    for (idx, node) in topology.nodes().iter().enumerate() {
        let Some(parent) = node.parent else { continue };
        let Some(child) = node.main_child else {
            // chain tip: identity local, inherit parent's global
            globals[idx] = globals[parent];
            continue;
        };

        let parent_inv = globals[parent].inverse();
        let rest_dir = rest.position(child) - rest.position(idx);
        let cur_dir = parent_inv.rotate(&(pose.position(child) - pose.position(idx)));

        let local = match node.strategy {
            RotationStrategy::TwoVector { pole_from, pole_to } => {
                let rest_pole = rest.position(pole_to) - rest.position(pole_from);
                let cur_pole =
                    parent_inv.rotate(&(pose.position(pole_to) - pose.position(pole_from)));
                match basis_rotation(rest_dir, rest_pole, cur_dir, cur_pole) {
                    Some(q) => q,
                    None => {
                        trace!(node = node.name, "degenerate pole axis, single-vector fallback");
                        Quat::rotation_between(&rest_dir, &cur_dir)
                    }
                }
            }
            RotationStrategy::SingleVector => Quat::rotation_between(&rest_dir, &cur_dir),
        };

        locals[idx] = local;
        globals[idx] = globals[parent].mul(&local).normalize();
    }

    FramePose {
        root_translation,
        locals,
    }
}
