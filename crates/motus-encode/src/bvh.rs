//! BVH artifact writer
//!
//! Serializes the rig hierarchy and per-frame channel values as BVH text.
//! Channel count and ordering in the MOTION block exactly match the
//! depth-first hierarchy declaration: 6 channels at the root (translation
//! then rotation), 3 rotation channels elsewhere, rotation order Z X Y.
//! Importers depend on this layout; it must not change silently.

use std::fmt::Write as _;

use motus_core::Vec3;
use motus_rig::RigTopology;

use crate::euler::quat_to_euler_zxy;
use crate::rigpose::RestPose;
use crate::solve::FramePose;

/// Encoded animation artifact
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationArtifact {
    /// BVH document text
    pub text: String,
    pub frame_count: usize,
    /// Seconds per output frame
    pub frame_time: f64,
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn write_offset(out: &mut String, indent: usize, offset: Vec3) {
    let pad = "  ".repeat(indent);
    let _ = writeln!(
        out,
        "{}OFFSET {:.6} {:.6} {:.6}",
        pad,
        finite_or_zero(offset.x),
        finite_or_zero(offset.y),
        finite_or_zero(offset.z)
    );
}

fn write_node(out: &mut String, topology: &RigTopology, rest: &RestPose, idx: usize, indent: usize) {
    let node = topology.node(idx);
    let pad = "  ".repeat(indent);

    if idx == RigTopology::ROOT {
        let _ = writeln!(out, "{pad}ROOT {}", node.name);
    } else {
        let _ = writeln!(out, "{pad}JOINT {}", node.name);
    }
    let _ = writeln!(out, "{pad}{{");

    let offset = match node.parent {
        Some(p) => rest.position(idx) - rest.position(p),
        None => Vec3::ZERO,
    };
    write_offset(out, indent + 1, offset);

    if idx == RigTopology::ROOT {
        let _ = writeln!(
            out,
            "{pad}  CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation"
        );
    } else {
        let _ = writeln!(out, "{pad}  CHANNELS 3 Zrotation Xrotation Yrotation");
    }

    if node.children.is_empty() {
        let _ = writeln!(out, "{pad}  End Site");
        let _ = writeln!(out, "{pad}  {{");
        write_offset(out, indent + 2, Vec3::ZERO);
        let _ = writeln!(out, "{pad}  }}");
    } else {
        for &child in &node.children {
            write_node(out, topology, rest, child, indent + 1);
        }
    }

    let _ = writeln!(out, "{pad}}}");
}

/// Channel values for one frame, in hierarchy declaration order
fn frame_values(topology: &RigTopology, frame: &FramePose, values: &mut Vec<f32>, idx: usize) {
    if idx == RigTopology::ROOT {
        let t = frame.root_translation;
        values.extend_from_slice(&[
            finite_or_zero(t.x),
            finite_or_zero(t.y),
            finite_or_zero(t.z),
            0.0,
            0.0,
            0.0,
        ]);
    } else {
        let e = quat_to_euler_zxy(&frame.locals[idx]);
        values.extend_from_slice(&[
            finite_or_zero(e.z),
            finite_or_zero(e.x),
            finite_or_zero(e.y),
        ]);
    }
    for &child in &topology.node(idx).children {
        frame_values(topology, frame, values, child);
    }
}

/// Render hierarchy plus solved frames as a BVH document.
pub fn render_bvh(
    topology: &RigTopology,
    rest: &RestPose,
    frames: &[FramePose],
    frame_time: f64,
) -> AnimationArtifact {
    let mut text = String::new();
    text.push_str("HIERARCHY\n");
    write_node(&mut text, topology, rest, RigTopology::ROOT, 0);

    text.push_str("MOTION\n");
    let _ = writeln!(text, "Frames: {}", frames.len());
    let _ = writeln!(text, "Frame Time: {frame_time:.6}");

    for frame in frames {
        let mut values = Vec::with_capacity(6 + (topology.len() - 1) * 3);
        frame_values(topology, frame, &mut values, RigTopology::ROOT);
        let line: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
        let _ = writeln!(text, "{}", line.join(" "));
    }

    AnimationArtifact {
        text,
        frame_count: frames.len(),
        frame_time,
    }
}
