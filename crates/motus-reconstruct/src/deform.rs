//! Template deformation
//!
//! Warps a template clip with scalar transforms derived from meaning
//! parameters. Spatial transforms act per frame about a root reference
//! point so the figure stays centered; tempo warping rescales the time
//! axis before a fixed-rate resample.

use tracing::debug;

use motus_core::{CoordinateSpace, MeaningParams, MotionClip, Vec3};

/// Output frame rate of reconstructed clips
pub const OUTPUT_FPS: f32 = 30.0;

/// Derived scalar transforms, returned alongside the clip for traceability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Playback-rate factor, output duration = input duration / factor
    pub tempo_factor: f32,
    /// Scale applied to each joint's offset from the root
    pub intensity_factor: f32,
    /// Planar rotation about the root, radians
    pub rotation_angle: f32,
    /// Whole-figure translation
    pub shift: Vec3,
}

impl TransformParams {
    /// Transforms that leave the template geometry untouched.
    pub fn neutral() -> Self {
        Self {
            tempo_factor: 1.0,
            intensity_factor: 1.0,
            rotation_angle: 0.0,
            shift: Vec3::ZERO,
        }
    }

    /// Map meaning parameters onto concrete transform scalars.
    pub fn from_meaning(params: &MeaningParams) -> Self {
        let intensity = params.intensity.clamp(0.0, 1.0);
        let tempo = params.tempo.clamp(0.0, 1.0);
        Self {
            tempo_factor: 0.6 + 0.8 * tempo,
            intensity_factor: 0.7 + 0.65 * intensity,
            rotation_angle: params.direction.x.clamp(-1.0, 1.0) * 0.25,
            shift: Vec3::new(
                params.direction.x.clamp(-0.2, 0.2) * 0.08,
                params.direction.y.clamp(-0.2, 0.2) * 0.08,
                0.0,
            ),
        }
    }
}

/// Per-frame root reference point. Falls back through the torso and then
/// any joint at all before settling on the frame center.
fn frame_root(clip: &MotionClip, frame_idx: usize) -> Vec3 {
    let frame = &clip.frames[frame_idx];
    if let Some(p) = frame.hip_midpoint() {
        return p;
    }
    if let Some(p) = frame.shoulder_midpoint() {
        return p;
    }
    if let Some(point) = frame.joints.values().next() {
        return point.position();
    }
    match clip.coordinate_space {
        CoordinateSpace::Normalized | CoordinateSpace::Pixels => Vec3::new(0.5, 0.5, 0.0),
        CoordinateSpace::World => Vec3::ZERO,
    }
}

fn rotate_planar(offset: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
        offset.z,
    )
}

/// Reconstruct a clip from a template and meaning parameters.
pub fn reconstruct(
    template: &MotionClip,
    params: &MeaningParams,
) -> (MotionClip, TransformParams) {
    let transform = TransformParams::from_meaning(params);
    (reconstruct_with(template, &transform), transform)
}

/// Apply explicit transforms to a template. Deterministic for fixed input.
pub fn reconstruct_with(template: &MotionClip, transform: &TransformParams) -> MotionClip {
    let mut out = template.clone();

    for idx in 0..out.frames.len() {
        let root = frame_root(&out, idx);
        let frame = &mut out.frames[idx];
        for point in frame.joints.values_mut() {
            let offset = point.position() - root;
            let scaled = offset * transform.intensity_factor;
            let rotated = rotate_planar(scaled, transform.rotation_angle);
            let p = root + rotated + transform.shift;
            point.x = p.x;
            point.y = p.y;
            if point.z.is_some() {
                point.z = Some(p.z);
            }
        }
    }

    // Tempo warp, then resample back onto an even grid
    let t0 = out.frames.first().map(|f| f.t).unwrap_or(0.0);
    let rate = f64::from(transform.tempo_factor.max(1e-3));
    for frame in &mut out.frames {
        frame.t = (frame.t - t0) / rate;
    }
    let out = out.resample(OUTPUT_FPS);

    debug!(
        tempo_factor = transform.tempo_factor,
        intensity_factor = transform.intensity_factor,
        rotation_angle = transform.rotation_angle,
        frames = out.frames.len(),
        "reconstructed template"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::{Frame, JointKey, JointSet, LandmarkPoint, PoseLandmark};
    use std::collections::BTreeMap;

    fn point(x: f32, y: f32) -> LandmarkPoint {
        LandmarkPoint::new(x, y)
    }

    fn template() -> MotionClip {
        let mut clip = MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized);
        for i in 0..15 {
            let t = i as f64 / 30.0;
            let sway = 0.05 * (i as f32 / 14.0);
            let mut joints = BTreeMap::new();
            joints.insert(
                JointKey::Pose(PoseLandmark::LeftHip),
                point(0.55, 0.6),
            );
            joints.insert(
                JointKey::Pose(PoseLandmark::RightHip),
                point(0.45, 0.6),
            );
            joints.insert(
                JointKey::Pose(PoseLandmark::LeftWrist),
                point(0.7 + sway, 0.4),
            );
            let mut frame = Frame::new(t);
            frame.joints = joints;
            clip.frames.push(frame);
        }
        clip
    }

    fn wrist(clip: &MotionClip, idx: usize) -> Vec3 {
        clip.frames[idx]
            .joint(JointKey::Pose(PoseLandmark::LeftWrist))
            .expect("wrist present")
    }

    #[test]
    fn test_neutral_transform_is_identity() {
        let template = template();
        let reference = template.resample(OUTPUT_FPS);
        let out = reconstruct_with(&template, &TransformParams::neutral());
        assert_eq!(out.frames.len(), reference.frames.len());
        for (a, b) in out.frames.iter().zip(reference.frames.iter()) {
            assert!((a.t - b.t).abs() < 1e-9);
            for (key, pa) in &a.joints {
                let pb = &b.joints[key];
                assert!((pa.x - pb.x).abs() < 1e-5);
                assert!((pa.y - pb.y).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_intensity_scales_offset_from_root() {
        let template = template();
        let mut low = TransformParams::neutral();
        low.intensity_factor = 1.0;
        let mut high = TransformParams::neutral();
        high.intensity_factor = 1.35;

        let base = reconstruct_with(&template, &low);
        let loud = reconstruct_with(&template, &high);
        let root = Vec3::new(0.5, 0.6, 0.0);
        let d_base = (wrist(&base, 0) - root).length();
        let d_loud = (wrist(&loud, 0) - root).length();
        assert!(d_loud > d_base);
        assert!((d_loud / d_base - 1.35).abs() < 1e-3);
    }

    #[test]
    fn test_tempo_divides_duration() {
        let template = template();
        let mut fast = TransformParams::neutral();
        fast.tempo_factor = 1.4;
        let out = reconstruct_with(&template, &fast);
        let expected = template.duration() / 1.4;
        assert!((out.duration() - expected).abs() < 2.0 / f64::from(OUTPUT_FPS));
    }

    #[test]
    fn test_shift_translates_whole_figure() {
        let template = template();
        let mut shifted = TransformParams::neutral();
        shifted.shift = Vec3::new(0.016, -0.016, 0.0);
        let out = reconstruct_with(&template, &shifted);
        let moved = wrist(&out, 0) - wrist(&template.resample(OUTPUT_FPS), 0);
        assert!((moved.x - 0.016).abs() < 1e-5);
        assert!((moved.y + 0.016).abs() < 1e-5);
    }

    #[test]
    fn test_from_meaning_ranges() {
        let mut params = MeaningParams::default();
        params.intensity = 1.0;
        params.tempo = 1.0;
        params.direction = Vec3::new(2.0, -1.0, 0.0);
        let t = TransformParams::from_meaning(&params);
        assert!((t.intensity_factor - 1.35).abs() < 1e-6);
        assert!((t.tempo_factor - 1.4).abs() < 1e-6);
        assert!((t.rotation_angle - 0.25).abs() < 1e-6);
        assert!((t.shift.x - 0.016).abs() < 1e-6);
        assert!((t.shift.y + 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reconstruction_is_deterministic() {
        let template = template();
        let params = MeaningParams {
            direction: Vec3::new(0.3, 0.1, 0.0),
            intensity: 0.8,
            tempo: 0.4,
            politeness: 0.7,
        };
        let (a, ta) = reconstruct(&template, &params);
        let (b, tb) = reconstruct(&template, &params);
        assert_eq!(ta, tb);
        assert_eq!(a, b);
    }
}
