//! Conform pass - canonical coordinate space and frame rate
//!
//! Raw capture is irregular: camera frame rate jitters and subject scale
//! varies with camera distance. The conform pass rewrites a clip into a
//! centered, y-up, right-handed space calibrated so the median shoulder
//! width equals a fixed real-world length, then resamples to an even frame
//! rate. Downstream rotation math assumes a conformed clip.

use tracing::{debug, warn};

use motus_core::{CoordinateSpace, LandmarkPoint, MotionClip, PoseLandmark, Vec3, EPSILON};

/// Output frame rate of conformed clips
pub const TARGET_FPS: f32 = 30.0;

/// Calibrated shoulder width in centimeters
pub const SHOULDER_WIDTH_CM: f32 = 38.0;

/// Normalized image-space point to centered, y-up, right-handed 3D
pub fn image_to_world(p: Vec3, scale: f32) -> Vec3 {
    Vec3::new((p.x - 0.5) * scale, (0.5 - p.y) * scale, -p.z * scale)
}

fn median(mut values: Vec<f32>) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(values[values.len() / 2])
}

/// Conform a clip: axis transform (for image-space clips), isotropic scale
/// calibration, hip-midpoint centering, fixed-rate resampling.
pub fn conform(clip: &MotionClip, target_fps: f32, shoulder_width_cm: f32) -> MotionClip {
    if clip.is_empty() {
        let mut out = clip.clone();
        out.coordinate_space = CoordinateSpace::World;
        out.fps = Some(target_fps);
        return out;
    }

    let image_space = matches!(
        clip.coordinate_space,
        CoordinateSpace::Normalized | CoordinateSpace::Pixels
    );
    let axis_map = |p: Vec3| -> Vec3 {
        if image_space {
            image_to_world(p, 1.0)
        } else {
            p
        }
    };

    // Isotropic scale from the median shoulder width across the clip
    let widths: Vec<f32> = clip
        .frames
        .iter()
        .filter_map(|f| {
            let ls = axis_map(f.pose_joint(PoseLandmark::LeftShoulder)?);
            let rs = axis_map(f.pose_joint(PoseLandmark::RightShoulder)?);
            let w = ls.distance(&rs);
            (w > EPSILON).then_some(w)
        })
        .collect();
    let scale = match median(widths) {
        Some(w) => shoulder_width_cm / w,
        None => {
            warn!("no shoulder pair found; skipping scale calibration");
            1.0
        }
    };

    // Center on the first frame's hip midpoint (shoulder midpoint as
    // fallback for torso-less captures)
    let first = &clip.frames[0];
    let origin = first
        .hip_midpoint()
        .or_else(|| first.shoulder_midpoint())
        .map(axis_map)
        .unwrap_or(Vec3::ZERO)
        .scale(scale);
    if origin == Vec3::ZERO {
        warn!("no root landmarks in first frame; clip stays un-centered");
    }

    let frames = clip
        .frames
        .iter()
        .map(|f| {
            let mut out = f.clone();
            for point in out.joints.values_mut() {
                let p = axis_map(point.position()).scale(scale) - origin;
                *point = LandmarkPoint {
                    visibility: point.visibility,
                    confidence: point.confidence,
                    ..LandmarkPoint::from_vec(p)
                };
            }
            out
        })
        .collect();

    let mut out = clip.clone();
    out.frames = frames;
    out.coordinate_space = CoordinateSpace::World;
    out.meta
        .insert("conform.scale".to_string(), format!("{scale}"));
    let out = out.resample(target_fps);
    debug!(
        scale,
        frames = out.len(),
        fps = target_fps,
        "conformed clip"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::{Frame, JointKey, JointSet, PoseLandmark};

    fn body_frame(t: f64, offset_x: f32) -> Frame {
        let mut f = Frame::new(t);
        let mut put = |lm: PoseLandmark, x: f32, y: f32| {
            f.joints
                .insert(JointKey::Pose(lm), LandmarkPoint::new(x + offset_x, y));
        };
        put(PoseLandmark::LeftShoulder, 0.4, 0.3);
        put(PoseLandmark::RightShoulder, 0.6, 0.3);
        put(PoseLandmark::LeftHip, 0.45, 0.6);
        put(PoseLandmark::RightHip, 0.55, 0.6);
        f
    }

    fn clip(frames: Vec<Frame>) -> MotionClip {
        MotionClip::new(JointSet::Pose, CoordinateSpace::Normalized).with_frames(frames)
    }

    #[test]
    fn test_image_to_world_axes() {
        // image center maps to origin; +y image (down) maps to -y world
        let p = image_to_world(Vec3::new(0.5, 0.5, 0.0), 10.0);
        assert!(p.length() < 1e-6);
        let below = image_to_world(Vec3::new(0.5, 0.9, 0.0), 10.0);
        assert!(below.y < 0.0);
        let deep = image_to_world(Vec3::new(0.5, 0.5, 0.3), 10.0);
        assert!(deep.z < 0.0);
    }

    #[test]
    fn test_conform_centers_first_hip_midpoint() {
        let out = conform(&clip(vec![body_frame(0.0, 0.0)]), 30.0, 38.0);
        let root = out.frames[0].hip_midpoint().expect("hips");
        assert!(root.length() < 1e-4);
    }

    #[test]
    fn test_conform_calibrates_shoulder_width() {
        let out = conform(
            &clip(vec![body_frame(0.0, 0.0), body_frame(1.0, 0.05)]),
            30.0,
            38.0,
        );
        let ls = out.frames[0]
            .pose_joint(PoseLandmark::LeftShoulder)
            .expect("left shoulder");
        let rs = out.frames[0]
            .pose_joint(PoseLandmark::RightShoulder)
            .expect("right shoulder");
        assert!((ls.distance(&rs) - 38.0).abs() < 1e-3);
    }

    #[test]
    fn test_conform_resamples_to_target_fps() {
        let frames = vec![
            body_frame(0.0, 0.0),
            body_frame(0.37, 0.01),
            body_frame(1.0, 0.02),
        ];
        let out = conform(&clip(frames), 30.0, 38.0);
        assert_eq!(out.fps, Some(30.0));
        assert_eq!(out.len(), 31);
    }

    #[test]
    fn test_conform_without_shoulders_keeps_scale() {
        let mut f = Frame::new(0.0);
        f.joints.insert(
            JointKey::Pose(PoseLandmark::Nose),
            LandmarkPoint::new(0.5, 0.2),
        );
        let out = conform(&clip(vec![f]), 30.0, 38.0);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out.meta.get("conform.scale").map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn test_world_clip_skips_axis_transform() {
        let mut c = clip(vec![body_frame(0.0, 0.0)]);
        c.coordinate_space = CoordinateSpace::World;
        let out = conform(&c, 30.0, 38.0);
        // still centered and calibrated, but y is not flipped
        let ls = out.frames[0]
            .pose_joint(PoseLandmark::LeftShoulder)
            .expect("left shoulder");
        assert!(ls.y < 0.0, "world-space y stays as captured");
    }
}
