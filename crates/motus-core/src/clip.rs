//! Motion clips - timestamped landmark frames
//!
//! A clip is an immutable value once constructed: slicing, resampling and
//! reconstruction all return new clips.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MotusError, MotusResult};
use crate::joint::{JointKey, PoseLandmark};
use crate::math::Vec3;

/// Schema version stamped on clips
pub const CLIP_SCHEMA_VERSION: &str = "0.1.0";

/// Declared coordinate space of a clip's landmark positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// x, y in the unit square, y down, z relative depth
    Normalized,
    /// Raw pixel coordinates
    Pixels,
    /// Centered, y-up, right-handed, calibrated length units
    World,
}

/// Supported landmark joint sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointSet {
    /// Pose landmarks only (33 points)
    Pose,
    /// Pose landmarks plus two 21-point hand chains
    PoseHands,
}

impl JointSet {
    pub fn id(self) -> &'static str {
        match self {
            JointSet::Pose => "pose",
            JointSet::PoseHands => "pose_hands",
        }
    }

    pub fn from_id(id: &str) -> MotusResult<Self> {
        match id {
            "pose" => Ok(JointSet::Pose),
            "pose_hands" => Ok(JointSet::PoseHands),
            other => Err(MotusError::UnknownJointSet(other.to_string())),
        }
    }
}

/// One detected landmark position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
            confidence: None,
        }
    }

    pub fn with_z(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            visibility: None,
            confidence: None,
        }
    }

    pub fn from_vec(v: Vec3) -> Self {
        Self::with_z(v.x, v.y, v.z)
    }

    /// 3D position; missing z is treated as zero depth
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z.unwrap_or(0.0))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.map_or(true, f32::is_finite)
    }

    /// One-sided values carry over unchanged rather than fading toward a
    /// made-up zero
    fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
        match (a, b) {
            (Some(av), Some(bv)) => Some(av + (bv - av) * t),
            (Some(av), None) => Some(av),
            (None, b) => b,
        }
    }

    pub fn lerp(&self, other: &LandmarkPoint, t: f32) -> LandmarkPoint {
        LandmarkPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: Self::lerp_opt(self.z, other.z, t),
            visibility: Self::lerp_opt(self.visibility, other.visibility, t),
            confidence: Self::lerp_opt(self.confidence, other.confidence, t),
        }
    }
}

/// One captured frame: seconds since clip start plus a joint map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub t: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_confidence: Option<f32>,
    pub joints: BTreeMap<JointKey, LandmarkPoint>,
}

impl Frame {
    pub fn new(t: f64) -> Self {
        Self {
            t,
            overall_confidence: None,
            joints: BTreeMap::new(),
        }
    }

    /// Finite position of a joint, if present
    pub fn joint(&self, key: JointKey) -> Option<Vec3> {
        self.joints
            .get(&key)
            .filter(|p| p.is_finite())
            .map(LandmarkPoint::position)
    }

    pub fn pose_joint(&self, lm: PoseLandmark) -> Option<Vec3> {
        self.joint(JointKey::Pose(lm))
    }

    /// Midpoint of a landmark pair, if both are present
    pub fn pose_midpoint(&self, a: PoseLandmark, b: PoseLandmark) -> Option<Vec3> {
        Some(self.pose_joint(a)?.midpoint(&self.pose_joint(b)?))
    }

    pub fn hip_midpoint(&self) -> Option<Vec3> {
        self.pose_midpoint(PoseLandmark::LeftHip, PoseLandmark::RightHip)
    }

    pub fn shoulder_midpoint(&self) -> Option<Vec3> {
        self.pose_midpoint(PoseLandmark::LeftShoulder, PoseLandmark::RightShoulder)
    }
}

/// A recorded landmark time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionClip {
    pub schema_version: String,
    pub joint_set: JointSet,
    pub coordinate_space: CoordinateSpace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    pub frames: Vec<Frame>,
}

impl MotionClip {
    pub fn new(joint_set: JointSet, coordinate_space: CoordinateSpace) -> Self {
        Self {
            schema_version: CLIP_SCHEMA_VERSION.to_string(),
            joint_set,
            coordinate_space,
            fps: None,
            meta: BTreeMap::new(),
            frames: Vec::new(),
        }
    }

    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Seconds from first to last frame
    pub fn duration(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => (last.t - first.t).max(0.0),
            _ => 0.0,
        }
    }

    /// Extract the frames inside `[start, end]`, re-based so the first
    /// retained frame is at t = 0.
    ///
    /// When no frame falls inside the window, the frames nearest the two
    /// boundaries are kept instead (deduplicated), so a non-empty input
    /// always yields a non-empty slice. The original window is recorded in
    /// clip metadata.
    pub fn slice(&self, start: f64, end: f64) -> MotusResult<MotionClip> {
        if end < start {
            return Err(MotusError::InvalidWindow { start, end });
        }

        let mut indices: Vec<usize> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.t >= start && f.t <= end)
            .map(|(i, _)| i)
            .collect();

        if indices.is_empty() && !self.frames.is_empty() {
            let nearest = |target: f64| -> usize {
                let mut best = 0;
                let mut best_dist = f64::INFINITY;
                for (i, f) in self.frames.iter().enumerate() {
                    let d = (f.t - target).abs();
                    if d < best_dist {
                        best_dist = d;
                        best = i;
                    }
                }
                best
            };
            indices.push(nearest(start));
            let at_end = nearest(end);
            if at_end != indices[0] {
                indices.push(at_end);
            }
            indices.sort_unstable();
        }

        let t0 = indices.first().map(|&i| self.frames[i].t).unwrap_or(0.0);
        let frames: Vec<Frame> = indices
            .into_iter()
            .map(|i| {
                let mut f = self.frames[i].clone();
                f.t -= t0;
                f
            })
            .collect();

        let mut out = self.clone();
        out.frames = frames;
        out.meta
            .insert("slice.start".to_string(), format!("{start}"));
        out.meta.insert("slice.end".to_string(), format!("{end}"));
        Ok(out)
    }

    /// Resample to an even frame spacing at `fps`, covering the original
    /// duration, with joint positions linearly interpolated between the two
    /// bracketing frames.
    pub fn resample(&self, fps: f32) -> MotionClip {
        if self.frames.is_empty() || fps <= 0.0 {
            return self.clone();
        }

        let t_start = self.frames[0].t;
        let duration = self.duration();
        let step = 1.0 / fps as f64;
        let count = (duration * fps as f64).floor() as usize + 1;

        let mut frames = Vec::with_capacity(count);
        let mut cursor = 0usize;
        for k in 0..count {
            let t = t_start + k as f64 * step;
            // advance to the last frame at or before t
            while cursor + 1 < self.frames.len() && self.frames[cursor + 1].t <= t {
                cursor += 1;
            }
            let prev = &self.frames[cursor];
            let next = if cursor + 1 < self.frames.len() {
                &self.frames[cursor + 1]
            } else {
                prev
            };

            let mut frame = if next.t <= prev.t || t <= prev.t {
                prev.clone()
            } else {
                let alpha = (((t - prev.t) / (next.t - prev.t)).clamp(0.0, 1.0)) as f32;
                Self::lerp_frames(prev, next, alpha)
            };
            frame.t = k as f64 * step;
            frames.push(frame);
        }

        let mut out = self.clone();
        out.frames = frames;
        out.fps = Some(fps);
        out
    }

    /// Joints present in both frames are interpolated; joints present in
    /// only one are carried over unchanged.
    fn lerp_frames(a: &Frame, b: &Frame, alpha: f32) -> Frame {
        let mut joints = BTreeMap::new();
        for (key, pa) in &a.joints {
            match b.joints.get(key) {
                Some(pb) => {
                    joints.insert(*key, pa.lerp(pb, alpha));
                }
                None => {
                    joints.insert(*key, *pa);
                }
            }
        }
        for (key, pb) in &b.joints {
            joints.entry(*key).or_insert(*pb);
        }

        Frame {
            t: a.t + (b.t - a.t) * alpha as f64,
            overall_confidence: LandmarkPoint::lerp_opt(
                a.overall_confidence,
                b.overall_confidence,
                alpha,
            ),
            joints,
        }
    }
}
