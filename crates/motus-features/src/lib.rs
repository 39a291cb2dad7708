//! Motus Features - Motion feature summarizer
//!
//! Reduces a landmark time series to a small fixed-shape statistical
//! summary for the external meaning estimator. The summary is the privacy
//! boundary of the pipeline: it carries aggregate scalars only, never raw
//! per-frame coordinates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use motus_core::{Frame, Hand, JointKey, MotionClip, PoseLandmark, Vec3};

/// Wrist speed divisor mapping typical signing speed into [0, 1]
/// (tuned for normalized coordinates)
pub const SPEED_CALIBRATION: f32 = 1.2;

/// Wrist path-length divisor mapping typical displacement into [0, 1]
pub const DISPLACEMENT_CALIBRATION: f32 = 0.8;

/// Fixed-shape aggregate summary of one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionSummary {
    pub duration_secs: f64,
    pub frame_count: usize,
    /// Mean wrist speed over consecutive-frame deltas, averaged over the
    /// hands that were present
    pub avg_speed: f32,
    /// Mean wrist path length, averaged over the hands that were present
    pub avg_displacement: f32,
    /// `avg_speed` normalized by calibration, clamped to [0, 1]
    pub speed_norm: f32,
    /// `avg_displacement` normalized by calibration, clamped to [0, 1]
    pub displacement_norm: f32,
    /// Hip-midpoint delta from first to last frame where available
    pub net_root_displacement: Vec3,
    /// Fraction of frames with a finite left wrist landmark
    pub left_hand_ratio: f32,
    /// Fraction of frames with a finite right wrist landmark
    pub right_hand_ratio: f32,
    /// Wrist with the higher average speed (left on ties)
    pub dominant_hand: Hand,
}

impl MotionSummary {
    fn zero(duration_secs: f64, frame_count: usize) -> Self {
        Self {
            duration_secs,
            frame_count,
            avg_speed: 0.0,
            avg_displacement: 0.0,
            speed_norm: 0.0,
            displacement_norm: 0.0,
            net_root_displacement: Vec3::ZERO,
            left_hand_ratio: 0.0,
            right_hand_ratio: 0.0,
            dominant_hand: Hand::Left,
        }
    }
}

/// Per-step speeds for one joint over consecutive present frames
fn step_speeds(frames: &[Frame], key: JointKey) -> Vec<f32> {
    let mut speeds = Vec::new();
    let mut prev: Option<(Vec3, f64)> = None;
    for frame in frames {
        let Some(p) = frame.joint(key) else { continue };
        if let Some((prev_p, prev_t)) = prev {
            let dt = (frame.t - prev_t).max(1e-6) as f32;
            speeds.push(p.distance(&prev_p) / dt);
        }
        prev = Some((p, frame.t));
    }
    speeds
}

/// Total path length for one joint over consecutive present frames
fn path_length(frames: &[Frame], key: JointKey) -> f32 {
    let mut total = 0.0;
    let mut prev: Option<Vec3> = None;
    for frame in frames {
        let Some(p) = frame.joint(key) else { continue };
        if let Some(prev_p) = prev {
            total += p.distance(&prev_p);
        }
        prev = Some(p);
    }
    total
}

fn presence_ratio(frames: &[Frame], key: JointKey) -> f32 {
    if frames.is_empty() {
        return 0.0;
    }
    let present = frames.iter().filter(|f| f.joint(key).is_some()).count();
    present as f32 / frames.len() as f32
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Summarize a clip into aggregate motion statistics.
///
/// Clips with fewer than two frames yield all-zero motion statistics.
pub fn summarize(clip: &MotionClip) -> MotionSummary {
    let duration = clip.duration();
    let count = clip.len();
    if count < 2 {
        return MotionSummary::zero(duration, count);
    }

    let left_key = JointKey::Pose(PoseLandmark::LeftWrist);
    let right_key = JointKey::Pose(PoseLandmark::RightWrist);

    let left_speeds = step_speeds(&clip.frames, left_key);
    let right_speeds = step_speeds(&clip.frames, right_key);
    let avg_left = mean(&left_speeds);
    let avg_right = mean(&right_speeds);

    let mut hand_speeds = Vec::new();
    let mut hand_paths = Vec::new();
    if !left_speeds.is_empty() {
        hand_speeds.push(avg_left);
        hand_paths.push(path_length(&clip.frames, left_key));
    }
    if !right_speeds.is_empty() {
        hand_speeds.push(avg_right);
        hand_paths.push(path_length(&clip.frames, right_key));
    }
    let avg_speed = mean(&hand_speeds);
    let avg_displacement = mean(&hand_paths);

    let net_root_displacement = {
        let first = clip.frames.iter().find_map(Frame::hip_midpoint);
        let last = clip.frames.iter().rev().find_map(Frame::hip_midpoint);
        match (first, last) {
            (Some(a), Some(b)) => b - a,
            _ => Vec3::ZERO,
        }
    };

    let summary = MotionSummary {
        duration_secs: duration,
        frame_count: count,
        avg_speed,
        avg_displacement,
        speed_norm: (avg_speed / SPEED_CALIBRATION).clamp(0.0, 1.0),
        displacement_norm: (avg_displacement / DISPLACEMENT_CALIBRATION).clamp(0.0, 1.0),
        net_root_displacement,
        left_hand_ratio: presence_ratio(&clip.frames, left_key),
        right_hand_ratio: presence_ratio(&clip.frames, right_key),
        dominant_hand: if avg_left >= avg_right {
            Hand::Left
        } else {
            Hand::Right
        },
    };
    debug!(
        frames = count,
        avg_speed = summary.avg_speed,
        speed_norm = summary.speed_norm,
        "summarized clip"
    );
    summary
}
