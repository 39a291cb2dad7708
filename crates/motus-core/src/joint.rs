//! Joint keys - closed enumeration of named landmarks
//!
//! A joint key identifies one named landmark inside a declared joint set.
//! Pose landmarks are keyed `POSE_<NAME>`, hand landmarks
//! `LEFT_HAND_<NAME>` / `RIGHT_HAND_<NAME>`. Unknown keys are rejected at
//! the ingestion boundary instead of flowing through as arbitrary strings.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MotusError;

/// MediaPipe-style pose landmarks (33 points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PoseLandmark {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl PoseLandmark {
    pub const ALL: [PoseLandmark; 33] = [
        PoseLandmark::Nose,
        PoseLandmark::LeftEyeInner,
        PoseLandmark::LeftEye,
        PoseLandmark::LeftEyeOuter,
        PoseLandmark::RightEyeInner,
        PoseLandmark::RightEye,
        PoseLandmark::RightEyeOuter,
        PoseLandmark::LeftEar,
        PoseLandmark::RightEar,
        PoseLandmark::MouthLeft,
        PoseLandmark::MouthRight,
        PoseLandmark::LeftShoulder,
        PoseLandmark::RightShoulder,
        PoseLandmark::LeftElbow,
        PoseLandmark::RightElbow,
        PoseLandmark::LeftWrist,
        PoseLandmark::RightWrist,
        PoseLandmark::LeftPinky,
        PoseLandmark::RightPinky,
        PoseLandmark::LeftIndex,
        PoseLandmark::RightIndex,
        PoseLandmark::LeftThumb,
        PoseLandmark::RightThumb,
        PoseLandmark::LeftHip,
        PoseLandmark::RightHip,
        PoseLandmark::LeftKnee,
        PoseLandmark::RightKnee,
        PoseLandmark::LeftAnkle,
        PoseLandmark::RightAnkle,
        PoseLandmark::LeftHeel,
        PoseLandmark::RightHeel,
        PoseLandmark::LeftFootIndex,
        PoseLandmark::RightFootIndex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PoseLandmark::Nose => "NOSE",
            PoseLandmark::LeftEyeInner => "LEFT_EYE_INNER",
            PoseLandmark::LeftEye => "LEFT_EYE",
            PoseLandmark::LeftEyeOuter => "LEFT_EYE_OUTER",
            PoseLandmark::RightEyeInner => "RIGHT_EYE_INNER",
            PoseLandmark::RightEye => "RIGHT_EYE",
            PoseLandmark::RightEyeOuter => "RIGHT_EYE_OUTER",
            PoseLandmark::LeftEar => "LEFT_EAR",
            PoseLandmark::RightEar => "RIGHT_EAR",
            PoseLandmark::MouthLeft => "MOUTH_LEFT",
            PoseLandmark::MouthRight => "MOUTH_RIGHT",
            PoseLandmark::LeftShoulder => "LEFT_SHOULDER",
            PoseLandmark::RightShoulder => "RIGHT_SHOULDER",
            PoseLandmark::LeftElbow => "LEFT_ELBOW",
            PoseLandmark::RightElbow => "RIGHT_ELBOW",
            PoseLandmark::LeftWrist => "LEFT_WRIST",
            PoseLandmark::RightWrist => "RIGHT_WRIST",
            PoseLandmark::LeftPinky => "LEFT_PINKY",
            PoseLandmark::RightPinky => "RIGHT_PINKY",
            PoseLandmark::LeftIndex => "LEFT_INDEX",
            PoseLandmark::RightIndex => "RIGHT_INDEX",
            PoseLandmark::LeftThumb => "LEFT_THUMB",
            PoseLandmark::RightThumb => "RIGHT_THUMB",
            PoseLandmark::LeftHip => "LEFT_HIP",
            PoseLandmark::RightHip => "RIGHT_HIP",
            PoseLandmark::LeftKnee => "LEFT_KNEE",
            PoseLandmark::RightKnee => "RIGHT_KNEE",
            PoseLandmark::LeftAnkle => "LEFT_ANKLE",
            PoseLandmark::RightAnkle => "RIGHT_ANKLE",
            PoseLandmark::LeftHeel => "LEFT_HEEL",
            PoseLandmark::RightHeel => "RIGHT_HEEL",
            PoseLandmark::LeftFootIndex => "LEFT_FOOT_INDEX",
            PoseLandmark::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.name() == name)
    }
}

/// MediaPipe-style hand landmarks (21 points per hand)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    pub const ALL: [HandLandmark; 21] = [
        HandLandmark::Wrist,
        HandLandmark::ThumbCmc,
        HandLandmark::ThumbMcp,
        HandLandmark::ThumbIp,
        HandLandmark::ThumbTip,
        HandLandmark::IndexMcp,
        HandLandmark::IndexPip,
        HandLandmark::IndexDip,
        HandLandmark::IndexTip,
        HandLandmark::MiddleMcp,
        HandLandmark::MiddlePip,
        HandLandmark::MiddleDip,
        HandLandmark::MiddleTip,
        HandLandmark::RingMcp,
        HandLandmark::RingPip,
        HandLandmark::RingDip,
        HandLandmark::RingTip,
        HandLandmark::PinkyMcp,
        HandLandmark::PinkyPip,
        HandLandmark::PinkyDip,
        HandLandmark::PinkyTip,
    ];

    /// The five finger chains, base to tip
    pub const FINGERS: [[HandLandmark; 4]; 5] = [
        [
            HandLandmark::ThumbCmc,
            HandLandmark::ThumbMcp,
            HandLandmark::ThumbIp,
            HandLandmark::ThumbTip,
        ],
        [
            HandLandmark::IndexMcp,
            HandLandmark::IndexPip,
            HandLandmark::IndexDip,
            HandLandmark::IndexTip,
        ],
        [
            HandLandmark::MiddleMcp,
            HandLandmark::MiddlePip,
            HandLandmark::MiddleDip,
            HandLandmark::MiddleTip,
        ],
        [
            HandLandmark::RingMcp,
            HandLandmark::RingPip,
            HandLandmark::RingDip,
            HandLandmark::RingTip,
        ],
        [
            HandLandmark::PinkyMcp,
            HandLandmark::PinkyPip,
            HandLandmark::PinkyDip,
            HandLandmark::PinkyTip,
        ],
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandLandmark::Wrist => "WRIST",
            HandLandmark::ThumbCmc => "THUMB_CMC",
            HandLandmark::ThumbMcp => "THUMB_MCP",
            HandLandmark::ThumbIp => "THUMB_IP",
            HandLandmark::ThumbTip => "THUMB_TIP",
            HandLandmark::IndexMcp => "INDEX_FINGER_MCP",
            HandLandmark::IndexPip => "INDEX_FINGER_PIP",
            HandLandmark::IndexDip => "INDEX_FINGER_DIP",
            HandLandmark::IndexTip => "INDEX_FINGER_TIP",
            HandLandmark::MiddleMcp => "MIDDLE_FINGER_MCP",
            HandLandmark::MiddlePip => "MIDDLE_FINGER_PIP",
            HandLandmark::MiddleDip => "MIDDLE_FINGER_DIP",
            HandLandmark::MiddleTip => "MIDDLE_FINGER_TIP",
            HandLandmark::RingMcp => "RING_FINGER_MCP",
            HandLandmark::RingPip => "RING_FINGER_PIP",
            HandLandmark::RingDip => "RING_FINGER_DIP",
            HandLandmark::RingTip => "RING_FINGER_TIP",
            HandLandmark::PinkyMcp => "PINKY_MCP",
            HandLandmark::PinkyPip => "PINKY_PIP",
            HandLandmark::PinkyDip => "PINKY_DIP",
            HandLandmark::PinkyTip => "PINKY_TIP",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.name() == name)
    }
}

/// Handedness label from the landmark source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn prefix(self) -> &'static str {
        match self {
            Hand::Left => "LEFT_HAND_",
            Hand::Right => "RIGHT_HAND_",
        }
    }

    /// Pose landmark for this hand's wrist
    pub fn pose_wrist(self) -> PoseLandmark {
        match self {
            Hand::Left => PoseLandmark::LeftWrist,
            Hand::Right => PoseLandmark::RightWrist,
        }
    }
}

/// Stable key for one landmark within a joint set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointKey {
    Pose(PoseLandmark),
    Hand(Hand, HandLandmark),
}

impl fmt::Display for JointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointKey::Pose(lm) => write!(f, "POSE_{}", lm.name()),
            JointKey::Hand(hand, lm) => write!(f, "{}{}", hand.prefix(), lm.name()),
        }
    }
}

impl FromStr for JointKey {
    type Err = MotusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("POSE_") {
            if let Some(lm) = PoseLandmark::from_name(rest) {
                return Ok(JointKey::Pose(lm));
            }
        } else if let Some(rest) = s.strip_prefix("LEFT_HAND_") {
            if let Some(lm) = HandLandmark::from_name(rest) {
                return Ok(JointKey::Hand(Hand::Left, lm));
            }
        } else if let Some(rest) = s.strip_prefix("RIGHT_HAND_") {
            if let Some(lm) = HandLandmark::from_name(rest) {
                return Ok(JointKey::Hand(Hand::Right, lm));
            }
        }
        Err(MotusError::UnknownJointKey(s.to_string()))
    }
}

impl Serialize for JointKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JointKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_key_roundtrip() {
        for lm in PoseLandmark::ALL {
            let key = JointKey::Pose(lm);
            let parsed: JointKey = key.to_string().parse().expect("parse");
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_hand_key_roundtrip() {
        for hand in [Hand::Left, Hand::Right] {
            for lm in HandLandmark::ALL {
                let key = JointKey::Hand(hand, lm);
                let parsed: JointKey = key.to_string().parse().expect("parse");
                assert_eq!(parsed, key);
            }
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!("POSE_TAIL".parse::<JointKey>().is_err());
        assert!("LEFT_HAND_".parse::<JointKey>().is_err());
        assert!("wrist".parse::<JointKey>().is_err());
    }

    #[test]
    fn test_known_strings() {
        assert_eq!(
            "POSE_LEFT_WRIST".parse::<JointKey>().expect("parse"),
            JointKey::Pose(PoseLandmark::LeftWrist)
        );
        assert_eq!(
            "RIGHT_HAND_THUMB_TIP".parse::<JointKey>().expect("parse"),
            JointKey::Hand(Hand::Right, HandLandmark::ThumbTip)
        );
    }

    #[test]
    fn test_serde_as_string() {
        let key = JointKey::Hand(Hand::Left, HandLandmark::IndexTip);
        let json = serde_json::to_string(&key).expect("serialize");
        assert_eq!(json, "\"LEFT_HAND_INDEX_FINGER_TIP\"");
        let back: JointKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, key);
    }
}
