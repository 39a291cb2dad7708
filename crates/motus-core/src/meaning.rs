//! Meaning descriptors
//!
//! A meaning value is what the external estimator returns for a captured
//! clip: a classified intent plus compact motion parameters. Motus only
//! consumes these (reconstruction gate + template deformation); estimation
//! itself lives outside this repository.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Schema version stamped on meaning values
pub const MEANING_SCHEMA_VERSION: &str = "0.1.0";

/// Classified intent of a motion clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Sentinel: estimation failed or produced nothing usable
    Unknown,
    Request,
    Yes,
    No,
    Greeting,
    SlowDown,
    Warning,
    Thanks,
    Where,
}

/// Compact motion parameters attached to a meaning
///
/// `direction` components are expected in [-1, 1]; the scalars in [0, 1].
/// Consumed read-only by the reconstruction engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeaningParams {
    pub direction: Vec3,
    pub intensity: f32,
    pub tempo: f32,
    pub politeness: f32,
}

impl Default for MeaningParams {
    fn default() -> Self {
        Self {
            direction: Vec3::ZERO,
            intensity: 0.5,
            tempo: 0.5,
            politeness: 0.7,
        }
    }
}

/// Complete meaning estimation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeaningResult {
    pub schema_version: String,
    pub source_language: String,
    pub target_language: String,
    pub intent: Intent,
    pub params: MeaningParams,
    pub confidence: f32,
    pub rationale: String,
}

impl MeaningResult {
    /// Low-confidence fallback for clips too short to estimate
    pub fn fallback(source_language: &str, target_language: &str) -> Self {
        Self {
            schema_version: MEANING_SCHEMA_VERSION.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            intent: Intent::Request,
            params: MeaningParams {
                direction: Vec3::ZERO,
                intensity: 0.2,
                tempo: 0.2,
                politeness: 0.7,
            },
            confidence: 0.4,
            rationale: "Not enough frames; fallback.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let m = MeaningResult::fallback("JSL", "ASL");
        assert_eq!(m.intent, Intent::Request);
        assert!(m.confidence < 0.55);
    }

    #[test]
    fn test_intent_serde_names() {
        let json = serde_json::to_string(&Intent::SlowDown).expect("serialize");
        assert_eq!(json, "\"slow_down\"");
        let back: Intent = serde_json::from_str("\"unknown\"").expect("deserialize");
        assert_eq!(back, Intent::Unknown);
    }

    #[test]
    fn test_meaning_result_roundtrip() {
        let m = MeaningResult::fallback("JSL", "ASL");
        let json = serde_json::to_string(&m).expect("serialize");
        assert!(json.contains("\"schemaVersion\""));
        assert!(json.contains("\"sourceLanguage\""));
        let back: MeaningResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, m);
    }
}
