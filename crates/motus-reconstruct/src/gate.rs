//! Reconstruction gate
//!
//! Low-confidence meaning results should trigger a re-record rather than a
//! reconstruction from noise. The gate is a policy check, not an error.

use tracing::debug;

use motus_core::{Intent, MeaningResult};

/// Default minimum confidence for reconstruction
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructionGate {
    pub min_confidence: f32,
}

impl Default for ReconstructionGate {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ReconstructionGate {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    /// Whether a meaning result is trustworthy enough to reconstruct from.
    pub fn should_proceed(&self, result: &MeaningResult) -> bool {
        let ok = result.confidence >= self.min_confidence && result.intent != Intent::Unknown;
        if !ok {
            debug!(
                confidence = result.confidence,
                intent = ?result.intent,
                threshold = self.min_confidence,
                "reconstruction gated"
            );
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::MeaningParams;

    fn result(intent: Intent, confidence: f32) -> MeaningResult {
        MeaningResult {
            schema_version: motus_core::MEANING_SCHEMA_VERSION.to_string(),
            source_language: "asl".to_string(),
            target_language: "lsf".to_string(),
            intent,
            params: MeaningParams::default(),
            confidence,
            rationale: String::new(),
        }
    }

    #[test]
    fn test_accepts_confident_known_intent() {
        let gate = ReconstructionGate::default();
        assert!(gate.should_proceed(&result(Intent::Greeting, 0.9)));
        assert!(gate.should_proceed(&result(Intent::Greeting, 0.55)));
    }

    #[test]
    fn test_rejects_low_confidence() {
        let gate = ReconstructionGate::default();
        assert!(!gate.should_proceed(&result(Intent::Greeting, 0.54)));
    }

    #[test]
    fn test_rejects_unknown_intent() {
        let gate = ReconstructionGate::default();
        assert!(!gate.should_proceed(&result(Intent::Unknown, 0.99)));
    }

    #[test]
    fn test_custom_threshold() {
        let gate = ReconstructionGate::new(0.3);
        assert!(gate.should_proceed(&result(Intent::Yes, 0.35)));
    }
}
