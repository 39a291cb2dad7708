//! Motus Encode Demo
//!
//! Runs a synthetic waving clip through the full pipeline:
//! - Feature summarization
//! - Meaning fallback + reconstruction gate
//! - Template reconstruction
//! - BVH encoding
//!
//! Prints each stage so the data flow is visible end to end.

use motus_core::{Intent, MeaningParams, MeaningResult, Vec3, MEANING_SCHEMA_VERSION};
use motus_encode::encode;
use motus_features::summarize;
use motus_reconstruct::{reconstruct, ReconstructionGate};
use motus_test::wave_clip;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Motus Encode Demo ===");
    println!();

    // 1. Synthetic capture: two seconds of waving
    let clip = wave_clip(60, 30.0);
    println!(
        "captured clip: {} frames, {:.2}s, joint set {:?}",
        clip.frames.len(),
        clip.duration(),
        clip.joint_set
    );

    // 2. Privacy-preserving feature summary
    let summary = summarize(&clip);
    println!(
        "summary: avg_speed={:.4} speed_norm={:.2} dominant_hand={:?}",
        summary.avg_speed, summary.speed_norm, summary.dominant_hand
    );
    println!("summary json: {}", serde_json::to_string(&summary)?);
    println!();

    // 3. Meaning: show the gate rejecting a fallback, then accept a real one
    let gate = ReconstructionGate::default();
    let fallback = MeaningResult::fallback("asl", "lsf");
    println!(
        "fallback meaning (confidence {:.2}): gate proceed = {}",
        fallback.confidence,
        gate.should_proceed(&fallback)
    );

    let meaning = MeaningResult {
        schema_version: MEANING_SCHEMA_VERSION.to_string(),
        source_language: "asl".to_string(),
        target_language: "lsf".to_string(),
        intent: Intent::Greeting,
        params: MeaningParams {
            direction: Vec3::new(0.4, 0.1, 0.0),
            intensity: 0.8,
            tempo: 0.6,
            politeness: 0.7,
        },
        confidence: 0.82,
        rationale: "sustained unilateral arm oscillation".to_string(),
    };
    println!(
        "estimated meaning ({:?}, confidence {:.2}): gate proceed = {}",
        meaning.intent,
        meaning.confidence,
        gate.should_proceed(&meaning)
    );
    println!();

    // 4. Reconstruct the template under the meaning parameters
    let (reconstructed, transform) = reconstruct(&clip, &meaning.params);
    println!(
        "reconstructed: {} frames, {:.2}s (tempo x{:.2}, intensity x{:.2}, rot {:.3} rad)",
        reconstructed.frames.len(),
        reconstructed.duration(),
        transform.tempo_factor,
        transform.intensity_factor,
        transform.rotation_angle
    );
    println!();

    // 5. Encode the reconstructed clip as a BVH artifact
    let artifact = encode(&reconstructed)?;
    println!(
        "artifact: {} frames at {:.4}s/frame, {} bytes of BVH",
        artifact.frame_count,
        artifact.frame_time,
        artifact.text.len()
    );
    println!();
    println!("--- BVH head ---");
    for line in artifact.text.lines().take(12) {
        println!("{line}");
    }
    println!("...");

    Ok(())
}
