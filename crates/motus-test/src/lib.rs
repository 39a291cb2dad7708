//! Motus test support
//!
//! Synthetic clip generators for exercising the pipeline without a camera.
//! Generators are seeded so every run sees the same clips.

pub mod clips;

pub use clips::*;
