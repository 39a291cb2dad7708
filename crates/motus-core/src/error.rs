//! Error types for Motus

use thiserror::Error;

/// Core Motus errors
///
/// Only call-level preconditions surface as errors. Per-joint and per-frame
/// conditions (missing landmarks, non-finite geometry) degrade locally to
/// safe defaults and never reach this enum.
#[derive(Error, Debug)]
pub enum MotusError {
    #[error("Cannot encode an empty clip")]
    EmptyClip,

    #[error("Unknown joint key: {0}")]
    UnknownJointKey(String),

    #[error("Unknown joint set: {0}")]
    UnknownJointSet(String),

    #[error("Invalid time window: start {start} > end {end}")]
    InvalidWindow { start: f64, end: f64 },
}

/// Result type for Motus operations
pub type MotusResult<T> = Result<T, MotusError>;
