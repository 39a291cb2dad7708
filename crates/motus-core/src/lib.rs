//! Motus Core - Fundamental types for skeletal motion encoding
//!
//! This crate defines the core types used throughout Motus:
//! - Math primitives (Vec3, Quat, Mat3)
//! - Joint keys (closed landmark enumeration)
//! - Motion clips (timestamped landmark frames, slicing, resampling)
//! - Meaning descriptors (direction / intensity / tempo / politeness)
//! - Error taxonomy

pub mod clip;
pub mod error;
pub mod joint;
pub mod math;
pub mod meaning;

pub use clip::*;
pub use error::*;
pub use joint::*;
pub use math::*;
pub use meaning::*;
