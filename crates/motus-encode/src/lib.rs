//! Motus Encode - Skeletal animation encoder
//!
//! Converts a landmark time series into a hierarchical rotation-channel
//! animation artifact (BVH text):
//!
//! 1. Conform pass: center on the initial hip midpoint, calibrate scale to
//!    a fixed shoulder width, resample to a stable frame rate
//! 2. Per-frame rig position resolution with parent-inheritance fallback
//! 3. Rest pose from frame 0, root at the origin
//! 4. Per-joint local rotations via quaternion alignment (two-vector basis
//!    method for torso and shoulders)
//! 5. ZXY Euler decomposition and BVH serialization
//!
//! Missing landmarks and degenerate geometry degrade locally (identity
//! rotation, inherited position, zero channel value); only an empty clip is
//! an error.

pub mod bvh;
pub mod encoder;
pub mod euler;
pub mod normalize;
pub mod rigpose;
pub mod solve;

pub use bvh::*;
pub use encoder::*;
pub use euler::*;
pub use normalize::*;
pub use rigpose::*;
pub use solve::*;
