//! Motus Rig - Joint topology registry
//!
//! Static description of the supported joint sets:
//! - Bone-to-bone landmark edges used for visualization
//! - The rig-node graph (parent / main-child hierarchy) used for encoding
//!
//! Both are built once by pure builders and shared read-only afterwards.

pub mod edges;
pub mod topology;

pub use edges::*;
pub use topology::*;
