//! Motus reconstruction
//!
//! Turns a meaning description plus a template clip into a rendered clip.
//! Templates are canonical recordings of each intent; reconstruction warps
//! a template with a small family of geometric and temporal transforms
//! derived from the meaning parameters. The warp is deliberately coarse so
//! that the template's recognizable shape always survives.

pub mod deform;
pub mod gate;

pub use deform::*;
pub use gate::*;
