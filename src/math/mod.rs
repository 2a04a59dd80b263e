//! Geometric building blocks for curve scoring: arc-length stepping and
//! rigid alignment.

pub mod arc_length;
pub mod rotation;

pub use arc_length::*;
pub use rotation::*;
