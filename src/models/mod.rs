//! Curve models that can be scored against a reference.
//!
//! - expression-tree curves for the symbolic search engine (`curve`)
//! - the closed-form Raup shell model searched by annealing (`raup`)

pub mod curve;
pub mod raup;

pub use curve::*;
pub use raup::*;
