//! Curve fitting.
//!
//! Responsibilities:
//!
//! - score a parametric model against a reference (align, then RMSE)
//! - score a population of models in parallel
//! - search the Raup parameter space by simulated annealing

pub mod anneal;
pub mod scorer;

pub use anneal::*;
pub use scorer::*;
