//! `snailfit` library crate.
//!
//! The binary (`snailfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - an external symbolic-regression engine can build `ExprTree` curves and
//!   score them directly (`fit::score`, `fit::score_population`)

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod tree;
