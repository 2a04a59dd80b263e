//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the point type and the read-only reference curve (`Point3`, `ReferenceCurve`)
//! - run configuration (`AnnealConfig`, `CostMode`, `ScoreConfig`)
//! - the exported run record (`RunRecord`)

pub mod types;

pub use types::*;
