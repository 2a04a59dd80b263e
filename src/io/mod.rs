//! Input/output helpers.
//!
//! - reference curve ingest + validation (`reference`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod reference;

pub use export::*;
pub use reference::*;
