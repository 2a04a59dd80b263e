//! Arithmetic expression trees over a single free parameter `t`.
//!
//! - node vocabulary + evaluation (`expr`)
//! - symbolic differentiation (`derive`)
//! - prefix text format for reading/writing trees (`parse`)

pub mod derive;
pub mod expr;
pub mod parse;

pub use expr::*;
pub use parse::*;
