//! Input/output helpers.
//!
//! - fitted-value exports (CSV) (`export`)

pub mod export;

pub use export::*;
