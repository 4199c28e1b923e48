//! Reporting utilities: the plain-text page and number formatting.

pub mod format;

pub use format::*;
