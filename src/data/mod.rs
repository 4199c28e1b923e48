//! Compiled-in sample data.

pub mod sample;

pub use sample::*;
