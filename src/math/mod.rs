//! Mathematical utilities: closed-form regression and matrix least squares.

pub mod ols;
pub mod regression;

pub use ols::*;
pub use regression::*;
