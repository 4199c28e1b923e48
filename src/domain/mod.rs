//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observation row (`Observation`) and the table around it (`Dataset`)
//! - dataset ranges (`DatasetStats`)
//! - fit outputs (`RegressionResult`, `Fitted`)

pub mod types;

pub use types::*;
