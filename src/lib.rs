//! `acca-regression` library crate.
//!
//! The binary (`acca`) is a thin wrapper around this library so that:
//!
//! - the regression math is testable without spawning processes or a terminal
//! - the text report and the TUI share one analysis pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod content;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
