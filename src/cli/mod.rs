//! Command-line parsing for the regression explainer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the math and rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::EXERCISE_VOLUME;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "acca",
    version,
    about = "Linear regression & correlation in accounting (ACCA-inspired)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive page in the terminal.
    Page(PageArgs),
    /// Print the page as plain text with an ASCII chart.
    Report(ReportArgs),
    /// Print the regression numbers only (useful for scripting).
    Fit(FitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PageArgs {
    /// Start with the worked solution expanded.
    #[arg(long)]
    pub solution: bool,

    /// Volume to predict overhead for in the worked solution.
    #[arg(long = "predict", env = "ACCA_PREDICT_X", default_value_t = EXERCISE_VOLUME)]
    pub predict_x: f64,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Include the worked solution.
    #[arg(long)]
    pub solution: bool,

    /// Volume to predict overhead for in the worked solution.
    #[arg(long = "predict", env = "ACCA_PREDICT_X", default_value_t = EXERCISE_VOLUME)]
    pub predict_x: f64,

    /// Disable the ASCII chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(
        long,
        env = "ACCA_PLOT_WIDTH",
        default_value_t = 72,
        value_parser = clap::value_parser!(u16).range(10..=1000)
    )]
    pub width: u16,

    /// Chart height (rows).
    #[arg(
        long,
        env = "ACCA_PLOT_HEIGHT",
        default_value_t = 20,
        value_parser = clap::value_parser!(u16).range(5..=500)
    )]
    pub height: u16,

    /// Export observations with fitted values and residuals to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Volume to predict overhead for.
    #[arg(long = "predict", env = "ACCA_PREDICT_X", default_value_t = EXERCISE_VOLUME)]
    pub predict_x: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults() {
        let cli = Cli::parse_from(["acca", "report"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert!(!args.solution);
        assert_eq!(args.width, 72);
        assert_eq!(args.height, 20);
        assert_eq!(args.predict_x, 1400.0);
    }

    #[test]
    fn fit_flags() {
        let cli = Cli::parse_from(["acca", "fit", "--json", "--predict", "900"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert!(args.json);
        assert_eq!(args.predict_x, 900.0);
    }

    #[test]
    fn plot_size_is_bounded() {
        assert!(Cli::try_parse_from(["acca", "report", "--width", "10000000000000"]).is_err());
        assert!(Cli::try_parse_from(["acca", "report", "--width", "1001"]).is_err());
        assert!(Cli::try_parse_from(["acca", "report", "--height", "4"]).is_err());

        let cli = Cli::try_parse_from(["acca", "report", "--width", "1000", "--height", "500"]).unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!((args.width, args.height), (1000, 500));
    }
}
