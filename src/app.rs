//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - hands the result to the chosen front-end

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::app::pipeline::Analysis;
use crate::cli::{Command, FitArgs, PageArgs, ReportArgs};
use crate::domain::{Prediction, RegressionResult};
use crate::error::{AppError, EXIT_RUNTIME, EXIT_USAGE};
use crate::report::PageOptions;

pub mod pipeline;

/// Entry point for the `acca` binary.
pub fn run() -> Result<(), AppError> {
    // Optional: a `.env` file may provide the `ACCA_*` overrides.
    dotenvy::dotenv().ok();
    crate::logging::init()?;

    // We want `acca` and `acca --solution` to behave like `acca page ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Page(args) => handle_page(args),
        Command::Report(args) => handle_report(args),
        Command::Fit(args) => handle_fit(args),
    }
}

fn handle_page(args: PageArgs) -> Result<(), AppError> {
    let analysis = pipeline::analyze_sample();
    check_predict_x(&analysis, args.predict_x)?;
    crate::tui::run(analysis, &args)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let analysis = pipeline::analyze_sample();
    check_predict_x(&analysis, args.predict_x)?;

    let opts = PageOptions {
        solution: args.solution,
        predict_x: args.predict_x,
        plot: (!args.no_plot).then_some((usize::from(args.width), usize::from(args.height))),
    };
    print!("{}", crate::report::format_page(&analysis, &opts));

    if let Some(path) = &args.export {
        let fit = analysis.fit()?;
        crate::io::write_fitted_csv_file(path, &fit.fitted)?;
        info!(path = %path.display(), rows = fit.fitted.len(), "wrote fitted values");
    }

    Ok(())
}

/// JSON shape of `acca fit --json`.
#[derive(Debug, Serialize)]
struct FitOutput {
    result: RegressionResult,
    prediction: Prediction,
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let analysis = pipeline::analyze_sample();
    check_predict_x(&analysis, args.predict_x)?;
    let result = analysis.fit()?.result;

    if args.json {
        println!("{}", fit_json(&result, args.predict_x)?);
    } else {
        print!("{}", crate::report::format_fit(&result, args.predict_x));
    }

    Ok(())
}

/// Encode `result` and the prediction at `predict_x` as pretty JSON.
fn fit_json(result: &RegressionResult, predict_x: f64) -> Result<String, AppError> {
    let output = FitOutput {
        result: *result,
        prediction: predict(result, predict_x)?,
    };
    serde_json::to_string_pretty(&output)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to encode JSON: {e}")))
}

/// The prediction at `x`, refused when either coordinate is not finite.
///
/// serde_json writes NaN and infinity as `null`.
fn predict(result: &RegressionResult, x: f64) -> Result<Prediction, AppError> {
    if !x.is_finite() {
        return Err(AppError::new(EXIT_USAGE, format!("--predict must be a finite number, got {x}")));
    }
    let y = result.predict(x);
    if !y.is_finite() {
        return Err(AppError::new(
            EXIT_USAGE,
            format!("--predict {x} is out of range: the fitted line overflows there"),
        ));
    }
    Ok(Prediction { x, y })
}

/// Validate `--predict` before any front-end prints anything.
fn check_predict_x(analysis: &Analysis, x: f64) -> Result<(), AppError> {
    match &analysis.outcome {
        Ok(fit) => predict(&fit.result, x).map(|_| ()),
        Err(_) if !x.is_finite() => Err(AppError::new(
            EXIT_USAGE,
            format!("--predict must be a finite number, got {x}"),
        )),
        Err(_) => Ok(()),
    }
}

/// Rewrite argv so `acca` defaults to `acca page`.
///
/// Rules:
/// - `acca`                        -> `acca page`
/// - `acca --solution ...`         -> `acca page --solution ...`
/// - `acca --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("page".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "page" | "report" | "fit");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "page flags".
    if arg1.starts_with('-') {
        argv.insert(1, "page".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_page() {
        assert_eq!(rewrite_args(args(&["acca"])), args(&["acca", "page"]));
    }

    #[test]
    fn leading_flags_go_to_page() {
        assert_eq!(
            rewrite_args(args(&["acca", "--solution"])),
            args(&["acca", "page", "--solution"])
        );
    }

    #[test]
    fn help_and_subcommands_are_untouched() {
        assert_eq!(rewrite_args(args(&["acca", "--help"])), args(&["acca", "--help"]));
        assert_eq!(
            rewrite_args(args(&["acca", "fit", "--json"])),
            args(&["acca", "fit", "--json"])
        );
        assert_eq!(rewrite_args(args(&["acca", "bogus"])), args(&["acca", "bogus"]));
    }

    #[test]
    fn fit_json_carries_result_and_prediction() {
        let result = pipeline::analyze_sample().fit().unwrap().result;
        let json = fit_json(&result, 1400.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let close = |v: &serde_json::Value, expected: f64| {
            let got = v.as_f64().unwrap();
            assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0), "{got} vs {expected}");
        };

        let r = &value["result"];
        close(&r["slope"], result.slope);
        close(&r["intercept"], result.intercept);
        close(&r["correlation"], result.correlation);
        close(&r["coefficient_of_determination"], result.coefficient_of_determination);
        assert_eq!(r["n"].as_u64(), Some(6));

        let p = &value["prediction"];
        close(&p["x"], 1400.0);
        close(&p["y"], result.intercept + result.slope * 1400.0);
        close(&p["y"], 30600.0);
    }

    #[test]
    fn non_finite_prediction_is_a_usage_error() {
        let analysis = pipeline::analyze_sample();
        assert!(check_predict_x(&analysis, 1400.0).is_ok());
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(check_predict_x(&analysis, x).unwrap_err().exit_code(), EXIT_USAGE);
        }
    }

    #[test]
    fn overflowing_prediction_is_a_usage_error() {
        let analysis = pipeline::analyze_sample();
        let result = analysis.fit().unwrap().result;

        // Finite x, but intercept + slope·x overflows.
        assert_eq!(check_predict_x(&analysis, 1e308).unwrap_err().exit_code(), EXIT_USAGE);
        assert_eq!(fit_json(&result, 1e308).unwrap_err().exit_code(), EXIT_USAGE);
        assert_eq!(fit_json(&result, -1e308).unwrap_err().exit_code(), EXIT_USAGE);

        let json = fit_json(&result, 1e300).unwrap();
        assert!(!json.contains("null"), "{json}");
    }

    #[test]
    fn prediction_is_unchecked_when_the_fit_failed() {
        let mut dataset = crate::data::sample_dataset();
        dataset.observations.truncate(1);
        let analysis = pipeline::analyze(dataset);
        assert!(check_predict_x(&analysis, 1e308).is_ok());
        assert!(check_predict_x(&analysis, f64::NAN).is_err());
    }
}
