//! Shared "analysis pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> stats -> regression -> fitted values -> matrix cross-check
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::{debug, warn};

use crate::data::{compute_stats, sample_dataset};
use crate::domain::{Dataset, DatasetStats, Fitted, RegressionResult};
use crate::error::AppError;
use crate::math::{DegenerateInputError, Sums, compute_regression, fit_line_matrix};

/// Everything derived from a successful regression.
#[derive(Debug, Clone)]
pub struct Fit {
    pub result: RegressionResult,
    pub sums: Sums,
    pub fitted: Vec<Fitted>,
    /// `(intercept, slope)` from the matrix route, if it could be solved.
    pub matrix: Option<(f64, f64)>,
}

/// All computed outputs of a single run.
///
/// A degenerate dataset does not abort the run: front-ends still render the
/// page and show the error in place of the numbers.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub dataset: Dataset,
    pub stats: Option<DatasetStats>,
    pub outcome: Result<Fit, DegenerateInputError>,
}

impl Analysis {
    /// The fit, or the degenerate-input error as an [`AppError`].
    pub fn fit(&self) -> Result<&Fit, AppError> {
        self.outcome.as_ref().map_err(|e| AppError::from(*e))
    }
}

/// Run the pipeline on the compiled-in sample.
pub fn analyze_sample() -> Analysis {
    analyze(sample_dataset())
}

/// Run the pipeline on an arbitrary dataset.
pub fn analyze(dataset: Dataset) -> Analysis {
    let observations = &dataset.observations;
    let stats = compute_stats(observations);

    let outcome = compute_regression(observations).map(|result| {
        let matrix = fit_line_matrix(observations);
        if matrix.is_none() {
            warn!("matrix least squares did not converge");
        }
        Fit {
            result,
            sums: Sums::from_observations(observations),
            fitted: result.fitted(observations),
            matrix,
        }
    });

    match &outcome {
        Ok(fit) => debug!(
            n = fit.result.n,
            slope = fit.result.slope,
            intercept = fit.result.intercept,
            r = fit.result.correlation,
            "fitted regression line"
        ),
        Err(err) => warn!(%err, n = observations.len(), "regression failed"),
    }

    Analysis {
        dataset,
        stats,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    #[test]
    fn sample_analysis_succeeds() {
        let analysis = analyze_sample();
        let fit = analysis.fit().unwrap();
        assert_eq!(fit.fitted.len(), 6);
        assert_eq!(analysis.stats.as_ref().unwrap().n_points, 6);
        let (a, b) = fit.matrix.unwrap();
        assert!((a - fit.result.intercept).abs() < 1e-6 * fit.result.intercept.abs());
        assert!((b - fit.result.slope).abs() < 1e-6 * fit.result.slope.abs());
    }

    #[test]
    fn degenerate_dataset_keeps_table() {
        let mut dataset = sample_dataset();
        dataset.observations = vec![Observation::new("Jan", 1.0, 2.0)];
        let analysis = analyze(dataset);
        assert_eq!(analysis.dataset.observations.len(), 1);
        assert_eq!(
            analysis.outcome.as_ref().unwrap_err(),
            &DegenerateInputError::TooFewObservations(1)
        );
        assert_eq!(analysis.fit().unwrap_err().exit_code(), crate::error::EXIT_DEGENERATE);
    }
}
