//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the fit
//! - printed as JSON by `acca fit --json`
//! - exported to CSV next to their fitted values

use serde::Serialize;

/// One row of the sample: a display label and an `(x, y)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}

/// The observation table together with its column headings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label_heading: String,
    pub x_heading: String,
    pub y_heading: String,
    /// Short axis label for x (e.g. `volume (units)`).
    pub x_axis: String,
    /// Short axis label for y (e.g. `overhead (£)`).
    pub y_axis: String,
    pub observations: Vec<Observation>,
}

/// Observed ranges of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Outcome of a simple linear regression `y = intercept + slope·x`.
///
/// `coefficient_of_determination` is always `correlation²` and `correlation`
/// always lies in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub coefficient_of_determination: f64,
    /// Number of observations the line was fitted on.
    pub n: usize,
}

impl RegressionResult {
    /// Point prediction on the fitted line.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Fitted value and residual for each observation, in input order.
    pub fn fitted(&self, observations: &[Observation]) -> Vec<Fitted> {
        observations
            .iter()
            .map(|o| {
                let y_fit = self.predict(o.x);
                Fitted {
                    observation: o.clone(),
                    y_fit,
                    residual: o.y - y_fit,
                }
            })
            .collect()
    }

    /// Render the line equation, e.g. `y = 10000.00 + 14.7143x`.
    pub fn equation(&self) -> String {
        let sign = if self.slope.is_sign_negative() { '-' } else { '+' };
        format!("y = {:.2} {sign} {:.4}x", self.intercept, self.slope.abs())
    }
}

/// A single observation with its fitted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fitted {
    pub observation: Observation,
    pub y_fit: f64,
    pub residual: f64,
}

/// A point prediction requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
}
