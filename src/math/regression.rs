//! Closed-form simple linear regression and Pearson correlation.
//!
//! With `n` observations and the raw sums `Σx, Σy, Σxy, Σx², Σy²`:
//!
//! ```text
//! b = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)
//! a = (Σy − bΣx) / n
//! r = (nΣxy − ΣxΣy) / sqrt[(nΣx² − (Σx)²)(nΣy² − (Σy)²)]
//! ```
//!
//! The fit itself is evaluated from mean-centred moments
//! (`Sxy = Σ(x − x̄)(y − ȳ)` and friends), which equal the numerators and
//! denominators above divided by `n` but do not cancel when the data sits far
//! from zero. [`Sums`] keeps the raw form for display.
//!
//! Inputs for which these are undefined are rejected with
//! [`DegenerateInputError`]; the result never carries NaN or infinity.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{Observation, RegressionResult};

/// Why a set of observations cannot be regressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateInputError {
    #[error("need at least two observations, got {0}")]
    TooFewObservations(usize),
    #[error("every x value is identical, so the slope is undefined")]
    ConstantX,
    #[error("every y value is identical, so the correlation is undefined")]
    ConstantY,
    #[error("observation {index} has a non-finite value")]
    NonFinite { index: usize },
    #[error("values are too large or too close together to fit in double precision")]
    Unstable,
}

/// Raw sums the closed-form solution is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sums {
    pub n: usize,
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xy: f64,
    pub sum_xx: f64,
    pub sum_yy: f64,
}

impl Sums {
    pub fn from_observations(observations: &[Observation]) -> Self {
        observations.iter().fold(
            Sums {
                n: observations.len(),
                sum_x: 0.0,
                sum_y: 0.0,
                sum_xy: 0.0,
                sum_xx: 0.0,
                sum_yy: 0.0,
            },
            |mut acc, o| {
                acc.sum_x += o.x;
                acc.sum_y += o.y;
                acc.sum_xy += o.x * o.y;
                acc.sum_xx += o.x * o.x;
                acc.sum_yy += o.y * o.y;
                acc
            },
        )
    }

    /// `nΣxy − ΣxΣy`
    pub fn cross_term(&self) -> f64 {
        self.n as f64 * self.sum_xy - self.sum_x * self.sum_y
    }

    /// `nΣx² − (Σx)²`
    pub fn x_term(&self) -> f64 {
        self.n as f64 * self.sum_xx - self.sum_x * self.sum_x
    }

    /// `nΣy² − (Σy)²`
    pub fn y_term(&self) -> f64 {
        self.n as f64 * self.sum_yy - self.sum_y * self.sum_y
    }
}

/// Rounding overshoot of `|r|` past 1 that is still clamped rather than rejected.
const CORRELATION_SLACK: f64 = 1e-9;

/// Means and centred second moments.
struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxy: f64,
    sxx: f64,
    syy: f64,
}

impl Moments {
    fn from_observations(observations: &[Observation]) -> Self {
        let n = observations.len() as f64;
        let mean_x = observations.iter().map(|o| o.x).sum::<f64>() / n;
        let mean_y = observations.iter().map(|o| o.y).sum::<f64>() / n;

        let (sxy, sxx, syy) = observations.iter().fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), o| {
            let dx = o.x - mean_x;
            let dy = o.y - mean_y;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        });

        Moments { mean_x, mean_y, sxy, sxx, syy }
    }

    fn is_finite(&self) -> bool {
        [self.mean_x, self.mean_y, self.sxy, self.sxx, self.syy]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Fit `y = a + bx` by ordinary least squares and compute Pearson's `r`.
pub fn compute_regression(observations: &[Observation]) -> Result<RegressionResult, DegenerateInputError> {
    let n = observations.len();
    if n < 2 {
        return Err(DegenerateInputError::TooFewObservations(n));
    }
    if let Some(index) = observations
        .iter()
        .position(|o| !(o.x.is_finite() && o.y.is_finite()))
    {
        return Err(DegenerateInputError::NonFinite { index });
    }

    let first = &observations[0];
    if observations.iter().all(|o| o.x == first.x) {
        return Err(DegenerateInputError::ConstantX);
    }
    if observations.iter().all(|o| o.y == first.y) {
        return Err(DegenerateInputError::ConstantY);
    }

    let moments = Moments::from_observations(observations);
    if !moments.is_finite() {
        return Err(DegenerateInputError::Unstable);
    }
    // Distinct values can still round to the same deviation when they sit far from zero.
    if !(moments.sxx > 0.0 && moments.syy > 0.0) {
        return Err(DegenerateInputError::Unstable);
    }

    let slope = moments.sxy / moments.sxx;
    let intercept = moments.mean_y - slope * moments.mean_x;
    // `Sxx·Syy` overflows for large finite data even when both roots are fine.
    let correlation = moments.sxy / (moments.sxx.sqrt() * moments.syy.sqrt());

    if !(slope.is_finite() && intercept.is_finite() && correlation.is_finite()) {
        return Err(DegenerateInputError::Unstable);
    }
    if correlation.abs() > 1.0 + CORRELATION_SLACK {
        return Err(DegenerateInputError::Unstable);
    }

    let correlation = correlation.clamp(-1.0, 1.0);

    Ok(RegressionResult {
        slope,
        intercept,
        correlation,
        coefficient_of_determination: correlation * correlation,
        n,
    })
}
