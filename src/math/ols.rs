//! Least squares in matrix form.
//!
//! The same straight line can be found by solving
//!
//! ```text
//! minimize ‖Xβ − y‖²,   X = [1 x_i],   β = (a, b)
//! ```
//!
//! which is how regression is usually presented once more than one
//! independent variable is involved. The worked solution shows this route next
//! to the closed form so the two can be compared.
//!
//! - We use SVD so tall design matrices (more rows than columns) are handled.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)

use nalgebra::{DMatrix, DVector};

use crate::domain::Observation;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y = a + bx` through the `[1, x]` design matrix.
///
/// Returns `(intercept, slope)`, or `None` for fewer than two observations or
/// a rank-deficient design (every x identical).
pub fn fit_line_matrix(observations: &[Observation]) -> Option<(f64, f64)> {
    let n = observations.len();
    if n < 2 {
        return None;
    }
    let first = observations[0].x;
    if observations.iter().all(|o| o.x == first) {
        return None;
    }

    let x = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { observations[i].x });
    let y = DVector::from_iterator(n, observations.iter().map(|o| o.y));

    let beta = solve_least_squares(&x, &y)?;
    Some((beta[0], beta[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn line_fit_through_observations() {
        let obs = vec![
            Observation::new("a", 1.0, 1.0),
            Observation::new("b", 2.0, 3.0),
            Observation::new("c", 3.0, 2.0),
        ];
        // b = 0.5, a = 1.0
        let (a, b) = fit_line_matrix(&obs).unwrap();
        assert!((a - 1.0).abs() < 1e-10);
        assert!((b - 0.5).abs() < 1e-10);
    }

    #[test]
    fn vertical_data_has_no_line() {
        let obs = vec![Observation::new("a", 4.0, 1.0), Observation::new("b", 4.0, 2.0)];
        assert!(fit_line_matrix(&obs).is_none());
        assert!(fit_line_matrix(&obs[..1]).is_none());
    }
}
