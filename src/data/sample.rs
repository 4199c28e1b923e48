//! The cost-estimation exercise dataset.
//!
//! Six months of production volume (units) against total production overhead
//! (£) for a manufacturing company.

use crate::domain::{Dataset, DatasetStats, Observation};

/// `(month, production volume, total overhead)` rows, in display order.
const SAMPLE_ROWS: [(&str, f64, f64); 6] = [
    ("Jan", 1000.0, 25000.0),
    ("Feb", 1200.0, 28000.0),
    ("Mar", 900.0, 23000.0),
    ("Apr", 1500.0, 32000.0),
    ("May", 1100.0, 26000.0),
    ("Jun", 1300.0, 29000.0),
];

/// Production volume the exercise asks us to estimate overhead for.
pub const EXERCISE_VOLUME: f64 = 1400.0;

/// The fixed six observations.
pub fn sample_observations() -> Vec<Observation> {
    SAMPLE_ROWS
        .iter()
        .map(|&(label, x, y)| Observation::new(label, x, y))
        .collect()
}

/// The fixed observations with their table headings.
pub fn sample_dataset() -> Dataset {
    Dataset {
        label_heading: "Month".to_string(),
        x_heading: "Production Volume (Units)".to_string(),
        y_heading: "Total Overhead Costs (£)".to_string(),
        x_axis: "volume (units)".to_string(),
        y_axis: "overhead (£)".to_string(),
        observations: sample_observations(),
    }
}

/// Observed x/y ranges, or `None` for an empty slice or non-finite values.
pub fn compute_stats(points: &[Observation]) -> Option<DatasetStats> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for p in points {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return None;
        }
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_points: points.len(),
        x_min,
        x_max,
        y_min,
        y_max,
    })
}
