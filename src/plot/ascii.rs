//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted line: `-`, drawn across the observed x-range

use crate::domain::{Observation, RegressionResult};

/// Labels for the two axes, shown in the plot header.
#[derive(Debug, Clone, Copy)]
pub struct AxisLabels<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

/// Render a scatter of `observations`, overlaid with the fitted line when present.
pub fn render_ascii_plot(
    observations: &[Observation],
    fit: Option<&RegressionResult>,
    labels: AxisLabels<'_>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = x_range(observations) else {
        return "Plot: no data\n".to_string();
    };

    let line = fit.map(|r| sample_line(r, x_min, x_max, width));

    // Determine y-range from observed points and line points.
    let (y_min, y_max) = y_range(observations, line.as_deref()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first (so points can overlay).
    if let Some(line) = &line {
        draw_curve(&mut grid, line, x_min, x_max, y_min, y_max);
    }

    for o in observations {
        let x = map_x(o.x, x_min, x_max, width);
        let y = map_y(o.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}=[{x_min:.2}, {x_max:.2}] | {}=[{y_min:.2}, {y_max:.2}]\n",
        labels.x, labels.y
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Observed x-range, widened by ±0.5 when every x is identical.
fn x_range(observations: &[Observation]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for o in observations {
        min_x = min_x.min(o.x);
        max_x = max_x.max(o.x);
    }
    if !(min_x.is_finite() && max_x.is_finite()) {
        return None;
    }
    if max_x - min_x < 1e-9 {
        return Some((min_x - 0.5, max_x + 0.5));
    }
    Some((min_x, max_x))
}

/// Evenly spaced points on the fitted line; shared with the TUI chart.
pub fn sample_line(fit: &RegressionResult, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, fit.predict(x)));
    }
    out
}

fn y_range(observations: &[Observation], line: Option<&[(f64, f64)]>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for o in observations {
        min_y = min_y.min(o.y);
        max_y = max_y.max(o.y);
    }
    if let Some(line) = line {
        for &(_, y) in line {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && max_y.is_finite() {
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XY: AxisLabels<'static> = AxisLabels { x: "x", y: "y" };

    fn identity_line() -> RegressionResult {
        RegressionResult {
            slope: 1.0,
            intercept: 0.0,
            correlation: 1.0,
            coefficient_of_determination: 1.0,
            n: 2,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let points = vec![Observation::new("a", 1.0, 1.0), Observation::new("b", 3.0, 3.0)];

        let txt = render_ascii_plot(&points, Some(&identity_line()), XY, 10, 5);
        let expected = concat!(
            "Plot: x=[1.00, 3.00] | y=[0.90, 3.10]\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn points_only_without_fit() {
        let points = vec![Observation::new("a", 1.0, 1.0), Observation::new("b", 3.0, 3.0)];
        let txt = render_ascii_plot(&points, None, XY, 10, 5);
        assert!(!txt.contains('-'));
        assert_eq!(txt.matches('o').count(), 2);
    }

    #[test]
    fn empty_input_renders_placeholder() {
        assert_eq!(render_ascii_plot(&[], None, XY, 10, 5), "Plot: no data\n");
    }

    #[test]
    fn sampled_line_spans_range() {
        let line = sample_line(&identity_line(), 2.0, 4.0, 3);
        assert_eq!(line, vec![(2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
    }
}
