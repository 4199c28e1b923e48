//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math code stays clean and testable
//! - the text report and the TUI show identical tables and numbers

use crate::app::pipeline::{Analysis, Fit};
use crate::content::{self, Block, Section};
use crate::domain::{Dataset, Fitted, RegressionResult};
use crate::plot::{AxisLabels, render_ascii_plot};

/// Column width used for wrapped prose.
pub const TEXT_WIDTH: usize = 78;

/// What to include in the text page.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    pub solution: bool,
    pub predict_x: f64,
    /// `(width, height)` of the ASCII chart, or `None` to skip it.
    pub plot: Option<(usize, usize)>,
}

/// Format the whole page: prose, data table, fit summary, chart, solution.
pub fn format_page(analysis: &Analysis, opts: &PageOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n\n", content::PAGE_TITLE));

    for section in content::sections() {
        out.push_str(&format_heading(section));
        for block in section.blocks {
            out.push_str(&format_block(block, analysis, opts));
        }
        out.push('\n');
    }

    out
}

fn format_heading(section: &Section) -> String {
    let underline = if section.minor { '-' } else { '=' };
    let len = section.heading.chars().count();
    format!("{}\n{}\n\n", section.heading, underline.to_string().repeat(len))
}

fn format_block(block: &Block, analysis: &Analysis, opts: &PageOptions) -> String {
    match block {
        Block::Paragraph(text) => format!("{}\n", wrap(text, TEXT_WIDTH, "", "")),
        Block::Labeled { label, text } => {
            format!("{}\n", wrap(&format!("{label} {text}"), TEXT_WIDTH, "", ""))
        }
        Block::Bullets(items) => {
            let mut out = String::new();
            for item in *items {
                out.push_str(&wrap(item, TEXT_WIDTH, "  * ", "    "));
            }
            out.push('\n');
            out
        }
        Block::Numbered(items) => {
            let mut out = String::new();
            for (i, (title, body)) in items.iter().enumerate() {
                let first = format!("{:>3}. ", i + 1);
                out.push_str(&wrap(&format!("{title}: {body}"), TEXT_WIDTH, &first, "     "));
            }
            out.push('\n');
            out
        }
        Block::Terms(items) => {
            let mut out = String::new();
            for (term, meaning) in *items {
                out.push_str(&wrap(&format!("{term}: {meaning}"), TEXT_WIDTH, "  * ", "    "));
            }
            out.push('\n');
            out
        }
        Block::Equation(eq) => format!("        {eq}\n\n"),
        Block::DataTable => format!("{}\n", format_data_table(&analysis.dataset)),
        Block::Results => format_results(analysis, opts),
        Block::Rule => format!("{}\n\n", "-".repeat(TEXT_WIDTH)),
    }
}

/// Fit summary, optional chart, optional worked solution.
fn format_results(analysis: &Analysis, opts: &PageOptions) -> String {
    let mut out = String::new();

    let fit = match &analysis.outcome {
        Ok(fit) => Some(fit),
        Err(err) => {
            out.push_str(&format!("Regression unavailable: {err}.\n\n"));
            None
        }
    };

    if let Some(fit) = fit {
        out.push_str(&format_fit_summary(&fit.result));
        out.push('\n');
    }

    if let Some((width, height)) = opts.plot {
        let labels = AxisLabels {
            x: &analysis.dataset.x_axis,
            y: &analysis.dataset.y_axis,
        };
        out.push_str(&render_ascii_plot(
            &analysis.dataset.observations,
            fit.map(|f| &f.result),
            labels,
            width,
            height,
        ));
        out.push('\n');
    }

    if let (true, Some(fit)) = (opts.solution, fit) {
        out.push_str(&format_solution(fit, &analysis.dataset, opts.predict_x));
        out.push('\n');
    }

    out
}

/// Format the observation table.
pub fn format_data_table(dataset: &Dataset) -> String {
    let rows: Vec<[String; 3]> = dataset
        .observations
        .iter()
        .map(|o| [o.label.clone(), fmt_value(o.x), fmt_value(o.y)])
        .collect();
    let headings = [
        dataset.label_heading.as_str(),
        dataset.x_heading.as_str(),
        dataset.y_heading.as_str(),
    ];
    format_table(&headings, &rows)
}

/// Format fitted values and residuals next to each observation.
pub fn format_fitted_table(fitted: &[Fitted], dataset: &Dataset) -> String {
    let rows: Vec<[String; 4]> = fitted
        .iter()
        .map(|f| {
            [
                f.observation.label.clone(),
                fmt_value(f.observation.x),
                fmt_grouped(f.y_fit, 2),
                fmt_grouped(f.residual, 2),
            ]
        })
        .collect();
    let headings = [
        dataset.label_heading.as_str(),
        dataset.x_axis.as_str(),
        "fitted ŷ",
        "residual (y − ŷ)",
    ];
    format_table(&headings, &rows)
}

/// Right-aligned table with a left-aligned first column.
fn format_table<const N: usize>(headings: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = [0usize; N];
    for (i, h) in headings.iter().enumerate() {
        widths[i] = h.chars().count();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&render_row(headings.iter().copied(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        out.push_str(&render_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(i, (c, &w))| {
            if i == 0 {
                format!("{c:<w$}")
            } else {
                format!("{c:>w$}")
            }
        })
        .collect();
    format!("{}\n", parts.join("  ").trim_end())
}

/// Format the regression line and goodness of fit.
pub fn format_fit_summary(result: &RegressionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Fitted line: {}\n", result.equation()));
    out.push_str(&format!("- slope b (variable cost per unit) : {:.4}\n", result.slope));
    out.push_str(&format!("- intercept a (fixed cost)          : {}\n", fmt_grouped(result.intercept, 2)));
    out.push_str(&format!("- correlation r                     : {:.4}\n", result.correlation));
    out.push_str(&format!(
        "- coefficient of determination r²   : {:.4}\n",
        result.coefficient_of_determination
    ));
    out
}

/// Format the step-by-step answer to the exercise question.
pub fn format_solution(fit: &Fit, dataset: &Dataset, predict_x: f64) -> String {
    let s = &fit.sums;
    let r = &fit.result;
    let mut out = String::new();

    out.push_str("Worked solution:\n");
    out.push_str(&format!("  n   = {}\n", s.n));
    out.push_str(&format!("  Σx  = {:<18} Σy  = {}\n", fmt_grouped(s.sum_x, 0), fmt_grouped(s.sum_y, 0)));
    out.push_str(&format!("  Σxy = {:<18} Σx² = {}\n", fmt_grouped(s.sum_xy, 0), fmt_grouped(s.sum_xx, 0)));
    out.push_str(&format!("  Σy² = {}\n\n", fmt_grouped(s.sum_yy, 0)));

    out.push_str("  b = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)\n");
    out.push_str(&format!(
        "    = {} / {} = {:.4}\n",
        fmt_grouped(s.cross_term(), 0),
        fmt_grouped(s.x_term(), 0),
        r.slope
    ));
    out.push_str("  a = (Σy − bΣx) / n\n");
    out.push_str(&format!(
        "    = ({} − {:.4} × {}) / {} = {}\n",
        fmt_grouped(s.sum_y, 0),
        r.slope,
        fmt_grouped(s.sum_x, 0),
        s.n,
        fmt_grouped(r.intercept, 2)
    ));
    out.push_str("  r = (nΣxy − ΣxΣy) / √[(nΣx² − (Σx)²)(nΣy² − (Σy)²)]\n");
    out.push_str(&format!(
        "    = {:.4}, r² = {:.4}\n",
        r.correlation, r.coefficient_of_determination
    ));

    match fit.matrix {
        Some((a, b)) => {
            let agrees = relative_eq(a, r.intercept) && relative_eq(b, r.slope);
            out.push_str(&format!(
                "  matrix form (SVD): a = {}, b = {:.4} ({})\n\n",
                fmt_grouped(a, 2),
                b,
                if agrees { "matches" } else { "differs" }
            ));
        }
        None => out.push_str("  matrix form (SVD): not solvable\n\n"),
    }

    out.push_str(&format!(
        "  Estimate for {} units: y = {} + {:.4} × {} = £{}\n\n",
        fmt_grouped(predict_x, 0),
        fmt_grouped(r.intercept, 2),
        r.slope,
        fmt_grouped(predict_x, 0),
        fmt_grouped(r.predict(predict_x), 2)
    ));

    out.push_str(&format_fitted_table(&fit.fitted, dataset));
    out
}

/// Format the numbers-only output of `acca fit`.
pub fn format_fit(result: &RegressionResult, predict_x: f64) -> String {
    let mut out = format_fit_summary(result);
    out.push_str(&format!(
        "- prediction at x = {}           : {}\n",
        fmt_grouped(predict_x, 0),
        fmt_grouped(result.predict(predict_x), 2)
    ));
    out
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

/// Whole numbers without decimals, everything else with two.
pub fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        fmt_grouped(v, 0)
    } else {
        fmt_grouped(v, 2)
    }
}

/// Fixed decimals with `,` thousands separators, e.g. `-12,345.68`.
pub fn fmt_grouped(v: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, v.abs());
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if v.is_sign_negative() && digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    let len = int.len();
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Greedy word wrap with separate first-line and continuation prefixes.
///
/// Every output line ends with `\n`.
pub fn wrap(text: &str, width: usize, first: &str, rest: &str) -> String {
    let mut out = String::new();
    let mut line = String::from(first);
    let mut line_len = first.chars().count();
    let mut empty = true;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !empty && line_len + 1 + word_len > width {
            out.push_str(&line);
            out.push('\n');
            line = String::from(rest);
            line_len = rest.chars().count();
            empty = true;
        }
        if !empty {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
        empty = false;
    }

    out.push_str(&line);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze_sample;

    #[test]
    fn grouped_numbers() {
        assert_eq!(fmt_grouped(0.0, 0), "0");
        assert_eq!(fmt_grouped(999.0, 0), "999");
        assert_eq!(fmt_grouped(1000.0, 0), "1,000");
        assert_eq!(fmt_grouped(4_479_000_000.0, 0), "4,479,000,000");
        assert_eq!(fmt_grouped(-12345.678, 2), "-12,345.68");
        assert_eq!(fmt_grouped(-0.001, 2), "0.00");
        assert_eq!(fmt_value(25000.0), "25,000");
        assert_eq!(fmt_value(2.5), "2.50");
    }

    #[test]
    fn wrap_respects_width_and_prefixes() {
        let txt = wrap("aaa bbb ccc ddd", 9, "* ", "  ");
        assert_eq!(txt, "* aaa bbb\n  ccc ddd\n");
        assert_eq!(wrap("", 10, "", ""), "\n");
    }

    #[test]
    fn data_table_lists_months() {
        let table = format_data_table(&crate::data::sample_dataset());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "Month  Production Volume (Units)  Total Overhead Costs (£)"
        );
        assert_eq!(
            lines[2],
            "Jan                        1,000                    25,000"
        );
    }

    #[test]
    fn page_contains_every_section() {
        let analysis = analyze_sample();
        let opts = PageOptions {
            solution: false,
            predict_x: 1400.0,
            plot: Some((60, 15)),
        };
        let page = format_page(&analysis, &opts);
        for section in content::sections() {
            assert!(page.contains(section.heading), "missing {}", section.heading);
        }
        assert!(page.contains("  1. Cost Behavior Analysis:"));
        assert!(page.contains(" 10. Fraud Detection and Risk Assessment:"));
        assert!(page.contains("Fitted line: y = 10000.00 + 14.7143x"));
        assert!(page.contains("Plot: volume (units)=[900.00, 1500.00]"));
        assert!(!page.contains("Worked solution"));
    }

    #[test]
    fn solution_answers_exercise_question() {
        let analysis = analyze_sample();
        let opts = PageOptions {
            solution: true,
            predict_x: 1400.0,
            plot: None,
        };
        let page = format_page(&analysis, &opts);
        assert!(page.contains("Worked solution:"));
        assert!(page.contains("= 20,600,000 / 1,400,000 = 14.7143"));
        assert!(page.contains("Estimate for 1,400 units: y = 10,000.00 + 14.7143 × 1,400 = £30,600.00"));
        assert!(page.contains("(matches)"));
        assert!(!page.contains("Plot:"));
    }

    #[test]
    fn degenerate_analysis_reports_error() {
        let mut dataset = crate::data::sample_dataset();
        for o in &mut dataset.observations {
            o.x = 1000.0;
        }
        let analysis = crate::app::pipeline::analyze(dataset);
        let opts = PageOptions {
            solution: true,
            predict_x: 1400.0,
            plot: Some((40, 10)),
        };
        let page = format_page(&analysis, &opts);
        assert!(page.contains("Regression unavailable: every x value is identical"));
        assert!(!page.contains("Worked solution"));
        assert!(page.contains("Plot:"));
    }
}
