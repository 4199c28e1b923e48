//! Static page copy.
//!
//! The page is a fixed sequence of sections. Front-ends walk it in order and
//! insert the live pieces (data table, chart, worked solution) at the
//! [`Block::DataTable`] and [`Block::Results`] markers.

/// Window/page title.
pub const PAGE_TITLE: &str = "ACCA Regression & Accounting Uses";

/// Main heading shown at the top of the page.
pub const HEADING: &str = "Understanding Linear Regression in Accounting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Paragraph(&'static str),
    /// A paragraph with a bold lead-in, e.g. `**Purpose:** ...`.
    Labeled {
        label: &'static str,
        text: &'static str,
    },
    Bullets(&'static [&'static str]),
    /// Numbered list items as `(title, body)`.
    Numbered(&'static [(&'static str, &'static str)]),
    /// Definition list as `(term, meaning)`.
    Terms(&'static [(&'static str, &'static str)]),
    Equation(&'static str),
    DataTable,
    /// Fit summary and, when enabled, the worked solution.
    Results,
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    /// `true` for sub-headings.
    pub minor: bool,
    pub blocks: &'static [Block],
}

pub static INTRODUCTION: Section = Section {
    heading: HEADING,
    minor: false,
    blocks: &[
        Block::Rule,
        Block::Paragraph(
            "This application explores the concept of linear regression, a powerful statistical tool \
             for understanding relationships between variables, particularly useful in various \
             accounting and financial contexts. It draws inspiration from ACCA's technical articles \
             on the subject.",
        ),
    ],
};

pub static EXERCISE: Section = Section {
    heading: "ACCA-Inspired Exercise: Cost Estimation",
    minor: false,
    blocks: &[
        Block::Paragraph(
            "Imagine a manufacturing company wants to understand the relationship between its \
             production volume and total production overhead costs. They've collected the following \
             data for the past 6 months:",
        ),
        Block::DataTable,
        Block::Labeled {
            label: "Exercise Question:",
            text: "Using the principles of linear regression (y = a + bx), how would you estimate the \
                   total overhead costs if the company plans to produce 1,400 units next month?",
        },
        Block::Bullets(&[
            "Identify the dependent (y) and independent (x) variables.",
            "Recall the formulas for calculating 'a' (y-intercept) and 'b' (slope).",
            "Consider the steps involved before revealing the worked solution.",
        ]),
        Block::Results,
        Block::Rule,
    ],
};

pub static EXPLANATION: Section = Section {
    heading: "Further Explanation of Linear Regression",
    minor: false,
    blocks: &[Block::Paragraph(
        "Linear regression is a statistical method used to model the relationship between a \
         dependent variable and one or more independent variables by fitting a linear equation \
         to observed data.",
    )],
};

pub static EQUATION: Section = Section {
    heading: "The Linear Regression Equation:",
    minor: true,
    blocks: &[
        Block::Equation("y = a + bx"),
        Block::Paragraph("Where:"),
        Block::Terms(&[
            (
                "y",
                "The dependent variable (the variable you are trying to predict or explain).",
            ),
            ("x", "The independent variable (the variable used to predict or explain y)."),
            (
                "a (or b0)",
                "The Y-intercept. This is the value of y when x is 0. In accounting, it often \
                 represents fixed costs.",
            ),
            (
                "b (or b1)",
                "The slope of the regression line. It represents the change in y for every \
                 one-unit change in x. In accounting, this often relates to variable costs per unit.",
            ),
        ]),
    ],
};

pub static KEY_CONCEPTS: Section = Section {
    heading: "Key Concepts:",
    minor: true,
    blocks: &[
        Block::Terms(&[
            (
                "Purpose",
                "To predict future values of the dependent variable or to understand the strength \
                 and direction of the relationship between variables.",
            ),
            (
                "Assumptions",
                "For reliable results, linear regression assumes a linear relationship, \
                 independence of observations, homoscedasticity (constant variance of residuals), \
                 and normally distributed residuals.",
            ),
            (
                "Coefficient of Determination (r²)",
                "Often displayed alongside regression results, r² indicates the proportion of the \
                 variance in the dependent variable that can be predicted from the independent \
                 variable(s). A higher r² suggests a better fit of the model to the data.",
            ),
        ]),
        Block::Rule,
    ],
};

pub static ACCOUNTING_USES: Section = Section {
    heading: "Top 10 Uses of Regression & Correlation in Accounting",
    minor: false,
    blocks: &[
        Block::Paragraph(
            "Here's how regression and correlation analysis can be applied in an accounting context:",
        ),
        Block::Numbered(&[
            (
                "Cost Behavior Analysis",
                "To understand and predict how different types of costs (e.g., variable, fixed, \
                 semi-variable) behave in relation to changes in activity levels (e.g., production \
                 units, sales volume). This is crucial for budgeting and cost control.",
            ),
            (
                "Budgeting and Forecasting",
                "Developing more accurate budgets and financial forecasts by identifying the \
                 relationship between key financial variables (e.g., sales revenue and advertising \
                 spend, or production volume and direct materials cost).",
            ),
            (
                "Variance Analysis",
                "Investigating the causes of variances by correlating operational factors (e.g., \
                 machine hours, labor efficiency) with cost deviations to pinpoint areas for \
                 improvement.",
            ),
            (
                "Sales Forecasting",
                "Predicting future sales volumes and revenues based on historical data and \
                 correlated factors like marketing expenditure, economic indicators, or seasonal \
                 trends.",
            ),
            (
                "Overhead Absorption Rate Calculation",
                "Establishing a more accurate basis for absorbing overheads by analyzing the \
                 relationship between overhead costs and relevant cost drivers (e.g., direct labor \
                 hours, machine hours).",
            ),
            (
                "Break-Even Analysis",
                "Enhancing break-even calculations by using regression to better estimate fixed and \
                 variable cost components from mixed costs.",
            ),
            (
                "Performance Evaluation",
                "Assessing the relationship between management actions (independent variables) and \
                 financial outcomes (dependent variables) to evaluate the effectiveness of \
                 strategies or operational changes.",
            ),
            (
                "Pricing Decisions",
                "Analyzing the correlation between price changes and sales volume (price elasticity \
                 of demand) to inform optimal pricing strategies.",
            ),
            (
                "Working Capital Management",
                "Forecasting working capital needs by understanding the relationship between sales \
                 levels and components like accounts receivable, inventory, and accounts payable.",
            ),
            (
                "Fraud Detection and Risk Assessment",
                "Identifying unusual patterns or anomalies in financial data by looking for \
                 deviations from expected correlations between different accounts or transactions, \
                 potentially signaling fraudulent activities or areas of higher financial risk.",
            ),
        ]),
    ],
};

/// All sections in display order.
pub fn sections() -> [&'static Section; 6] {
    [
        &INTRODUCTION,
        &EXERCISE,
        &EXPLANATION,
        &EQUATION,
        &KEY_CONCEPTS,
        &ACCOUNTING_USES,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_accounting_uses() {
        let Some(Block::Numbered(items)) = ACCOUNTING_USES
            .blocks
            .iter()
            .find(|b| matches!(b, Block::Numbered(_)))
        else {
            panic!("uses section has no numbered list");
        };
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].0, "Cost Behavior Analysis");
        assert_eq!(items[9].0, "Fraud Detection and Risk Assessment");
    }

    #[test]
    fn table_and_chart_appear_once() {
        let blocks = || sections().into_iter().flat_map(|s| s.blocks.iter());
        assert_eq!(blocks().filter(|b| **b == Block::DataTable).count(), 1);
        assert_eq!(blocks().filter(|b| **b == Block::Results).count(), 1);
    }
}
