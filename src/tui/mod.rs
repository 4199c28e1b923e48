//! Ratatui-based terminal UI.
//!
//! The TUI shows the page as a scrollable column on the left and the
//! scatter plot with its fitted line on the right. The worked solution can be
//! toggled in place.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::Analysis;
use crate::cli::PageArgs;
use crate::content::{self, Section};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::plot::sample_line;
use crate::report::{format_data_table, format_fit_summary, format_solution, wrap};

mod plotters_chart;

use plotters_chart::RegressionChart;

/// Start the TUI.
pub fn run(analysis: Analysis, args: &PageArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(analysis, args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    analysis: Analysis,
    predict_x: f64,
    show_solution: bool,
    scroll: u16,
    /// Page length and viewport height from the last draw, for scroll clamping.
    page_len: u16,
    view_height: u16,
    status: String,
}

impl App {
    fn new(analysis: Analysis, args: &PageArgs) -> Self {
        let status = match &analysis.outcome {
            Ok(_) => "Ready.".to_string(),
            Err(err) => format!("Regression unavailable: {err}"),
        };
        Self {
            analysis,
            predict_x: args.predict_x,
            show_solution: args.solution,
            scroll: 0,
            page_len: 0,
            view_height: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let page = self.view_height.max(1);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(page),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll = self.scroll.saturating_add(page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = u16::MAX,
            KeyCode::Char('s') => {
                if self.analysis.outcome.is_ok() {
                    self.show_solution = !self.show_solution;
                    self.status = if self.show_solution {
                        "Worked solution shown.".to_string()
                    } else {
                        "Worked solution hidden.".to_string()
                    };
                    debug!(show = self.show_solution, "toggled worked solution");
                }
            }
            _ => {}
        }
        self.scroll = self.scroll.min(self.max_scroll());
        false
    }

    fn max_scroll(&self) -> u16 {
        self.page_len.saturating_sub(self.view_height)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("acca", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {}", content::PAGE_TITLE)),
        ];
        if let Ok(fit) = &self.analysis.outcome {
            spans.push(Span::styled(
                format!(
                    " | {} | r={:.4} | r²={:.4}",
                    fit.result.equation(),
                    fit.result.correlation,
                    fit.result.coefficient_of_determination
                ),
                Style::default().fg(Color::Gray),
            ));
        }
        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_page(frame, chunks[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(chunks[1]);
        self.draw_chart(frame, right[0]);
        self.draw_summary(frame, right[1]);
    }

    fn draw_page(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(content::HEADING).borders(Borders::ALL);
        let inner = block.inner(area);

        let lines = page_lines(
            &self.analysis,
            inner.width as usize,
            self.show_solution,
            self.predict_x,
        );
        self.page_len = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.view_height = inner.height;
        self.scroll = self.scroll.min(self.max_scroll());

        let p = Paragraph::new(Text::from(lines))
            .block(block)
            .scroll((self.scroll, 0));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Production volume vs overhead").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = chart_series(&self.analysis) else {
            let msg = Paragraph::new("No data to plot.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = RegressionChart {
            line: &series.line,
            points: &series.points,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: &self.analysis.dataset.x_axis,
            y_label: &self.analysis.dataset.y_axis,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(
                frame,
                inner,
                chart_rect,
                insets,
                series.x_bounds,
                series.y_bounds,
                &self.analysis.dataset.x_axis,
                &self.analysis.dataset.y_axis,
            );
        }
    }

    fn draw_summary(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Regression").borders(Borders::ALL);
        let p = match &self.analysis.outcome {
            Ok(fit) => {
                let lines: Vec<Line> = format_fit_summary(&fit.result)
                    .lines()
                    .map(|l| Line::from(l.to_string()))
                    .collect();
                Paragraph::new(Text::from(lines))
            }
            Err(err) => Paragraph::new(format!("Regression unavailable: {err}."))
                .style(Style::default().fg(Color::Red)),
        };
        frame.render_widget(p.block(block), area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ scroll  PgUp/PgDn page  Home/End  s solution  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build the page body as styled lines wrapped to `width` columns.
fn page_lines(analysis: &Analysis, width: usize, show_solution: bool, predict_x: f64) -> Vec<Line<'static>> {
    let width = width.max(20);
    let mut out = Vec::new();

    for section in content::sections() {
        out.push(heading_line(section));
        out.push(Line::default());
        for block in section.blocks {
            push_block(&mut out, block, analysis, width, show_solution, predict_x);
        }
    }

    out
}

fn heading_line(section: &Section) -> Line<'static> {
    let style = if section.minor {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(section.heading, style))
}

fn push_block(
    out: &mut Vec<Line<'static>>,
    block: &content::Block,
    analysis: &Analysis,
    width: usize,
    show_solution: bool,
    predict_x: f64,
) {
    let plain = Style::default();
    match block {
        content::Block::Paragraph(text) => {
            out.extend(wrapped(text, width, "", "", plain));
            out.push(Line::default());
        }
        content::Block::Labeled { label, text } => {
            out.extend(labeled(label, text, width, "", ""));
            out.push(Line::default());
        }
        content::Block::Bullets(items) => {
            for item in *items {
                out.extend(wrapped(item, width, "  • ", "    ", plain));
            }
            out.push(Line::default());
        }
        content::Block::Numbered(items) => {
            for (i, (title, body)) in items.iter().enumerate() {
                let first = format!("{:>3}. ", i + 1);
                out.extend(labeled(&format!("{title}:"), body, width, &first, "     "));
            }
            out.push(Line::default());
        }
        content::Block::Terms(items) => {
            for (term, meaning) in *items {
                out.extend(labeled(&format!("{term}:"), meaning, width, "  • ", "    "));
            }
            out.push(Line::default());
        }
        content::Block::Equation(eq) => {
            out.push(
                Line::from(Span::styled(
                    eq.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center),
            );
            out.push(Line::default());
        }
        content::Block::DataTable => {
            let style = Style::default().fg(Color::White);
            out.extend(
                format_data_table(&analysis.dataset)
                    .lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), style))),
            );
            out.push(Line::default());
        }
        content::Block::Results => match &analysis.outcome {
            Ok(fit) if show_solution => {
                let style = Style::default().fg(Color::Green);
                out.extend(
                    format_solution(fit, &analysis.dataset, predict_x)
                        .lines()
                        .map(|l| Line::from(Span::styled(l.to_string(), style))),
                );
                out.push(Line::default());
            }
            Ok(_) => {
                out.extend(wrapped(
                    "Press s to reveal the worked solution.",
                    width,
                    "",
                    "",
                    Style::default().fg(Color::DarkGray),
                ));
                out.push(Line::default());
            }
            Err(err) => {
                out.extend(wrapped(
                    &format!("Regression unavailable: {err}."),
                    width,
                    "",
                    "",
                    Style::default().fg(Color::Red),
                ));
                out.push(Line::default());
            }
        },
        content::Block::Rule => {
            out.push(Line::from(Span::styled(
                "─".repeat(width),
                Style::default().fg(Color::DarkGray),
            )));
            out.push(Line::default());
        }
    }
}

fn wrapped(text: &str, width: usize, first: &str, rest: &str, style: Style) -> Vec<Line<'static>> {
    wrap(text, width, first, rest)
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect()
}

/// Wrapped text whose leading `label` is bold.
fn labeled(label: &str, text: &str, width: usize, first: &str, rest: &str) -> Vec<Line<'static>> {
    let lead = format!("{first}{label}");
    let mut lines = wrapped(&format!("{label} {text}"), width, first, rest, Style::default());
    if let Some(line) = lines.first_mut() {
        let joined: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        if let Some(tail) = joined.strip_prefix(&lead) {
            *line = Line::from(vec![
                Span::raw(first.to_string()),
                Span::styled(label.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(tail.to_string()),
            ]);
        }
    }
    lines
}

/// Data prepared for the chart widget.
struct ChartSeries {
    line: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Points, fitted line across the observed x-range, and padded bounds.
fn chart_series(analysis: &Analysis) -> Option<ChartSeries> {
    let stats = analysis.stats.as_ref()?;

    let points: Vec<(f64, f64)> = analysis
        .dataset
        .observations
        .iter()
        .map(|o| (o.x, o.y))
        .collect();

    let line = match &analysis.outcome {
        Ok(fit) => sample_line(&fit.result, stats.x_min, stats.x_max, 100),
        Err(_) => Vec::new(),
    };

    let (mut y_min, mut y_max) = (stats.y_min, stats.y_max);
    for &(_, y) in &line {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    Some(ChartSeries {
        line,
        points,
        x_bounds: padded(stats.x_min, stats.x_max),
        y_bounds: padded(y_min, y_max),
    })
}

fn padded(min: f64, max: f64) -> [f64; 2] {
    if !(min.is_finite() && max.is_finite()) || max <= min {
        return [min - 0.5, min + 0.5];
    }
    let pad = ((max - min).abs() * 0.05).max(1e-12);
    [min - pad, max + pad]
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.0}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

#[allow(clippy::too_many_arguments)]
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &str,
    y_label: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new(x_label.to_string())
                .alignment(Alignment::Center)
                .style(style),
            x_rect,
        );
    }

    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.saturating_sub(insets.right),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(y_label.to_string()).style(style.add_modifier(Modifier::BOLD)),
        y_rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{analyze, analyze_sample};

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn prose_wraps_to_width() {
        let analysis = analyze_sample();
        let table_width = format_data_table(&analysis.dataset)
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap();
        let lines = page_lines(&analysis, 40, false, 1400.0);
        // Only the monospace data table may exceed the column.
        for line in &lines {
            assert!(line.width() <= 40.max(table_width), "line too wide: {line:?}");
        }
        let body = text(&lines);
        assert!(body.contains("Top 10 Uses of Regression & Correlation in Accounting"));
        assert!(body.contains("Press s to reveal the worked solution."));
    }

    #[test]
    fn solution_toggle_adds_worked_answer() {
        let analysis = analyze_sample();
        let hidden = page_lines(&analysis, 80, false, 1400.0);
        let shown = page_lines(&analysis, 80, true, 1400.0);
        assert!(shown.len() > hidden.len());
        assert!(text(&shown).contains("£30,600.00"));
    }

    #[test]
    fn labels_are_bold() {
        let lines = labeled("Purpose:", "to predict things", 80, "  • ", "    ");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[1].content, "Purpose:");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn chart_line_spans_observed_range() {
        let series = chart_series(&analyze_sample()).unwrap();
        assert_eq!(series.points.len(), 6);
        assert_eq!(series.line.first().unwrap().0, 900.0);
        assert_eq!(series.line.last().unwrap().0, 1500.0);
        assert!(series.x_bounds[0] < 900.0 && series.x_bounds[1] > 1500.0);
    }

    #[test]
    fn degenerate_chart_has_points_but_no_line() {
        let mut dataset = crate::data::sample_dataset();
        for o in &mut dataset.observations {
            o.y = 1.0;
        }
        let analysis = analyze(dataset);
        let series = chart_series(&analysis).unwrap();
        assert!(series.line.is_empty());
        assert_eq!(series.points.len(), 6);
        assert!(series.y_bounds[1] > series.y_bounds[0]);
        let body = text(&page_lines(&analysis, 80, true, 1400.0));
        assert!(body.contains("every y value is identical"));
    }
}
