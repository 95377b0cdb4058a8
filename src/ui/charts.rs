//! Dashboard charts
//!
//! Left: categories ranked by the selected metric as horizontal bars, so
//! every category name stays readable. Right: the monthly trend as a line
//! with a point marker on each month. Both charts read from an already
//! loaded report and never touch the database.

use crate::report::{Metric, MetricSource, PeriodRow, Report, VIEW_NAME, format_metric};
use crate::ui::theme::Theme;
use chrono::{Datelike, Months, NaiveDate};
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};

/// Approximate width of one "Mon YYYY" x label plus spacing
const X_LABEL_WIDTH: u16 = 10;

pub fn category_title(metric: Metric) -> String {
    format!("{} by Category", metric.label())
}

pub fn trend_title(metric: Metric) -> String {
    format!("{} over Time (Monthly)", metric.label())
}

fn chart_block<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(format!(" {} ", title), theme.title))
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block, theme: &Theme) {
    let msg = format!("No rows in {}", VIEW_NAME);
    frame.render_widget(
        Paragraph::new(msg)
            .style(theme.chart_empty)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Bar length for a metric value. Revenue is scaled to cents so that bars
/// keep their relative lengths for small amounts.
fn bar_value(value: f64, metric: Metric) -> u64 {
    let scaled = match metric {
        Metric::Rentals => value,
        Metric::Revenue => value * 100.0,
    };
    scaled.max(0.0).round() as u64
}

/// Render the category bar chart, highest value first
pub fn render_category_chart(
    frame: &mut Frame,
    area: Rect,
    report: &Report,
    metric: Metric,
    focused: bool,
    theme: &Theme,
) {
    let block = chart_block(category_title(metric), focused, theme);
    let ranked = report.ranked_categories(metric);
    if ranked.is_empty() {
        render_empty(frame, area, block, theme);
        return;
    }

    let bars: Vec<Bar> = ranked
        .iter()
        .map(|row| {
            let value = row.metric_value(metric);
            Bar::default()
                .value(bar_value(value, metric))
                .label(Line::from(row.film_category.clone()))
                .text_value(format_metric(value, metric))
        })
        .collect();

    // Space the bars out when there is room for it
    let inner_height = area.height.saturating_sub(2) as usize;
    let gap = if inner_height >= bars.len() * 2 { 1 } else { 0 };

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(gap)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.bar_label)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

/// Render the monthly trend as a line with point markers
pub fn render_trend_chart(
    frame: &mut Frame,
    area: Rect,
    report: &Report,
    metric: Metric,
    focused: bool,
    theme: &Theme,
) {
    let block = chart_block(trend_title(metric), focused, theme);
    let periods = report.chronological_periods();
    let Some(axis) = MonthAxis::new(&periods, area.width) else {
        render_empty(frame, area, block, theme);
        return;
    };

    let points: Vec<(f64, f64)> = periods
        .iter()
        .map(|p| (axis.position(p.period), p.metric_value(metric)))
        .collect();
    let max_y = points.iter().map(|(_, y)| *y).fold(0.0, f64::max);
    let top = if max_y > 0.0 { max_y * 1.1 } else { 1.0 };

    let datasets = vec![
        Dataset::default()
            .name(metric.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.line)
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.marker)
            .data(&points),
    ];

    let x_axis = Axis::default()
        .style(theme.axis)
        .bounds([0.0, f64::from(axis.upper)])
        .labels(axis.labels().into_iter().map(Span::raw).collect::<Vec<_>>());
    let y_axis = Axis::default()
        .style(theme.axis)
        .bounds([0.0, top])
        .labels(vec![
            Span::raw(format_metric(0.0, metric)),
            Span::raw(format_metric(top / 2.0, metric)),
            Span::raw(format_metric(top, metric)),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(None);
    frame.render_widget(chart, area);
}

/// Month-granular x axis for the trend chart.
///
/// Positions are months since the first period, so gaps in the data keep
/// their real width. Labels fall every `step` months, at least every third
/// month once the range allows it, and more sparsely when the chart is too
/// narrow to fit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthAxis {
    first: NaiveDate,
    step: u32,
    upper: u32,
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

impl MonthAxis {
    /// None when there are no periods to plot
    pub(crate) fn new(periods: &[&PeriodRow], width: u16) -> Option<Self> {
        let first = periods.first()?.period;
        let last = periods.last()?.period;
        let span = u32::try_from(month_index(last) - month_index(first)).unwrap_or(0);

        let max_labels = u32::from((width.saturating_sub(2) / X_LABEL_WIDTH).max(2));
        let step = span
            .div_ceil(max_labels - 1)
            .max(span.min(3))
            .max(1);
        let upper = (span.div_ceil(step) * step).max(step);

        Some(Self { first, step, upper })
    }

    pub(crate) fn position(&self, date: NaiveDate) -> f64 {
        (month_index(date) - month_index(self.first)) as f64
    }

    /// Labels from the first period to the axis end, `step` months apart
    pub(crate) fn labels(&self) -> Vec<String> {
        (0..=self.upper / self.step)
            .map(|i| {
                self.first
                    .checked_add_months(Months::new(i * self.step))
                    .map(|d| d.format("%b %Y").to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{category, period};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use rust_decimal::Decimal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_report() -> Report {
        Report {
            record_count: 5,
            categories: vec![
                category("Action", 3, Decimal::ZERO),
                category("Comedy", 2, Decimal::new(1000, 2)),
            ],
            periods: vec![
                period(2022, 5, 3, Decimal::ZERO),
                period(2022, 6, 2, Decimal::new(1000, 2)),
            ],
        }
    }

    #[test]
    fn test_titles_follow_metric() {
        assert_eq!(category_title(Metric::Rentals), "Rentals by Category");
        assert_eq!(trend_title(Metric::Revenue), "Revenue over Time (Monthly)");
    }

    #[test]
    fn test_bar_value_scales_revenue() {
        assert_eq!(bar_value(3.0, Metric::Rentals), 3);
        assert_eq!(bar_value(10.5, Metric::Revenue), 1050);
        assert_eq!(bar_value(-1.0, Metric::Revenue), 0);
    }

    #[test]
    fn test_month_axis_every_third_month() {
        let periods: Vec<PeriodRow> = (1..=12).map(|m| period(2022, m, 1, Decimal::ONE)).collect();
        let refs: Vec<&PeriodRow> = periods.iter().collect();
        let axis = MonthAxis::new(&refs, 100).unwrap();
        assert_eq!(
            axis.labels(),
            vec!["Jan 2022", "Apr 2022", "Jul 2022", "Oct 2022", "Jan 2023"]
        );
        assert_eq!(axis.position(periods[11].period), 11.0);
    }

    #[test]
    fn test_month_axis_thins_when_narrow() {
        let periods: Vec<PeriodRow> = (1..=12).map(|m| period(2022, m, 1, Decimal::ONE)).collect();
        let refs: Vec<&PeriodRow> = periods.iter().collect();
        let axis = MonthAxis::new(&refs, 32).unwrap();
        // Room for three labels
        assert_eq!(axis.labels(), vec!["Jan 2022", "Jul 2022", "Jan 2023"]);
    }

    #[test]
    fn test_month_axis_keeps_gaps() {
        let periods = [period(2022, 1, 1, Decimal::ONE), period(2022, 3, 1, Decimal::ONE)];
        let refs: Vec<&PeriodRow> = periods.iter().collect();
        let axis = MonthAxis::new(&refs, 100).unwrap();
        assert_eq!(axis.position(periods[1].period), 2.0);
        assert_eq!(axis.labels(), vec!["Jan 2022", "Mar 2022"]);
    }

    #[test]
    fn test_month_axis_single_period() {
        let periods = [period(2022, 7, 1, Decimal::ONE)];
        let refs: Vec<&PeriodRow> = periods.iter().collect();
        let axis = MonthAxis::new(&refs, 100).unwrap();
        assert_eq!(axis.labels(), vec!["Jul 2022", "Aug 2022"]);
        assert!(MonthAxis::new(&[], 100).is_none());
    }

    #[test]
    fn test_render_charts() {
        let report = sample_report();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let [left, right] = Layout::horizontal([Constraint::Percentage(50); 2])
                    .areas(frame.area());
                let theme = Theme::default();
                render_category_chart(frame, left, &report, Metric::Revenue, true, &theme);
                render_trend_chart(frame, right, &report, Metric::Revenue, false, &theme);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Revenue by Category"));
        assert!(text.contains("Revenue over Time (Monthly)"));
        assert!(text.contains("Comedy"));
        assert!(text.contains("10.00"));
        assert!(text.contains("May 2022"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = Report {
            record_count: 0,
            categories: vec![],
            periods: vec![],
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let [left, right] = Layout::horizontal([Constraint::Percentage(50); 2])
                    .areas(frame.area());
                let theme = Theme::default();
                render_category_chart(frame, left, &report, Metric::Rentals, false, &theme);
                render_trend_chart(frame, right, &report, Metric::Rentals, false, &theme);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Rentals by Category"));
        assert!(text.contains("No rows in vw_rental_analysis"));
    }
}
