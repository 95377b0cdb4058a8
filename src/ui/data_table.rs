//! Data table viewer
//!
//! Shows one aggregate exactly as it is charted: the category table in
//! ranked order for the current metric, the trend table in calendar order.

use crate::report::{CategoryRow, Metric, PeriodRow, Report};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use rust_decimal::Decimal;
use unicode_width::UnicodeWidthStr;

/// Rows moved by PgUp / PgDn
const PAGE_SIZE: usize = 20;

/// A table's content, formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

impl TableData {
    /// Category aggregate, in the order the bar chart shows it
    pub fn categories(report: &Report, metric: Metric) -> Self {
        let rows = report
            .ranked_categories(metric)
            .into_iter()
            .map(|row: &CategoryRow| {
                vec![
                    row.film_category.clone(),
                    row.total_rentals.to_string(),
                    money(row.total_revenue),
                ]
            })
            .collect();
        Self {
            title: format!("Category Summary (by {})", metric.label()),
            columns: vec!["film_category", "total_rentals", "total_revenue"],
            rows,
        }
    }

    /// Time aggregate, in the order the line chart shows it
    pub fn periods(report: &Report) -> Self {
        let rows = report
            .chronological_periods()
            .into_iter()
            .map(|row: &PeriodRow| {
                vec![
                    row.year.to_string(),
                    row.month.to_string(),
                    row.month_name.clone(),
                    row.total_rentals.to_string(),
                    money(row.total_revenue),
                    row.period.format("%Y-%m-%d").to_string(),
                ]
            })
            .collect();
        Self {
            title: "Monthly Trend".to_string(),
            columns: vec![
                "year",
                "month",
                "month_name",
                "total_rentals",
                "total_revenue",
                "period_date",
            ],
            rows,
        }
    }

    /// Column widths from header names and cell contents
    fn column_widths(&self) -> Vec<u16> {
        let mut widths: Vec<u16> = self.columns.iter().map(|c| c.width() as u16).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.width() as u16);
                }
            }
        }
        for w in &mut widths {
            *w = (*w).clamp(4, 40);
        }
        widths
    }
}

/// Scroll state of one data table
#[derive(Debug, Default)]
pub struct DataTable {
    selected_row: usize,
    row_count: usize,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for freshly loaded data
    pub fn reset(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.selected_row = 0;
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.row_count > 0 && self.selected_row < self.row_count - 1 {
            self.selected_row += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(PAGE_SIZE);
    }

    pub fn page_down(&mut self) {
        self.selected_row = (self.selected_row + PAGE_SIZE).min(self.row_count.saturating_sub(1));
    }

    pub fn go_to_top(&mut self) {
        self.selected_row = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_row = self.row_count.saturating_sub(1);
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        data: &TableData,
        focused: bool,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused))
            .title(Span::styled(format!(" {} ", data.title), theme.title));

        if data.rows.is_empty() {
            frame.render_widget(
                Paragraph::new("No rows").style(theme.chart_empty).block(block),
                area,
            );
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 {
            return;
        }
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let header = Row::new(data.columns.iter().map(|c| Cell::from(*c))).style(theme.table_header);
        let rows = data.rows.iter().enumerate().map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row_even
            } else {
                theme.table_row_odd
            };
            Row::new(row.iter().map(|v| Cell::from(v.as_str()))).style(style)
        });
        let widths = data.column_widths().into_iter().map(Constraint::Length);

        let mut table = Table::new(rows, widths).header(header).column_spacing(2);
        if focused {
            table = table.highlight_style(theme.table_selected);
        }

        let selected = self.selected_row.min(data.rows.len() - 1);
        let mut state = TableState::default().with_selected(Some(selected));
        frame.render_stateful_widget(table, table_area, &mut state);

        let footer = format!("Row {}/{}", selected + 1, data.rows.len());
        frame.render_widget(Paragraph::new(footer).style(theme.table_footer), footer_area);
    }
}
