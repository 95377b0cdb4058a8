//! Panel layout management
//!
//! Handles the arrangement of panels and terminal screen layout.

use ratatui::layout::{Constraint, Layout, Rect};

/// Areas of the dashboard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    /// Title and metric toggle
    pub header: Rect,
    /// Bar chart (left) and line chart (right)
    pub category_chart: Rect,
    pub trend_chart: Rect,
    /// Data tables, present only when shown
    pub tables: Option<TableAreas>,
    /// One-line status bar
    pub status_bar: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableAreas {
    pub category: Rect,
    pub trend: Rect,
}

/// Calculate panel layout for the dashboard.
///
/// Charts sit side by side; with tables shown the charts get 55% of the
/// body and the tables the rest, aligned under their chart.
pub fn calculate_layout(area: Rect, show_tables: bool) -> DashboardLayout {
    let [header, body, status_bar] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let (charts, tables) = if show_tables {
        let [charts, tables] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(body);
        (charts, Some(tables))
    } else {
        (body, None)
    };

    let [category_chart, trend_chart] = split_columns(charts);
    let tables = tables.map(|t| {
        let [category, trend] = split_columns(t);
        TableAreas { category, trend }
    });

    DashboardLayout {
        header,
        category_chart,
        trend_chart,
        tables,
        status_bar,
    }
}

fn split_columns(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
}

/// A popup of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
