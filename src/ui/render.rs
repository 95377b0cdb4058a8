//! Top-level render function
//!
//! Orchestrates rendering of all panels using the layout module.

use crate::app::{App, PanelFocus, StatusLevel};
use crate::report::Metric;
use crate::ui::charts::{render_category_chart, render_trend_chart};
use crate::ui::data_table::TableData;
use crate::ui::help::HELP_LINE_COUNT;
use crate::ui::layout::{calculate_layout, centered_rect};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const DASHBOARD_TITLE: &str = "Pagila DWH Reporting";

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let show_tables = app.show_tables && app.report.is_some();
    let layout = calculate_layout(frame.area(), show_tables);

    render_header(frame, layout.header, app, theme);

    match &app.report {
        Some(report) => {
            render_category_chart(
                frame,
                layout.category_chart,
                report,
                app.metric,
                app.focus == PanelFocus::Charts,
                theme,
            );
            render_trend_chart(
                frame,
                layout.trend_chart,
                report,
                app.metric,
                app.focus == PanelFocus::Charts,
                theme,
            );
            if let Some(tables) = layout.tables {
                app.category_table.render(
                    frame,
                    tables.category,
                    &TableData::categories(report, app.metric),
                    app.focus == PanelFocus::CategoryTable,
                    theme,
                );
                app.trend_table.render(
                    frame,
                    tables.trend,
                    &TableData::periods(report),
                    app.focus == PanelFocus::TrendTable,
                    theme,
                );
            }
        }
        None => {
            let body = layout.category_chart.union(layout.trend_chart);
            render_placeholder(frame, body, app, theme);
        }
    }

    render_status_bar(frame, layout.status_bar, app, theme);

    if app.connection_dialog.is_visible() {
        let width = 64;
        let height = app.connection_dialog.required_height(width);
        let popup = centered_rect(width, height, frame.area());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Connect to PostgreSQL ")
            .border_style(theme.dialog_border);
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        app.connection_dialog.render(frame, inner, theme);
    }

    if app.help.is_visible() {
        let popup = centered_rect(60, HELP_LINE_COUNT as u16 + 2, frame.area());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(theme.border_focused);
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        app.help.render(frame, inner, theme);
    }
}

/// Title on the left, metric selector on the right
fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let option = |metric: Metric| {
        let (marker, style) = if app.metric == metric {
            ("(\u{2022})", theme.metric_active)
        } else {
            ("( )", theme.metric_inactive)
        };
        Span::styled(format!(" {} {} ", marker, metric.label()), style)
    };
    let selector = Line::from(vec![
        Span::styled("Metric [m]: ", theme.metric_inactive),
        option(Metric::Rentals),
        Span::raw(" "),
        option(Metric::Revenue),
    ]);
    let selector_width = selector.width() as u16;

    let [title_area, selector_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(selector_width)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(DASHBOARD_TITLE, theme.title)),
        title_area,
    );
    frame.render_widget(Paragraph::new(selector), selector_area);
}

/// Shown in place of the charts before a report has loaded
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let msg = if app.loading {
        "Loading report..."
    } else {
        "No report loaded. Press c to connect."
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_unfocused);
    frame.render_widget(
        Paragraph::new(msg)
            .style(theme.chart_empty)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let conn_info = match app.active_connection {
        Some(ref config) => format!("[{}]", config.display_name()),
        None => "[disconnected]".to_string(),
    };

    if let Some(ref status) = app.status_message {
        let style = match status.level {
            StatusLevel::Info => theme.status_info,
            StatusLevel::Success => theme.status_success,
            StatusLevel::Warning => theme.status_warning,
            StatusLevel::Error => theme.status_error,
        };
        let text = format!("{} {}", conn_info, status.message);
        frame.render_widget(Paragraph::new(text).style(style), area);
    } else {
        let text = format!("{} | Press ? for help, q to quit", conn_info);
        frame.render_widget(Paragraph::new(text).style(theme.status_idle), area);
    }
}
