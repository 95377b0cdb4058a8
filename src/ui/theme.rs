//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all UI components.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // Header
    pub title: Style,
    pub metric_active: Style,
    pub metric_inactive: Style,

    // Charts
    pub bar: Style,
    pub bar_value: Style,
    pub bar_label: Style,
    pub line: Style,
    pub marker: Style,
    pub axis: Style,
    pub chart_empty: Style,

    // Data tables
    pub table_header: Style,
    pub table_row_even: Style,
    pub table_row_odd: Style,
    pub table_selected: Style,
    pub table_footer: Style,

    // Connection dialog
    pub dialog_border: Style,
    pub dialog_label: Style,
    pub dialog_input: Style,
    pub dialog_input_focused: Style,
    pub dialog_hint: Style,
    pub dialog_error: Style,

    // Help overlay
    pub help_section: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Status messages
    pub status_success: Style,
    pub status_error: Style,
    pub status_info: Style,
    pub status_warning: Style,
    pub status_idle: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Borders
            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            // Header
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            metric_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            metric_inactive: Style::default().fg(Color::Gray),

            // Charts
            bar: Style::default().fg(Color::Cyan),
            bar_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            bar_label: Style::default().fg(Color::White),
            line: Style::default().fg(Color::Cyan),
            marker: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::Gray),
            chart_empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            // Data tables
            table_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            table_row_even: Style::default().fg(Color::White),
            table_row_odd: Style::default().fg(Color::Gray),
            table_selected: Style::default().fg(Color::Black).bg(Color::Yellow),
            table_footer: Style::default().fg(Color::DarkGray),

            // Connection dialog
            dialog_border: Style::default().fg(Color::Cyan),
            dialog_label: Style::default().fg(Color::Gray),
            dialog_input: Style::default().fg(Color::White),
            dialog_input_focused: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),
            dialog_hint: Style::default().fg(Color::DarkGray),
            dialog_error: Style::default().fg(Color::Red),

            // Help overlay
            help_section: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Cyan),
            help_desc: Style::default().fg(Color::White),

            // Status messages
            status_success: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
            status_idle: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get border style based on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}
