//! Application state and event handling
//!
//! Central state machine: events come in, state updates, actions go out.
//! Database work never happens here; the main loop runs a reporting pass
//! when it receives [`Action::LoadReport`] and feeds the outcome back as an
//! [`AppEvent`].

use crate::config::ConnectionConfig;
use crate::config::settings::Settings;
use crate::error::ReportError;
use crate::keymap::{KeyAction, KeyMap};
use crate::report::{Metric, Report, VIEW_NAME};
use crate::ui::connection_dialog::{ConnectionDialog, DialogAction};
use crate::ui::data_table::DataTable;
use crate::ui::help::HelpOverlay;
use crate::ui::theme::Theme;
use crossterm::event::KeyEvent;

/// Main application state
pub struct App {
    /// Connection of the report on screen
    pub active_connection: Option<ConnectionConfig>,

    /// Defaults for the connection form before anything has connected
    pub connection_defaults: ConnectionConfig,

    /// Most recently loaded report
    pub report: Option<Report>,

    /// Metric both charts plot
    pub metric: Metric,

    /// Whether the data tables are shown under the charts
    pub show_tables: bool,

    /// Which panel currently has focus
    pub focus: PanelFocus,

    /// Focus before a modal was opened (to restore on Escape)
    pub previous_focus: PanelFocus,

    /// UI Components
    pub connection_dialog: ConnectionDialog,
    pub help: HelpOverlay,
    pub category_table: DataTable,
    pub trend_table: DataTable,

    /// Data-driven keybinding configuration
    pub keymap: KeyMap,

    /// UI theme (created once, reused every frame)
    pub theme: Theme,

    /// Status message to display
    pub status_message: Option<StatusMessage>,

    /// A reporting pass is in progress
    pub loading: bool,

    /// Whether the application is running
    pub running: bool,
}

/// Panel focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    Charts,
    CategoryTable,
    TrendTable,
    Help,
    ConnectionDialog,
}

/// Status message with severity level
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Application events from the event loop
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize event
    Resize,
    /// A reporting pass finished
    ReportLoaded {
        config: ConnectionConfig,
        report: Report,
    },
    /// A reporting pass failed
    ReportFailed {
        config: ConnectionConfig,
        error: ReportError,
    },
}

/// Actions returned by event handlers for the main loop to execute
#[derive(Debug)]
pub enum Action {
    /// Run a reporting pass with its own connection
    LoadReport(ConnectionConfig),
    Quit,
    None,
}

impl App {
    pub fn new() -> Self {
        Self::new_with_settings(&Settings::default())
    }

    /// Create an app with the initial display state from settings
    pub fn new_with_settings(settings: &Settings) -> Self {
        Self {
            active_connection: None,
            connection_defaults: settings.connection.clone(),
            report: None,
            metric: settings.display.metric,
            show_tables: settings.display.show_tables,
            focus: PanelFocus::Charts,
            previous_focus: PanelFocus::Charts,
            connection_dialog: ConnectionDialog::new(),
            help: HelpOverlay::new(),
            category_table: DataTable::new(),
            trend_table: DataTable::new(),
            keymap: KeyMap::default(),
            theme: Theme::default(),
            status_message: None,
            loading: false,
            running: true,
        }
    }

    /// Handle an application event and return resulting action
    pub fn handle_event(&mut self, event: AppEvent) -> Action {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize => Action::None,
            AppEvent::ReportLoaded { config, report } => {
                self.apply_report(config, report);
                Action::None
            }
            AppEvent::ReportFailed { config, error } => {
                self.apply_failure(config, error);
                Action::None
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Global bindings first, so Ctrl+Q works even inside the form
        if let Some(KeyAction::Quit) = self.keymap.resolve(self.focus, key) {
            return Action::Quit;
        }

        // Connection dialog intercepts all other keys when visible
        if self.focus == PanelFocus::ConnectionDialog {
            return match self.connection_dialog.handle_key(key) {
                DialogAction::Connect(config) => {
                    self.connection_dialog.hide();
                    self.focus = PanelFocus::Charts;
                    self.start_load(config)
                }
                DialogAction::Dismissed => {
                    // Nothing to go back to before the first report
                    if self.report.is_some() {
                        self.connection_dialog.hide();
                        self.focus = self.previous_focus;
                    }
                    Action::None
                }
                DialogAction::Consumed => Action::None,
            };
        }

        match self.keymap.resolve(self.focus, key) {
            Some(key_action) => self.execute_key_action(key_action),
            None => Action::None,
        }
    }

    fn execute_key_action(&mut self, action: KeyAction) -> Action {
        match action {
            // ── Global ───────────────────────────────────────
            KeyAction::Quit => Action::Quit,
            KeyAction::ShowHelp => {
                self.previous_focus = self.focus;
                self.focus = PanelFocus::Help;
                self.help.show();
                Action::None
            }
            KeyAction::CycleFocus => {
                self.cycle_focus();
                Action::None
            }
            KeyAction::CycleFocusReverse => {
                self.cycle_focus_reverse();
                Action::None
            }

            // ── Dashboard ────────────────────────────────────
            KeyAction::ToggleMetric => {
                self.toggle_metric();
                Action::None
            }
            KeyAction::ToggleTables => {
                self.toggle_tables();
                Action::None
            }
            KeyAction::Refresh => self.refresh(),
            KeyAction::OpenConnectionDialog => {
                self.show_connection_dialog(None);
                Action::None
            }

            // ── Navigation ───────────────────────────────────
            KeyAction::MoveUp => {
                self.navigate(DataTable::move_up, HelpOverlay::scroll_up);
                Action::None
            }
            KeyAction::MoveDown => {
                self.navigate(DataTable::move_down, HelpOverlay::scroll_down);
                Action::None
            }
            KeyAction::PageUp => {
                self.navigate(DataTable::page_up, HelpOverlay::page_up);
                Action::None
            }
            KeyAction::PageDown => {
                self.navigate(DataTable::page_down, HelpOverlay::page_down);
                Action::None
            }
            KeyAction::GoToTop => {
                self.navigate(DataTable::go_to_top, HelpOverlay::scroll_to_top);
                Action::None
            }
            KeyAction::GoToBottom => {
                self.navigate(DataTable::go_to_bottom, HelpOverlay::scroll_to_bottom);
                Action::None
            }

            // ── Modal ────────────────────────────────────────
            KeyAction::Dismiss => {
                if self.focus == PanelFocus::Help {
                    self.help.hide();
                    self.focus = self.previous_focus;
                }
                Action::None
            }
        }
    }

    /// Route a navigation key to whichever scrollable panel has focus
    fn navigate(&mut self, table: fn(&mut DataTable), help: fn(&mut HelpOverlay)) {
        match self.focus {
            PanelFocus::CategoryTable => table(&mut self.category_table),
            PanelFocus::TrendTable => table(&mut self.trend_table),
            PanelFocus::Help => help(&mut self.help),
            _ => {}
        }
    }

    /// Switch metric. Both charts and the category ranking follow; the
    /// loaded data is reused as is.
    pub fn toggle_metric(&mut self) {
        self.metric = self.metric.toggled();
        // Ranked order changed under the cursor
        self.category_table.go_to_top();
        tracing::debug!(metric = self.metric.label(), "metric toggled");
    }

    pub fn toggle_tables(&mut self) {
        self.show_tables = !self.show_tables;
        if !self.show_tables {
            self.focus = PanelFocus::Charts;
        }
    }

    /// Panels that can take focus on the dashboard, in Tab order
    fn focus_ring(&self) -> &'static [PanelFocus] {
        if self.show_tables && self.report.is_some() {
            &[
                PanelFocus::Charts,
                PanelFocus::CategoryTable,
                PanelFocus::TrendTable,
            ]
        } else {
            &[PanelFocus::Charts]
        }
    }

    pub fn cycle_focus(&mut self) {
        let ring = self.focus_ring();
        if let Some(pos) = ring.iter().position(|f| *f == self.focus) {
            self.focus = ring[(pos + 1) % ring.len()];
        }
    }

    fn cycle_focus_reverse(&mut self) {
        let ring = self.focus_ring();
        if let Some(pos) = ring.iter().position(|f| *f == self.focus) {
            self.focus = ring[(pos + ring.len() - 1) % ring.len()];
        }
    }

    pub fn set_status(&mut self, message: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage { message, level });
    }

    /// Show the connection form, prefilled with the last used parameters
    pub fn show_connection_dialog(&mut self, error: Option<String>) {
        if self.focus != PanelFocus::ConnectionDialog {
            self.previous_focus = self.focus;
        }
        self.focus = PanelFocus::ConnectionDialog;
        let config = self
            .active_connection
            .as_ref()
            .unwrap_or(&self.connection_defaults);
        self.connection_dialog.show(config, error);
    }

    /// Re-run the reporting pass with the parameters of the report on
    /// screen. Without one there is nothing to refresh, so the form opens.
    pub fn refresh(&mut self) -> Action {
        match self.active_connection.clone() {
            Some(config) => self.start_load(config),
            None => {
                self.show_connection_dialog(None);
                Action::None
            }
        }
    }

    /// Begin a reporting pass
    pub fn start_load(&mut self, config: ConnectionConfig) -> Action {
        tracing::info!(server = %config.display_name(), "loading report");
        self.loading = true;
        self.set_status(
            format!("Loading report from {}...", config.display_name()),
            StatusLevel::Info,
        );
        Action::LoadReport(config)
    }

    fn apply_report(&mut self, config: ConnectionConfig, report: Report) {
        self.loading = false;
        self.category_table.reset(report.categories.len());
        self.trend_table.reset(report.periods.len());
        let level = if report.category_rental_total() == report.record_count {
            StatusLevel::Success
        } else {
            StatusLevel::Warning
        };
        self.set_status(
            format!(
                "Connected successfully | {} records: {}",
                VIEW_NAME, report.record_count
            ),
            level,
        );
        self.connection_defaults = config.clone();
        self.active_connection = Some(config);
        self.report = Some(report);
        if !self.focus_ring().contains(&self.focus) {
            self.focus = PanelFocus::Charts;
        }
    }

    fn apply_failure(&mut self, config: ConnectionConfig, error: ReportError) {
        self.loading = false;
        // A failed pass leaves nothing trustworthy on screen
        self.report = None;
        self.active_connection = None;
        self.connection_defaults = config;
        self.focus = PanelFocus::Charts;

        let message = error.to_string();
        let summary = match error {
            ReportError::Connection(_) => "Connection failed",
            ReportError::ViewUnavailable { .. } => "Report view not accessible",
            ReportError::Query(_) => "Report query failed",
        };
        self.set_status(summary.to_string(), StatusLevel::Error);
        self.show_connection_dialog(Some(message));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
