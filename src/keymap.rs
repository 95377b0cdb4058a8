//! Data-driven keybinding configuration
//!
//! All keybindings are defined as data in `KeyMap::default()`, not as match arms
//! scattered across components. To add a new binding, add an entry to the
//! appropriate context in `KeyMap::default()` and handle the `KeyAction` in
//! `App::execute_key_action()`.
//!
//! The connection form takes raw keys for text entry, so only the global
//! bindings reach past it.

use crate::app::PanelFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Semantic key actions: what a key means, not what key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Global
    Quit,
    ShowHelp,
    CycleFocus,
    CycleFocusReverse,

    // Dashboard
    ToggleMetric,
    ToggleTables,
    Refresh,
    OpenConnectionDialog,

    // Navigation (data tables, help)
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Modal dismiss
    Dismiss,
}

/// Keybinding configuration: maps key combos to semantic actions per context.
pub struct KeyMap {
    /// Bindings that apply regardless of focus (checked first)
    global: HashMap<KeyBind, KeyAction>,
    /// Per-panel bindings (checked after global)
    panels: HashMap<PanelFocus, HashMap<KeyBind, KeyAction>>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action.
    /// Checks global bindings first, then panel-specific bindings.
    pub fn resolve(&self, focus: PanelFocus, key: KeyEvent) -> Option<KeyAction> {
        let bind = KeyBind::from(key);
        if let Some(action) = self.global.get(&bind) {
            return Some(*action);
        }
        self.panels
            .get(&focus)
            .and_then(|m| m.get(&bind))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();
        global.insert(
            KeyBind {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::Quit,
        );
        global.insert(
            KeyBind {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::Quit,
        );

        let mut panels = HashMap::new();

        // ── Charts ───────────────────────────────────────────────
        let mut charts = HashMap::new();
        insert_dashboard(&mut charts);
        panels.insert(PanelFocus::Charts, charts);

        // ── Data tables ──────────────────────────────────────────
        for focus in [PanelFocus::CategoryTable, PanelFocus::TrendTable] {
            let mut table = HashMap::new();
            insert_dashboard(&mut table);
            insert_scroll_nav(&mut table);
            panels.insert(focus, table);
        }

        // ── Help ─────────────────────────────────────────────────
        let mut help = HashMap::new();
        insert_scroll_nav(&mut help);
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?'), KeyCode::F(1)] {
            help.insert(KeyBind::plain(code), KeyAction::Dismiss);
        }
        panels.insert(PanelFocus::Help, help);

        Self { global, panels }
    }
}

/// Insert the dashboard commands shared by the chart and table panels
fn insert_dashboard(map: &mut HashMap<KeyBind, KeyAction>) {
    let bindings = [
        (KeyCode::Char('q'), KeyAction::Quit),
        (KeyCode::Char('m'), KeyAction::ToggleMetric),
        (KeyCode::Char('t'), KeyAction::ToggleTables),
        (KeyCode::Char('r'), KeyAction::Refresh),
        (KeyCode::F(5), KeyAction::Refresh),
        (KeyCode::Char('c'), KeyAction::OpenConnectionDialog),
        (KeyCode::Char('?'), KeyAction::ShowHelp),
        (KeyCode::F(1), KeyAction::ShowHelp),
        (KeyCode::Tab, KeyAction::CycleFocus),
    ];
    for (code, action) in bindings {
        map.insert(KeyBind::plain(code), action);
    }
    map.insert(
        KeyBind {
            code: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
        },
        KeyAction::CycleFocusReverse,
    );
    // Some terminals report '?' with SHIFT held
    map.insert(
        KeyBind {
            code: KeyCode::Char('?'),
            modifiers: KeyModifiers::SHIFT,
        },
        KeyAction::ShowHelp,
    );
}

/// Insert vertical navigation bindings (arrows + jk + page + g/G)
fn insert_scroll_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    let bindings = [
        (KeyCode::Down, KeyAction::MoveDown),
        (KeyCode::Char('j'), KeyAction::MoveDown),
        (KeyCode::Up, KeyAction::MoveUp),
        (KeyCode::Char('k'), KeyAction::MoveUp),
        (KeyCode::PageDown, KeyAction::PageDown),
        (KeyCode::PageUp, KeyAction::PageUp),
        (KeyCode::Char('g'), KeyAction::GoToTop),
        (KeyCode::Home, KeyAction::GoToTop),
        (KeyCode::End, KeyAction::GoToBottom),
    ];
    for (code, action) in bindings {
        map.insert(KeyBind::plain(code), action);
    }
    map.insert(
        KeyBind {
            code: KeyCode::Char('G'),
            modifiers: KeyModifiers::SHIFT,
        },
        KeyAction::GoToBottom,
    );
}
