//! Connection form
//!
//! A modal form for the five connection parameters. The password field is
//! masked on screen; every other field shows its text as typed. Submitting
//! validates the port and hands a complete [`ConnectionConfig`] back to the
//! app. Errors from a failed reporting pass are shown verbatim below the
//! fields.

use crate::config::connections::{ConnectionConfig, parse_port};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Actions returned by the dialog to the parent
#[derive(Debug)]
pub enum DialogAction {
    /// User submitted a valid connection
    Connect(ConnectionConfig),
    /// User pressed Esc
    Dismissed,
    /// Key was consumed by the dialog (no further handling needed)
    Consumed,
}

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Host,
    Port,
    Database,
    User,
    Password,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::Host,
        Field::Port,
        Field::Database,
        Field::User,
        Field::Password,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Field::Host => "Host",
            Field::Port => "Port",
            Field::Database => "Database",
            Field::User => "User",
            Field::Password => "Password",
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Single-line text input with a byte-offset cursor
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.cursor
            + self.value[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0)
    }

    /// Apply an editing key. Returns true if the text changed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Char('u') => {
                // Ctrl+U clears the field
                self.value.clear();
                self.cursor = 0;
                true
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.value.drain(prev..self.cursor);
                self.cursor = prev;
                true
            }
            KeyCode::Delete if self.cursor < self.value.len() => {
                let next = self.next_boundary();
                self.value.drain(self.cursor..next);
                true
            }
            KeyCode::Left => {
                self.cursor = self.prev_boundary();
                false
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary();
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                false
            }
            _ => false,
        }
    }
}

/// Connection form state
pub struct ConnectionDialog {
    visible: bool,
    inputs: [TextInput; 5],
    focus: Field,
    error: Option<String>,
}

impl ConnectionDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            inputs: Default::default(),
            focus: Field::Host,
            error: None,
        }
    }

    /// Show the form prefilled from `config`, with an optional error
    pub fn show(&mut self, config: &ConnectionConfig, error: Option<String>) {
        self.visible = true;
        self.input_mut(Field::Host).set(&config.host);
        self.input_mut(Field::Port).set(&config.port.to_string());
        self.input_mut(Field::Database).set(&config.database);
        self.input_mut(Field::User).set(&config.username);
        self.input_mut(Field::Password)
            .set(config.password.as_deref().unwrap_or_default());
        // Land on the password when it is the one thing missing
        self.focus = if config.password.is_none() {
            Field::Password
        } else {
            Field::Host
        };
        self.error = error;
    }

    /// Hide the form. The typed values are kept for the next `show`.
    pub fn hide(&mut self) {
        self.visible = false;
        self.error = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current value of a field
    pub fn value(&self, field: Field) -> &str {
        &self.inputs[field.index()].value
    }

    fn input_mut(&mut self, field: Field) -> &mut TextInput {
        &mut self.inputs[field.index()]
    }

    /// Handle a key event, returning a DialogAction
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogAction {
        match key.code {
            KeyCode::Esc => return DialogAction::Dismissed,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return DialogAction::Consumed;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return DialogAction::Consumed;
            }
            KeyCode::Enter => return self.submit(),
            _ => {}
        }

        let focus = self.focus;
        if self.input_mut(focus).handle_key(key) {
            self.error = None;
        }
        DialogAction::Consumed
    }

    fn submit(&mut self) -> DialogAction {
        match self.to_config() {
            Ok(config) => DialogAction::Connect(config),
            Err(message) => {
                self.error = Some(message);
                DialogAction::Consumed
            }
        }
    }

    /// Build a connection config from the form. Only the port is checked
    /// here; every other value goes to the server as typed.
    fn to_config(&self) -> Result<ConnectionConfig, String> {
        let port = parse_port(self.value(Field::Port)).map_err(|e| e.to_string())?;
        let password = self.value(Field::Password);

        Ok(ConnectionConfig {
            host: self.value(Field::Host).to_string(),
            port,
            database: self.value(Field::Database).to_string(),
            username: self.value(Field::User).to_string(),
            password: if password.is_empty() {
                None
            } else {
                Some(password.to_string())
            },
        })
    }

    /// Height the popup needs to show every line
    pub fn required_height(&self, width: u16) -> u16 {
        let error_lines = self.error.as_ref().map_or(0, |e| {
            let inner = width.saturating_sub(6).max(1) as usize;
            1 + (e.chars().count().div_ceil(inner)) as u16
        });
        // borders + 5 fields + blank + hint + error block
        2 + Field::ALL.len() as u16 + 2 + error_lines
    }

    /// Render the dialog content into the provided inner area
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height < Field::ALL.len() as u16 || area.width < 20 {
            return;
        }

        let x = area.x + 1;
        let inner_width = area.width.saturating_sub(2);
        let label_width = Field::ALL
            .iter()
            .map(|f| f.label().len())
            .max()
            .unwrap_or(0)
            + 4;
        let input_width = (inner_width as usize).saturating_sub(label_width);

        let mut y = area.y;
        for field in Field::ALL {
            let input = &self.inputs[field.index()];
            let focused = field == self.focus;
            let style = if focused {
                theme.dialog_input_focused
            } else {
                theme.dialog_input
            };

            let shown = if field == Field::Password {
                mask(&input.value)
            } else {
                input.value.clone()
            };
            let cursor = shown
                .char_indices()
                .nth(input.value[..input.cursor].chars().count())
                .map_or(shown.len(), |(i, _)| i);
            let visible = visible_slice(&shown, cursor, input_width);

            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!("  {:<w$}", format!("{}:", field.label()), w = label_width - 2),
                        theme.dialog_label,
                    ),
                    Span::styled(visible.text, style),
                ])),
                Rect::new(x, y, inner_width, 1),
            );

            if focused {
                let cursor_x = x + label_width as u16 + visible.cursor_offset as u16;
                frame.set_cursor_position((cursor_x.min(x + inner_width - 1), y));
            }
            y += 1;
        }

        y += 1;
        if y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  Enter=connect  Tab=next field  Esc=cancel",
                    theme.dialog_hint,
                )),
                Rect::new(x, y, inner_width, 1),
            );
            y += 1;
        }

        if let Some(ref err) = self.error {
            y += 1;
            let bottom = area.y + area.height;
            if y < bottom {
                frame.render_widget(
                    Paragraph::new(Span::styled(err.as_str(), theme.dialog_error))
                        .wrap(Wrap { trim: false }),
                    Rect::new(x + 2, y, inner_width.saturating_sub(4), bottom - y),
                );
            }
        }
    }
}

impl Default for ConnectionDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Helper for showing a visible slice of a string with cursor position
struct VisibleSlice {
    text: String,
    cursor_offset: usize,
}

/// Get the visible portion of a string that fits within `width` columns,
/// keeping the cursor visible. `cursor` is a byte offset into `input`.
fn visible_slice(input: &str, cursor: usize, width: usize) -> VisibleSlice {
    let chars: Vec<char> = input.chars().collect();
    let cursor = input[..cursor.min(input.len())].chars().count();

    if chars.len() < width {
        return VisibleSlice {
            text: input.to_string(),
            cursor_offset: cursor,
        };
    }

    let start = if cursor >= width {
        cursor + 1 - width
    } else {
        0
    };
    let end = (start + width).min(chars.len());
    VisibleSlice {
        text: chars[start..end].iter().collect(),
        cursor_offset: cursor - start,
    }
}
