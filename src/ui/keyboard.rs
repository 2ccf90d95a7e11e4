//! Keyboard bindings for the interactive view.
//!
//! Maps crossterm key events to viewer actions. `n`, space and Enter ask
//! for a new recipe; `q`, Esc and Ctrl+C quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the user asked the view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Show a new random recipe
    NewRecipe,
    /// Leave the application
    Quit,
}

/// Key bindings for the view.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Request a new recipe
    pub new_recipe: KeyCode,
    /// Quit
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            new_recipe: KeyCode::Char('n'),
            quit: KeyCode::Char('q'),
        }
    }
}

impl KeyBindings {
    /// Translate a key event into an action.
    ///
    /// Key releases are ignored so terminals that report them do not
    /// trigger twice.
    pub fn action_for(&self, event: KeyEvent) -> Option<Action> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }

        if !(event.modifiers.is_empty() || event.modifiers == KeyModifiers::SHIFT) {
            return None;
        }

        match event.code {
            code if code == self.new_recipe => Some(Action::NewRecipe),
            code if code == self.quit => Some(Action::Quit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::NewRecipe),
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    /// Render the hint bar showing available controls.
    pub fn render_hint(&self) -> String {
        format!(
            " [{}] new recipe | [{}] quit",
            key_label(self.new_recipe),
            key_label(self.quit)
        )
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}
