//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::ValidatorError;
use crate::tui::app::{App, Mode};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Mark the current item correct.
    MarkCorrect,
    /// Mark the current item incorrect.
    MarkIncorrect,
    /// Apply the range form.
    ApplyRange,
}

/// Poll for a terminal event and handle it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>) -> Result<Option<Action>, ValidatorError> {
    // Poll for events with a small timeout
    if event::poll(Duration::from_millis(100))
        .map_err(|e| ValidatorError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| ValidatorError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map a key press to an action, applying form edits directly.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.mode {
        Mode::Review => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::MarkCorrect),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::MarkIncorrect),
            KeyCode::Char('r') => {
                app.open_range_form();
                None
            },
            KeyCode::Char('?') => {
                app.show_help();
                None
            },
            _ => None,
        },
        Mode::Range(_) => {
            match key.code {
                KeyCode::Enter => return Some(Action::ApplyRange),
                KeyCode::Esc => app.cancel_range_form(),
                KeyCode::Tab | KeyCode::BackTab => {
                    if let Some(form) = app.range_form_mut() {
                        form.toggle_focus();
                    }
                },
                KeyCode::Backspace => {
                    if let Some(form) = app.range_form_mut() {
                        form.backspace();
                    }
                },
                KeyCode::Char(c) => {
                    if let Some(form) = app.range_form_mut() {
                        form.push(c);
                    }
                },
                _ => {},
            }
            None
        },
        Mode::Complete => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => {
                app.open_range_form();
                None
            },
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.dismiss_completion();
                None
            },
            _ => None,
        },
    }
}
