//! Terminal User Interface (TUI) for ocrv.
//!
//! Shows one image and its recognized text at a time and turns key presses
//! into review session calls. Built with ratatui and crossterm.

mod app;
mod event;
mod preview;
mod ui;

pub use app::{App, Completion, Mode, RangeField, RangeForm, ReviewOptions};
pub use event::Action;
pub use preview::Preview;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::ValidatorError;
use crate::session::ReviewSession;
use crate::source::ImageSource;

/// What an interactive review produced.
#[derive(Debug)]
pub struct ReviewOutcome {
    /// Session state when the user quit.
    pub session: ReviewSession,
    /// Reviews completed during the run.
    pub completions: Vec<Completion>,
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    session: ReviewSession,
    images: &dyn ImageSource,
    options: ReviewOptions,
) -> Result<ReviewOutcome, ValidatorError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| ValidatorError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut terminal = undo_on_error(setup_terminal(), || {
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        disable_raw_mode().ok();
    })?;

    // Create app state and run main loop
    let mut app = App::new(session, images, options);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| ReviewOutcome {
        session: app.session,
        completions: app.completions,
    })
}

/// Enter the alternate screen and create the terminal.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, ValidatorError> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| ValidatorError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
        .map_err(|e| ValidatorError::Terminal(format!("Failed to create terminal: {e}")))
}

/// Run `undo` if `result` is an error, then pass it through.
fn undo_on_error<T>(
    result: Result<T, ValidatorError>,
    undo: impl FnOnce(),
) -> Result<T, ValidatorError> {
    if result.is_err() {
        undo();
    }
    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), ValidatorError> {
    while !app.should_quit {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| ValidatorError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            dispatch(app, action);
        }
    }

    Ok(())
}

/// Apply an action to the app.
fn dispatch(app: &mut App<'_>, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::MarkCorrect => app.mark_correct(),
        Action::MarkIncorrect => app.mark_incorrect(),
        Action::ApplyRange => app.apply_range(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::error::ValidatorError;
    use crate::session::ReviewItem;
    use crate::source::MockImageSource;

    /// Feed keys through the same path the event loop uses.
    fn press(app: &mut App<'_>, codes: &[KeyCode]) {
        for &code in codes {
            if let Some(action) = event::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)) {
                dispatch(app, action);
            }
        }
    }

    #[test]
    fn test_undo_on_error_runs_only_on_failure() {
        let mut undone = 0;
        let ok = undo_on_error(Ok(1), || undone += 1);
        assert_eq!(ok.unwrap(), 1);
        assert_eq!(undone, 0);

        let err = undo_on_error::<()>(
            Err(ValidatorError::Terminal("no tty".to_string())),
            || undone += 1,
        );
        assert!(matches!(err, Err(ValidatorError::Terminal(_))));
        assert_eq!(undone, 1);
    }

    #[test]
    fn test_keyboard_session_scenario() {
        let mut images = MockImageSource::new();
        images
            .expect_fetch()
            .returning(|name| Err(ValidatorError::ImageNotFound(PathBuf::from(name))));

        let session = ReviewSession::new(vec![
            ReviewItem::new("a.png", "hello"),
            ReviewItem::new("b.png", "wor1d"),
            ReviewItem::new("c.png", "test"),
        ]);
        let mut app = App::new(
            session,
            &images,
            ReviewOptions {
                input: PathBuf::from("ocr.json"),
                results_dir: None,
                thumbnail_max: 600,
            },
        );

        press(&mut app, &[KeyCode::Right, KeyCode::Left, KeyCode::Right]);
        assert_eq!(app.mode, Mode::Complete);
        assert_eq!(app.session.stats(), (2, 1));

        // New range from the completion notice: clear both fields, type 2..3
        press(
            &mut app,
            &[
                KeyCode::Char('r'),
                KeyCode::Backspace,
                KeyCode::Char('2'),
                KeyCode::Tab,
                KeyCode::Backspace,
                KeyCode::Char('3'),
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.mode, Mode::Review);
        assert_eq!(app.session.len(), 2);
        assert_eq!(app.session.stats(), (0, 0));
        assert_eq!(app.current_item().unwrap().filename, "b.png");

        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.should_quit);
    }
}
