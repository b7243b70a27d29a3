//! Application state for the TUI.

use std::path::PathBuf;

use ratatui::text::Line;
use tracing::{debug, error, info, warn};

use crate::results::ResultLog;
use crate::session::{
    parse_range_inputs, AdvanceResult, Outcome, ReviewItem, ReviewReport, ReviewSession,
};
use crate::source::ImageSource;
use crate::tui::preview::Preview;

/// Settings for an interactive review.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Input file the session was loaded from.
    pub input: PathBuf,
    /// Where to write result logs; `None` disables saving.
    pub results_dir: Option<PathBuf>,
    /// Images are thumbnailed to fit this many pixels per side.
    pub thumbnail_max: u32,
}

/// A review that reached its last item.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Summary of the finished review.
    pub report: ReviewReport,
    /// Result log path, if one was written.
    pub saved_to: Option<PathBuf>,
    /// Why the result log could not be written.
    pub save_error: Option<String>,
}

/// Which range field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    /// First item number.
    Start,
    /// Last item number.
    End,
}

/// Text being entered in the range form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeForm {
    /// First item number, as typed.
    pub start: String,
    /// Last item number, as typed.
    pub end: String,
    /// Field receiving input.
    pub focus: RangeField,
}

impl RangeForm {
    /// Append a character to the focused field.
    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Remove the last character of the focused field.
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Move focus to the other field.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            RangeField::Start => RangeField::End,
            RangeField::End => RangeField::Start,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            RangeField::Start => &mut self.start,
            RangeField::End => &mut self.end,
        }
    }
}

/// What the screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Classifying items.
    Review,
    /// Editing the range form.
    Range(RangeForm),
    /// Completion notice after the last item.
    Complete,
}

/// Decoded image for the current item, or why it could not be shown.
pub type PreviewState = Result<Preview, String>;

/// Rasterized preview, keyed by filename and cell size.
type Raster = ((String, u16, u16), Vec<Line<'static>>);

/// Application state.
pub struct App<'a> {
    /// The review being driven.
    pub session: ReviewSession,
    /// Image store.
    images: &'a dyn ImageSource,
    options: ReviewOptions,
    /// Filename and preview of the item on screen.
    preview: Option<(String, PreviewState)>,
    /// Last rasterization of the preview.
    raster: Option<Raster>,
    /// Current screen.
    pub mode: Mode,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Reviews finished during this run.
    pub completions: Vec<Completion>,
}

impl<'a> App<'a> {
    /// Create a new app instance and load the first image.
    pub fn new(session: ReviewSession, images: &'a dyn ImageSource, options: ReviewOptions) -> Self {
        let status = if session.is_empty() {
            "No items to review".to_string()
        } else {
            "Right: correct | Left: incorrect | ?: help".to_string()
        };

        let mut app = Self {
            session,
            images,
            options,
            preview: None,
            raster: None,
            mode: Mode::Review,
            status: Some(status),
            should_quit: false,
            completions: Vec::new(),
        };
        app.refresh_preview();
        app
    }

    /// The item under the cursor.
    pub fn current_item(&self) -> Option<&ReviewItem> {
        self.session.current_item()
    }

    /// Preview of the item under the cursor.
    pub fn preview(&self) -> Option<&PreviewState> {
        self.preview.as_ref().map(|(_, preview)| preview)
    }

    /// Decode the current item's image unless it is already loaded.
    fn refresh_preview(&mut self) {
        let Some(filename) = self.current_item().map(|item| item.filename.clone()) else {
            self.preview = None;
            return;
        };
        if matches!(&self.preview, Some((loaded, _)) if *loaded == filename) {
            return;
        }

        let preview = self
            .images
            .fetch(&filename)
            .and_then(|bytes| Preview::decode(&bytes, self.options.thumbnail_max))
            .map(|preview| {
                let (width, height) = preview.dimensions();
                debug!(%filename, width, height, "Loaded image");
                preview
            })
            .map_err(|e| {
                if e.is_recoverable() {
                    warn!(%filename, error = %e, "Could not display image");
                } else {
                    error!(%filename, error = %e, "Image store failed");
                }
                e.to_string()
            });
        self.preview = Some((filename, preview));
    }

    /// Preview rasterized into `cols` x `rows` cells.
    ///
    /// The result is reused until the item or the cell size changes.
    pub fn preview_lines(&mut self, cols: u16, rows: u16) -> Option<&[Line<'static>]> {
        let Some((filename, Ok(preview))) = &self.preview else {
            return None;
        };
        let stale = !matches!(
            &self.raster,
            Some(((name, c, r), _)) if name == filename && *c == cols && *r == rows
        );
        if stale {
            let lines = preview.to_lines(cols, rows);
            self.raster = Some(((filename.clone(), cols, rows), lines));
        }
        self.raster.as_ref().map(|(_, lines)| lines.as_slice())
    }

    /// Mark the current item correct.
    pub fn mark_correct(&mut self) {
        self.classify(Outcome::Correct);
    }

    /// Mark the current item incorrect.
    pub fn mark_incorrect(&mut self) {
        self.classify(Outcome::Incorrect);
    }

    fn classify(&mut self, outcome: Outcome) {
        if self.session.is_empty() {
            self.status = Some("No items to review".to_string());
            return;
        }

        match self.session.classify(outcome) {
            Ok(AdvanceResult::Continued) => {
                self.status = None;
                self.refresh_preview();
            },
            Ok(AdvanceResult::Completed) => self.finish(),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Emit the summary and write the result log.
    fn finish(&mut self) {
        let report = self.session.report();
        info!(
            total = report.total,
            correct = report.correct,
            incorrect = report.incorrect,
            "Review summary"
        );
        for (filename, outcome) in &report.details {
            debug!(%filename, %outcome, "Review result");
        }

        let mut completion = Completion {
            report,
            saved_to: None,
            save_error: None,
        };
        if let Some(dir) = &self.options.results_dir {
            let log = ResultLog::from_session(&self.session, &self.options.input);
            match log.save_in(dir) {
                Ok(path) => completion.saved_to = Some(path),
                Err(e) => {
                    warn!(error = %e, "Could not save result log");
                    completion.save_error = Some(e.to_string());
                },
            }
        }

        self.status = Some(match (&completion.saved_to, &completion.save_error) {
            (Some(path), _) => format!("Saved results to {}", path.display()),
            (None, Some(err)) => format!("Could not save results: {err}"),
            (None, None) => "Review complete".to_string(),
        });
        self.completions.push(completion);
        self.mode = Mode::Complete;
    }

    /// Open the range form, prefilled with the active range.
    pub fn open_range_form(&mut self) {
        let (start, end) = self
            .session
            .active_range()
            .map(|(s, e)| (s.to_string(), e.to_string()))
            .unwrap_or_default();
        self.mode = Mode::Range(RangeForm {
            start,
            end,
            focus: RangeField::Start,
        });
        self.status = Some("Tab: switch field | Enter: apply | Esc: cancel".to_string());
    }

    /// Apply the range typed into the form.
    ///
    /// On failure the form stays open and the session is untouched.
    pub fn apply_range(&mut self) {
        let Mode::Range(form) = &self.mode else {
            return;
        };

        let result = parse_range_inputs(&form.start, &form.end)
            .and_then(|(start, end)| self.session.apply_range(start, end).map(|()| (start, end)));

        match result {
            Ok((start, end)) => {
                self.mode = Mode::Review;
                self.status = Some(format!(
                    "Reviewing items {start}-{end} ({} items)",
                    self.session.len()
                ));
                self.refresh_preview();
            },
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Close the range form without applying it.
    pub fn cancel_range_form(&mut self) {
        self.mode = if self.session.is_finished() {
            Mode::Complete
        } else {
            Mode::Review
        };
        self.status = None;
    }

    /// Close the completion notice.
    pub fn dismiss_completion(&mut self) {
        self.mode = Mode::Review;
        self.status = Some("Review complete. r: new range | q: quit".to_string());
    }

    /// Mutable access to the range form, if open.
    pub fn range_form_mut(&mut self) -> Option<&mut RangeForm> {
        match &mut self.mode {
            Mode::Range(form) => Some(form),
            _ => None,
        }
    }

    /// Show the key help.
    pub fn show_help(&mut self) {
        self.status = Some(
            "Right/l: correct | Left/h: incorrect | r: range | q: quit".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};
    use tempfile::TempDir;

    use super::*;
    use crate::error::ValidatorError;
    use crate::source::MockImageSource;

    fn sample_session() -> ReviewSession {
        ReviewSession::new(vec![
            ReviewItem::new("a.png", "hello"),
            ReviewItem::new("b.png", "wor1d"),
            ReviewItem::new("c.png", "test"),
        ])
    }

    fn options(results_dir: Option<PathBuf>) -> ReviewOptions {
        ReviewOptions {
            input: PathBuf::from("ocr.json"),
            results_dir,
            thumbnail_max: 600,
        }
    }

    fn missing_images() -> MockImageSource {
        let mut images = MockImageSource::new();
        images
            .expect_fetch()
            .returning(|name| Err(ValidatorError::ImageNotFound(PathBuf::from(name))));
        images
    }

    fn png_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn set_form(app: &mut App<'_>, start: &str, end: &str) {
        let form = app.range_form_mut().unwrap();
        form.start = start.to_string();
        form.end = end.to_string();
    }

    #[test]
    fn test_new_loads_first_preview() {
        let mut images = MockImageSource::new();
        images
            .expect_fetch()
            .withf(|name| name.to_string() == "a.png")
            .times(1)
            .returning(|_| Ok(png_bytes()));

        let app = App::new(sample_session(), &images, options(None));
        assert!(matches!(app.preview(), Some(Ok(_))));
        assert_eq!(app.mode, Mode::Review);
    }

    #[test]
    fn test_preview_lines_are_cached() {
        let mut images = MockImageSource::new();
        images.expect_fetch().returning(|_| Ok(png_bytes()));
        let mut app = App::new(sample_session(), &images, options(None));

        let first = app.preview_lines(4, 2).unwrap().as_ptr();
        let again = app.preview_lines(4, 2).unwrap().as_ptr();
        assert_eq!(first, again);

        // A new cell size re-rasterizes
        assert_eq!(app.preview_lines(8, 4).unwrap().len(), 4);

        // So does a new item
        app.mark_correct();
        assert_eq!(app.preview_lines(8, 4).unwrap().len(), 4);
        assert_eq!(
            app.raster.as_ref().map(|((name, _, _), _)| name.as_str()),
            Some("b.png")
        );
    }

    #[test]
    fn test_preview_lines_without_image() {
        let images = missing_images();
        let mut app = App::new(sample_session(), &images, options(None));
        assert!(app.preview_lines(10, 10).is_none());
    }

    #[test]
    fn test_image_failure_is_not_fatal() {
        let images = missing_images();
        let mut app = App::new(sample_session(), &images, options(None));

        let Some(Err(message)) = app.preview() else {
            panic!("expected an image error");
        };
        assert!(message.contains("a.png"));

        app.mark_correct();
        assert_eq!(app.session.cursor(), 1);
        assert_eq!(app.current_item().unwrap().filename, "b.png");
    }

    #[test]
    fn test_classify_through_completion() {
        let images = missing_images();
        let mut app = App::new(sample_session(), &images, options(None));

        app.mark_correct();
        app.mark_incorrect();
        assert_eq!(app.mode, Mode::Review);
        app.mark_correct();

        assert_eq!(app.mode, Mode::Complete);
        assert_eq!(app.completions.len(), 1);
        let report = &app.completions[0].report;
        assert_eq!((report.total, report.correct, report.incorrect), (3, 2, 1));
        assert!(app.completions[0].saved_to.is_none());
    }

    #[test]
    fn test_classify_after_completion_shows_error() {
        let images = missing_images();
        let mut app = App::new(sample_session(), &images, options(None));
        for _ in 0..3 {
            app.mark_correct();
        }
        app.dismiss_completion();

        app.mark_incorrect();
        assert_eq!(app.session.stats(), (3, 0));
        assert_eq!(app.completions.len(), 1);
        assert!(app.status.as_deref().unwrap().contains("complete"));
    }

    #[test]
    fn test_completion_writes_result_log() {
        let temp_dir = TempDir::new().unwrap();
        let images = missing_images();
        let mut app = App::new(
            sample_session(),
            &images,
            options(Some(temp_dir.path().to_path_buf())),
        );
        for _ in 0..3 {
            app.mark_incorrect();
        }

        let path = app.completions[0].saved_to.clone().unwrap();
        let log = ResultLog::load(&path).unwrap();
        assert_eq!(log.incorrect, 3);
        assert_eq!(log.results[2].text, "test");
    }

    #[test]
    fn test_apply_range_from_form() {
        let images = missing_images();
        let mut app = App::new(sample_session(), &images, options(None));
        app.mark_correct();

        app.open_range_form();
        assert_eq!(
            app.mode,
            Mode::Range(RangeForm {
                start: "1".to_string(),
                end: "3".to_string(),
                focus: RangeField::Start,
            })
        );

        set_form(&mut app, "2", "3");
        app.apply_range();

        assert_eq!(app.mode, Mode::Review);
        assert_eq!(app.session.len(), 2);
        assert_eq!(app.session.stats(), (0, 0));
        assert_eq!(app.current_item().unwrap().filename, "b.png");
    }

    #[test]
    fn test_invalid_range_keeps_state() {
        let images = missing_images();
        let mut app = App::new(sample_session(), &images, options(None));
        app.mark_incorrect();

        app.open_range_form();
        set_form(&mut app, "3", "1");
        app.apply_range();
        assert!(matches!(app.mode, Mode::Range(_)));
        assert!(app.status.as_deref().unwrap().starts_with("Invalid range"));

        set_form(&mut app, "one", "2");
        app.apply_range();
        assert!(app.status.as_deref().unwrap().starts_with("Enter valid item numbers"));

        app.cancel_range_form();
        assert_eq!(app.mode, Mode::Review);
        assert_eq!(app.session.cursor(), 1);
        assert_eq!(app.session.stats(), (0, 1));
    }

    #[test]
    fn test_range_form_editing() {
        let mut form = RangeForm {
            start: String::new(),
            end: String::new(),
            focus: RangeField::Start,
        };
        form.push('1');
        form.push('2');
        form.backspace();
        form.toggle_focus();
        form.push('5');
        assert_eq!(form.start, "1");
        assert_eq!(form.end, "5");
        form.toggle_focus();
        assert_eq!(form.focus, RangeField::Start);
    }

    #[test]
    fn test_empty_session_is_inert() {
        let images = MockImageSource::new();
        let mut app = App::new(ReviewSession::new(vec![]), &images, options(None));

        assert!(app.preview().is_none());
        app.mark_correct();
        assert_eq!(app.mode, Mode::Review);
        assert!(app.completions.is_empty());
        assert_eq!(app.status.as_deref(), Some("No items to review"));
    }
}
