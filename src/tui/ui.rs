//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, Mode, RangeField, RangeForm};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &mut App<'_>) {
    // Create layout: header, image, text, stats, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(4),    // Image
            Constraint::Length(5), // OCR text
            Constraint::Length(1), // Stats
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_image(frame, app, chunks[1]);
    render_text(frame, app, chunks[2]);
    render_stats(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    match &app.mode {
        Mode::Review => {},
        Mode::Range(form) => render_range_form(frame, app, form),
        Mode::Complete => render_completion(frame, app),
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (position, len) = app.session.position();
    let mut title = format!(" OCR Validator - {position}/{len} ");
    if let Some(item) = app.current_item() {
        title.push_str(&format!("  {}", item.filename));
    }

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the current image, or why it is missing.
fn render_image(frame: &mut Frame<'_>, app: &mut App<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Image ")
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = app
        .preview_lines(inner.width, inner.height)
        .map(<[Line<'static>]>::to_vec);
    let paragraph = match app.preview() {
        None => Paragraph::new("No items to review").style(Style::default().fg(Color::DarkGray)),
        Some(Err(message)) => Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true }),
        Some(Ok(_)) => Paragraph::new(lines.unwrap_or_default()),
    };

    frame.render_widget(paragraph.alignment(Alignment::Center), inner);
}

/// Render the recognized text, read-only.
fn render_text(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let text = app.current_item().map_or("", |item| item.text.as_str());
    let title = match app
        .current_item()
        .and_then(|item| app.session.outcome_of(&item.filename))
    {
        Some(outcome) => format!(" OCR Text ({outcome}) "),
        None => " OCR Text ".to_string(),
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::White)),
        );

    frame.render_widget(paragraph, area);
}

/// Render the running counters.
fn render_stats(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (correct, incorrect) = app.session.stats();
    let line = Line::from(vec![
        Span::styled(format!("Correct: {correct}"), Style::default().fg(Color::Green)),
        Span::raw(" | "),
        Span::styled(format!("Incorrect: {incorrect}"), Style::default().fg(Color::Red)),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("Left:incorrect | Right:correct | r:range | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Render the range form as a popup.
fn render_range_form(frame: &mut Frame<'_>, app: &App<'_>, form: &RangeForm) {
    let area = centered(frame.area(), 40, 7);
    frame.render_widget(Clear, area);

    let field = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { " " };
        Line::from(vec![
            Span::raw(format!("{label:>6}: ")),
            Span::styled(format!("[{value}{cursor}]"), style),
        ])
    };

    let lines = vec![
        Line::from(format!("Items 1 to {}", app.session.total_loaded())),
        field("From", &form.start, form.focus == RangeField::Start),
        field("To", &form.end, form.focus == RangeField::End),
        Line::from(Span::styled(
            "Enter: apply  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Range ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(popup, area);
}

/// Render the completion notice as a popup.
fn render_completion(frame: &mut Frame<'_>, app: &App<'_>) {
    let area = centered(frame.area(), 44, 8);
    frame.render_widget(Clear, area);

    let (correct, incorrect) = app.session.stats();
    let lines = vec![
        Line::from(Span::styled(
            "All items have been reviewed!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Total: {}", correct + incorrect)),
        Line::from(vec![
            Span::styled(format!("Correct: {correct}"), Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled(format!("Incorrect: {incorrect}"), Style::default().fg(Color::Red)),
        ]),
        Line::from(Span::styled(
            "Enter: close  r: new range  q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Review complete ")
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(popup, area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
