use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::spans_width;

/// Render the status row (bottom of screen): mode, transient message, key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mode_label, hint) = match app.mode {
        Mode::Navigate => (
            "",
            "j/k move  Enter open  / search  r refresh  ? help  q quit",
        ),
        Mode::Search => ("SEARCH", "Enter keep  Esc clear"),
        Mode::Edit => ("EDIT", "Tab field  Ctrl-S save  Esc cancel"),
        Mode::Confirm => ("CONFIRM", "y delete  n cancel"),
    };

    let mut spans = Vec::new();
    if !mode_label.is_empty() {
        spans.push(Span::styled(
            format!(" {} ", mode_label),
            Style::default().fg(bg).bg(app.theme.highlight),
        ));
    }
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    if app.show_key_hints {
        let used = spans_width(&spans);
        let hint_width = hint.chars().count() + 1;
        if used + hint_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - hint_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
