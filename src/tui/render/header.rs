use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::spans_width;

/// Title on the left, record counts (or a loading marker) on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            "\u{25C6}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            " Quote Requests",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let right = if app.dashboard.loading {
        "Loading... ".to_string()
    } else {
        let unseen = app.dashboard.quotes.iter().filter(|q| !q.marked).count();
        format!("{} total, {} new ", app.dashboard.quotes.len(), unseen)
    };
    let used = spans_width(&spans) + right.chars().count();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status filter and search field, with the live term
pub fn render_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let filter = &app.dashboard.filter;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut spans = vec![
        Span::styled(" (s) ", key_style),
        Span::styled("Status: ", label_style),
        Span::styled(filter.status.label(), value_style),
        Span::styled("   (f) ", key_style),
        Span::styled(format!("Search by {}: ", filter.field.label()), label_style),
    ];
    if filter.term.is_empty() && app.mode != Mode::Search {
        spans.push(Span::styled("(/) to search", label_style));
    } else {
        spans.push(Span::styled(filter.term.clone(), value_style));
        if app.mode == Mode::Search {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
