pub mod detail_view;
pub mod header;
pub mod help_overlay;
pub mod list_view;
pub mod popup;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use super::app::{App, Mode};

/// Render the full UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let banner_h = if app.dashboard.error.is_some() { 1 } else { 0 };

    // Layout: header | filter line | error banner | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),        // header
            Constraint::Length(1),        // filters
            Constraint::Length(banner_h), // fetch error
            Constraint::Min(1),           // content area
            Constraint::Length(1),        // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    header::render_filter_line(frame, app, chunks[1]);
    if banner_h > 0 {
        render_error_banner(frame, app, chunks[2]);
    }

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    list_view::render_list_view(frame, app, panes[0]);
    detail_view::render_detail_view(frame, app, panes[1]);

    status_row::render_status_row(frame, app, chunks[4]);

    // Overlays, topmost last
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
    if app.mode == Mode::Confirm && app.dashboard.pending_delete.is_some() {
        popup::render_delete_confirm(frame, app, frame.area());
    }
    if app.dashboard.notice.is_some() {
        popup::render_notice(frame, app, frame.area());
    }
}

/// " Error: Failed to fetch quotes  (r) try again"
fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.dashboard.error.as_deref() else {
        return;
    };
    let bg = app.theme.background;
    let line = Line::from(vec![
        Span::styled(
            format!(" Error: {}", message),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled("(r)", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(" try again", Style::default().fg(app.theme.text).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Split `text` into spans, highlighting regex matches with `highlight_style`.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Total display width of a run of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| crate::util::unicode::display_width(&s.content))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::test_helpers::{app_with_quotes, render_app};
    use super::*;
    use crate::ops::view::tests::quote;

    #[test]
    fn test_highlight_splits_on_matches() {
        let re = Regex::new("(?i)li").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Alice Li",
            Style::default(),
            Style::default().add_modifier(Modifier::BOLD),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["A", "li", "ce ", "Li"]);
    }

    #[test]
    fn test_error_banner_offers_retry() {
        let mut app = app_with_quotes(vec![quote("a", "Alice", false)]);
        app.dashboard.error = Some("Failed to fetch quotes".into());
        let out = render_app(&mut app, 100, 20);
        assert!(out.contains("Error: Failed to fetch quotes  (r) try again"));
        // Stale data stays visible
        assert!(out.contains("Alice"));
    }

    #[test]
    fn test_layout_without_error_has_no_banner() {
        let mut app = app_with_quotes(vec![quote("a", "Alice", false)]);
        let out = render_app(&mut app, 100, 20);
        assert!(!out.contains("Error:"));
        assert!(out.contains("Quote Requests"));
    }
}
