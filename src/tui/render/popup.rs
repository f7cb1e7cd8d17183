use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

/// Delete confirmation: names the record and waits for y/n
pub fn render_delete_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let popup_w: u16 = 48.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut styled_lines: Vec<(String, Style)> = Vec::new();
    for s in wrap_text(" ", "Are you sure you want to delete this quote?", inner_w) {
        styled_lines.push((s, text_style));
    }
    if let Some(quote) = app
        .dashboard
        .pending_delete
        .as_deref()
        .and_then(|id| app.dashboard.find(id))
    {
        styled_lines.push((String::new(), text_style));
        let name = unicode::single_line(&quote.name);
        styled_lines.push((
            unicode::truncate_to_width(&format!("   {}", name), inner_w),
            bright_style,
        ));
    }
    styled_lines.push((String::new(), text_style));

    let mut lines: Vec<Line> = styled_lines
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();
    lines.push(Line::from(vec![
        Span::styled(" (y)", key_style),
        Span::styled(" delete  ", text_style),
        Span::styled("(n)", key_style),
        Span::styled(" cancel", text_style),
    ]));

    render_box(frame, app, area, " Delete Quote ", app.theme.red, popup_w, lines);
}

/// Blocking notice for a failed mutation
pub fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.dashboard.notice else {
        return;
    };
    let popup_w: u16 = 52.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let text_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let cause_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    for s in wrap_text(" ", &notice.message, inner_w) {
        lines.push(Line::from(Span::styled(s, text_style)));
    }
    if !notice.cause.is_empty() {
        lines.push(Line::from(""));
        for s in wrap_text(" ", &notice.cause, inner_w) {
            lines.push(Line::from(Span::styled(s, cause_style)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Press any key to dismiss", cause_style)));

    render_box(frame, app, area, " Error ", app.theme.red, popup_w, lines);
}

fn render_box(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    border: ratatui::style::Color,
    popup_w: u16,
    lines: Vec<Line>,
) {
    let bg = app.theme.background;
    // Dynamic height from content + 2 for borders
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(border)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_w = indent_len;

    for word in text.split_whitespace() {
        let word_w = unicode::display_width(word);
        let space = if current_w == indent_len { 0 } else { 1 };
        if current_w + space + word_w > max_width && current_w > indent_len {
            lines.push(current);
            current = indent.to_string();
            current_w = indent_len;
        }
        if current_w > indent_len {
            current.push(' ');
            current_w += 1;
        }
        current.push_str(word);
        current_w += word_w;
    }
    if current_w > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
