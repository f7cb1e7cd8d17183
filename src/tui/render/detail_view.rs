use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::{EditableField, Quote};
use crate::ops::Panel;
use crate::tui::app::App;
use crate::util::date;

const LABEL_WIDTH: usize = 10;
const CURSOR: &str = "\u{258C}";

/// Render the detail panel: empty hint, read-only record, or edit form
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let lines = match &app.dashboard.panel {
        Panel::Empty => vec![Line::from(Span::styled(
            " Select a quote to view details",
            Style::default().fg(app.theme.dim).bg(bg),
        ))],
        Panel::Viewing(quote) => viewing_lines(app, quote),
        Panel::Editing { draft, .. } => editing_lines(app, draft),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn title_line(app: &App, title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

fn label_span(app: &App, label: &str) -> Span<'static> {
    Span::styled(
        format!(" {:<width$}", label, width = LABEL_WIDTH),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )
}

fn viewing_lines(app: &App, quote: &Quote) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let value_style = Style::default().fg(app.theme.text).bg(bg);
    let mut lines = vec![title_line(app, "Quote Details"), Line::from("")];

    for field in EditableField::ALL {
        let value = field.get(quote);
        let mut rows = value.split('\n');
        let first = rows.next().unwrap_or("");
        lines.push(Line::from(vec![
            label_span(app, field.label()),
            Span::styled(first.to_string(), value_style),
        ]));
        for row in rows {
            lines.push(Line::from(vec![
                label_span(app, ""),
                Span::styled(row.to_string(), value_style),
            ]));
        }
    }

    lines.push(Line::from(vec![
        label_span(app, "Received"),
        Span::styled(date::format_date_time(&quote.created_at), value_style),
    ]));
    lines.push(Line::from(vec![
        label_span(app, "Status"),
        Span::styled(
            quote.status_label(),
            Style::default()
                .fg(app.theme.marked_color(quote.marked))
                .bg(bg),
        ),
    ]));

    if app.show_key_hints {
        lines.push(Line::from(""));
        lines.push(hint_line(
            app,
            &[("e", "edit"), ("m", "mark"), ("d", "delete"), ("Esc", "close")],
        ));
    }
    lines
}

fn editing_lines(app: &App, draft: &Quote) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let value_style = Style::default().fg(app.theme.text).bg(bg);
    let active_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let mut lines = vec![title_line(app, "Edit Quote"), Line::from("")];

    for field in EditableField::ALL {
        let value = field.get(draft);
        let active = field == app.edit_field;
        let marker = if active { "\u{25B8}" } else { " " };
        let label = Span::styled(
            format!("{}{:<width$}", marker, field.label(), width = LABEL_WIDTH),
            if active {
                Style::default().fg(app.theme.highlight).bg(bg)
            } else {
                Style::default().fg(app.theme.dim).bg(bg)
            },
        );
        let cursor = active.then(|| app.edit_cursor.min(value.len()));

        let mut offset = 0;
        for (i, row) in value.split('\n').enumerate() {
            let head = if i == 0 { label.clone() } else { label_span(app, "") };
            let mut spans = vec![head];
            let row_end = offset + row.len();
            match cursor {
                Some(at) if at >= offset && at <= row_end => {
                    let split = at - offset;
                    spans.push(Span::styled(row[..split].to_string(), active_style));
                    spans.push(Span::styled(CURSOR, cursor_style));
                    spans.push(Span::styled(row[split..].to_string(), active_style));
                }
                Some(_) => spans.push(Span::styled(row.to_string(), active_style)),
                None => spans.push(Span::styled(row.to_string(), value_style)),
            }
            lines.push(Line::from(spans));
            // Skip the newline
            offset = row_end + 1;
        }
    }

    if app.show_key_hints {
        lines.push(Line::from(""));
        lines.push(hint_line(
            app,
            &[("Tab", "next field"), ("Ctrl-S", "save"), ("Esc", "cancel")],
        ));
    }
    lines
}

fn hint_line(app: &App, hints: &[(&str, &str)]) -> Line<'static> {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().bg(bg)));
        }
        spans.push(Span::styled(
            format!("({})", key),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    Line::from(spans)
}
