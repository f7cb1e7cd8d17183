use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Quote, SearchField};
use crate::tui::app::App;
use crate::util::{date, unicode};

use super::{push_highlighted_spans, spans_width};

/// Rows taken by one entry: name line, service/date line, message preview
const ENTRY_ROWS: usize = 3;

/// Render the filtered list with a footer count
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let width = area.width as usize;

    if app.dashboard.loading && app.dashboard.quotes.is_empty() {
        let msg = Paragraph::new(" Loading quotes...").style(dim_style);
        frame.render_widget(msg, area);
        return;
    }

    let visible = app.dashboard.visible();
    let total = app.dashboard.quotes.len();
    let shown = visible.len();

    let mut lines: Vec<Line> = Vec::new();
    // Footer takes the last row
    let body_rows = (area.height as usize).saturating_sub(1);

    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            " No quotes found matching your criteria",
            dim_style,
        )));
    } else {
        let per_page = (body_rows / ENTRY_ROWS).max(1);
        // Keep the cursor in view
        let cursor = app.cursor.min(shown - 1);
        if cursor < app.scroll {
            app.scroll = cursor;
        } else if cursor >= app.scroll + per_page {
            app.scroll = cursor + 1 - per_page;
        }

        let search_re = app.search_re();
        let selected_id = app.dashboard.shown_id();
        for (i, quote) in visible.iter().enumerate().skip(app.scroll).take(per_page) {
            let is_cursor = i == cursor;
            let is_open = selected_id == Some(quote.id.as_str());
            entry_lines(
                &mut lines,
                app,
                quote,
                is_cursor,
                is_open,
                search_re.as_ref(),
                width,
            );
        }
    }

    while lines.len() < body_rows {
        lines.push(Line::from(""));
    }
    lines.truncate(body_rows);
    lines.push(Line::from(Span::styled(
        format!(" Showing {} of {} quotes", shown, total),
        dim_style,
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn entry_lines<'a>(
    lines: &mut Vec<Line<'a>>,
    app: &App,
    quote: &Quote,
    is_cursor: bool,
    is_open: bool,
    search_re: Option<&regex::Regex>,
    width: usize,
) {
    let theme = &app.theme;
    let row_bg = if is_cursor { theme.selection_bg } else { theme.background };
    let base = Style::default().bg(row_bg);
    let text_style = base.fg(theme.text);
    let dim_style = base.fg(theme.dim);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let field = app.dashboard.filter.field;

    let indicator = if is_open {
        "\u{25B8} "
    } else if is_cursor {
        "\u{258E} "
    } else {
        "  "
    };

    // Row 1: name, badge right-aligned
    let mut spans = vec![Span::styled(indicator, base.fg(theme.highlight))];
    let badge = format!(" {} ", quote.badge());
    let name_width = width.saturating_sub(2 + badge.chars().count() + 1);
    let name = unicode::truncate_to_width(&unicode::single_line(&quote.name), name_width);
    let name_style = text_style.fg(theme.text_bright).add_modifier(Modifier::BOLD);
    if field == SearchField::Name {
        push_highlighted_spans(&mut spans, &name, name_style, match_style, search_re);
    } else {
        spans.push(Span::styled(name, name_style));
    }
    pad_right(&mut spans, width, badge.chars().count() + 1, base);
    spans.push(Span::styled(
        badge,
        Style::default()
            .fg(theme.background)
            .bg(theme.marked_color(quote.marked)),
    ));
    spans.push(Span::styled(" ", base));
    lines.push(Line::from(spans));

    // Row 2: service and short date
    let mut spans = vec![Span::styled("  ", base)];
    let date = date::format_date(&quote.created_at);
    let service_width = width.saturating_sub(2 + unicode::display_width(&date) + 3);
    let service =
        unicode::truncate_to_width(&unicode::single_line(&quote.service), service_width);
    let styles = (text_style, match_style);
    secondary(&mut spans, &service, field == SearchField::Service, styles, search_re);
    spans.push(Span::styled(" \u{00B7} ", dim_style));
    let styles = (dim_style, match_style);
    secondary(&mut spans, &date, field == SearchField::CreatedAt, styles, search_re);
    pad_right(&mut spans, width, 0, base);
    lines.push(Line::from(spans));

    // Row 3: the searched field when it isn't already shown, else the message
    let preview_field = match field {
        SearchField::Phone | SearchField::Email | SearchField::Message => field,
        _ => SearchField::Message,
    };
    let mut spans = vec![Span::styled("  ", base)];
    let preview = unicode::truncate_to_width(
        &unicode::single_line(&quote.field_text(preview_field)),
        width.saturating_sub(3),
    );
    let styles = (dim_style, match_style);
    secondary(&mut spans, &preview, preview_field == field, styles, search_re);
    pad_right(&mut spans, width, 0, base);
    lines.push(Line::from(spans));
}

fn secondary<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    searched: bool,
    (style, match_style): (Style, Style),
    search_re: Option<&regex::Regex>,
) {
    if searched {
        push_highlighted_spans(spans, text, style, match_style, search_re);
    } else {
        spans.push(Span::styled(text.to_string(), style));
    }
}

/// Pad with `style` so that `reserve` cells remain before `width`
fn pad_right(spans: &mut Vec<Span>, width: usize, reserve: usize, style: Style) {
    let used = spans_width(spans);
    if used + reserve < width {
        spans.push(Span::styled(" ".repeat(width - used - reserve), style));
    }
}
