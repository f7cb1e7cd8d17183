use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => save(app),
        (_, KeyCode::Esc) => {
            app.dashboard.cancel_edit();
            app.mode = Mode::Navigate;
            app.status_message = None;
        }
        (_, KeyCode::Tab) => app.focus_field(app.edit_field.next()),
        (_, KeyCode::BackTab) => app.focus_field(app.edit_field.prev()),
        (_, KeyCode::Enter) => {
            if app.edit_field.is_multiline() {
                insert(app, "\n");
            } else {
                app.focus_field(app.edit_field.next());
            }
        }

        (_, KeyCode::Left) => {
            let cursor = app.edit_cursor;
            if let Some(text) = field(app)
                && let Some(prev) = unicode::prev_grapheme_boundary(text, cursor)
            {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            let cursor = app.edit_cursor;
            if let Some(text) = field(app)
                && let Some(next) = unicode::next_grapheme_boundary(text, cursor)
            {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
            let cursor = app.edit_cursor;
            if let Some(text) = field(app) {
                app.edit_cursor = line_start(text, cursor);
            }
        }
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            let cursor = app.edit_cursor;
            if let Some(text) = field(app) {
                app.edit_cursor = line_end(text, cursor);
            }
        }
        (_, KeyCode::Up) => move_line(app, -1),
        (_, KeyCode::Down) => move_line(app, 1),

        (KeyModifiers::CONTROL, KeyCode::Char('w')) | (KeyModifiers::ALT, KeyCode::Backspace) => {
            let cursor = app.edit_cursor;
            let Some(start) = field(app).map(|text| unicode::word_boundary_left(text, cursor))
            else {
                return;
            };
            remove_range(app, start, cursor);
        }
        (_, KeyCode::Backspace) => {
            let cursor = app.edit_cursor;
            if let Some(start) = field(app).and_then(|t| unicode::prev_grapheme_boundary(t, cursor))
            {
                remove_range(app, start, cursor);
            }
        }
        (_, KeyCode::Delete) => {
            let cursor = app.edit_cursor;
            if let Some(end) = field(app).and_then(|t| unicode::next_grapheme_boundary(t, cursor)) {
                remove_range(app, cursor, end);
            }
        }
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            let mut buf = [0u8; 4];
            insert(app, c.encode_utf8(&mut buf));
        }
        _ => {}
    }
}

fn save(app: &mut App) {
    if let Some(request) = app.dashboard.save_edit() {
        app.status_message = Some("Saving...".into());
        app.send(request);
    }
}

fn field(app: &App) -> Option<&str> {
    app.dashboard.draft().map(|draft| app.edit_field.get(draft))
}

fn insert(app: &mut App, text: &str) {
    let cursor = app.edit_cursor;
    if let Some(value) = app.dashboard.draft_field_mut(app.edit_field) {
        let at = cursor.min(value.len());
        value.insert_str(at, text);
        app.edit_cursor = at + text.len();
    }
}

fn remove_range(app: &mut App, start: usize, end: usize) {
    if let Some(value) = app.dashboard.draft_field_mut(app.edit_field)
        && start < end
        && end <= value.len()
    {
        value.replace_range(start..end, "");
        app.edit_cursor = start;
    }
}

fn line_start(text: &str, cursor: usize) -> usize {
    text[..cursor].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, cursor: usize) -> usize {
    text[cursor..].find('\n').map_or(text.len(), |i| cursor + i)
}

/// Move up or down a line inside the message, keeping the grapheme column.
/// Single-line fields move focus instead.
fn move_line(app: &mut App, direction: i32) {
    if !app.edit_field.is_multiline() {
        let target = if direction < 0 {
            app.edit_field.prev()
        } else {
            app.edit_field.next()
        };
        app.focus_field(target);
        return;
    }
    let cursor = app.edit_cursor;
    let Some(text) = field(app) else {
        return;
    };
    let start = line_start(text, cursor);
    let column = text[start..cursor].graphemes(true).count();

    let target_start = if direction < 0 {
        if start == 0 {
            return;
        }
        line_start(text, start - 1)
    } else {
        let end = line_end(text, cursor);
        if end == text.len() {
            return;
        }
        end + 1
    };
    let target_end = line_end(text, target_start);
    let offset = text[target_start..target_end]
        .grapheme_indices(true)
        .nth(column)
        .map_or(target_end, |(i, _)| target_start + i);
    app.edit_cursor = offset;
}
