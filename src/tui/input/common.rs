use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Map a shifted symbol key to the character it produces on a US layout
pub(super) fn shift_symbol(c: char) -> Option<char> {
    match c {
        '/' => Some('?'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '4' => Some('$'),
        '5' => Some('%'),
        '6' => Some('^'),
        '7' => Some('&'),
        '8' => Some('*'),
        '9' => Some('('),
        '0' => Some(')'),
        '-' => Some('_'),
        '=' => Some('+'),
        '[' => Some('{'),
        ']' => Some('}'),
        '\\' => Some('|'),
        ';' => Some(':'),
        '\'' => Some('"'),
        ',' => Some('<'),
        '.' => Some('>'),
        '`' => Some('~'),
        _ => None,
    }
}

/// Some terminals report Shift+letter as a lowercase char with SHIFT set,
/// others as the uppercase char. Fold both into the uppercase form.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Move the list cursor by `delta`, clamped to the visible list
pub(super) fn move_cursor(app: &mut App, delta: i32) {
    let len = app.dashboard.visible().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor as i64 + delta as i64;
    app.cursor = next.clamp(0, len as i64 - 1) as usize;
}

/// The filter changed: the old cursor index means nothing any more
pub(super) fn reset_cursor_for_filter(app: &mut App) {
    app.cursor = 0;
    app.scroll = 0;
}
