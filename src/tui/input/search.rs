use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::common::reset_cursor_for_filter;

/// The term is applied as it is typed; Enter keeps it, Esc clears it.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.dashboard.filter.term.clear();
            app.mode = Mode::Navigate;
            reset_cursor_for_filter(app);
        }
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            let term = &mut app.dashboard.filter.term;
            if let Some(start) = unicode::prev_grapheme_boundary(term, term.len()) {
                term.truncate(start);
                reset_cursor_for_filter(app);
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            app.dashboard.filter.term.clear();
            reset_cursor_for_filter(app);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let term = &mut app.dashboard.filter.term;
            let start = unicode::word_boundary_left(term, term.len());
            term.truncate(start);
            reset_cursor_for_filter(app);
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.dashboard.filter.term.push(c);
            reset_cursor_for_filter(app);
        }
        _ => {}
    }
}
