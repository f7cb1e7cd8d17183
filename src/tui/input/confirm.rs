use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            app.mode = Mode::Navigate;
            if let Some(request) = app.dashboard.confirm_delete() {
                app.status_message = Some("Deleting...".into());
                app.send(request);
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.dashboard.cancel_delete();
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
