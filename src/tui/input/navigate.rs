use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::EditableField;
use crate::tui::app::{App, Mode};

use super::common::{move_cursor, reset_cursor_for_filter};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.cursor = app.dashboard.visible().len().saturating_sub(1);
        }
        (_, KeyCode::PageDown) => move_cursor(app, 10),
        (_, KeyCode::PageUp) => move_cursor(app, -10),

        // Panel
        (_, KeyCode::Enter) => {
            if let Some(id) = app.cursor_quote().map(|q| q.id.clone()) {
                app.dashboard.select(&id);
            }
        }
        (_, KeyCode::Esc) => app.dashboard.close_panel(),

        // Filters
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,
        (_, KeyCode::Char('s')) => {
            app.dashboard.filter.status = app.dashboard.filter.status.next();
            reset_cursor_for_filter(app);
        }
        (_, KeyCode::Char('f')) => {
            app.dashboard.filter.field = app.dashboard.filter.field.next();
            reset_cursor_for_filter(app);
        }

        // Server actions
        (_, KeyCode::Char('r')) => app.refresh(),
        (_, KeyCode::Char('m')) => toggle_marked(app),
        (_, KeyCode::Char('e')) => begin_edit(app),
        (_, KeyCode::Char('d')) => begin_delete(app),
        _ => {}
    }
}

fn toggle_marked(app: &mut App) {
    let Some(id) = app.target_id() else {
        return;
    };
    if let Some(request) = app.dashboard.toggle_marked(&id) {
        app.status_message = Some("Updating status...".into());
        app.send(request);
    }
}

/// Edit the record in the panel, opening the cursor's record first if the
/// panel is empty.
fn begin_edit(app: &mut App) {
    if app.dashboard.shown_id().is_none() {
        let Some(id) = app.cursor_quote().map(|q| q.id.clone()) else {
            return;
        };
        app.dashboard.select(&id);
    }
    if app.dashboard.start_edit() {
        app.mode = Mode::Edit;
        app.focus_field(EditableField::Name);
    }
}

fn begin_delete(app: &mut App) {
    let Some(id) = app.target_id() else {
        return;
    };
    if app.dashboard.request_delete(&id) {
        app.mode = Mode::Confirm;
    }
}
