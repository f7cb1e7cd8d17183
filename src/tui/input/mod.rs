mod common;
mod confirm;
mod edit;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use common::normalize_key;
use confirm::handle_confirm;
use edit::handle_edit;
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // An error notice blocks until acknowledged
    if app.dashboard.notice.is_some() {
        app.dashboard.dismiss_notice();
        return;
    }

    // Help overlay: any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Completion, Request};
    use crate::model::{EditableField, QuoteUpdate, SearchField, StatusFilter};
    use crate::ops::Panel;
    use crate::ops::view::tests::quote;
    use crate::tui::render::test_helpers::app_with_quotes;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn press_mod(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_key(app, KeyEvent::new(code, modifiers));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn three() -> App {
        app_with_quotes(vec![
            quote("a", "Alice", false),
            quote("b", "Bob", true),
            quote("c", "Cara", false),
        ])
    }

    // -- navigate -----------------------------------------------------------

    #[test]
    fn test_cursor_movement_stays_in_bounds() {
        let mut app = three();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
        press_mod(&mut app, KeyCode::Char('g'), KeyModifiers::SHIFT);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_enter_selects_and_esc_closes() {
        let mut app = three();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dashboard.shown_id(), Some("b"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.dashboard.panel, Panel::Empty);
    }

    #[test]
    fn test_status_and_field_cycling() {
        let mut app = three();
        app.cursor = 2;
        press(&mut app, KeyCode::Char('s'));
        // All wraps around to the default
        assert_eq!(app.dashboard.filter.status, StatusFilter::NotMarked);
        assert_eq!(app.dashboard.visible().len(), 2);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.dashboard.filter.field, SearchField::Phone);
    }

    #[test]
    fn test_refresh_key_queues_load() {
        let mut app = three();
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.take_requests(), vec![Request::LoadAll]);
    }

    #[test]
    fn test_toggle_queues_request_without_local_change() {
        let mut app = three();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(
            app.take_requests(),
            vec![Request::SetMarked {
                id: "b".into(),
                marked: false
            }]
        );
        assert!(app.dashboard.find("b").unwrap().marked);
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = three();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_notice_blocks_until_dismissed() {
        let mut app = three();
        app.apply_completion(Completion::Deleted {
            id: "a".into(),
            result: Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
            }),
        });
        press(&mut app, KeyCode::Char('q'));
        assert!(app.dashboard.notice.is_none());
        assert!(!app.should_quit);
    }

    // -- search -------------------------------------------------------------

    #[test]
    fn test_search_filters_live() {
        let mut app = three();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "CA");
        assert_eq!(app.dashboard.filter.term, "CA");
        let ids: Vec<&str> = app.dashboard.visible().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dashboard.filter.term, "C");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.dashboard.filter.term, "C");
    }

    #[test]
    fn test_search_esc_clears_term() {
        let mut app = three();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zz");
        assert!(app.dashboard.visible().is_empty());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.dashboard.filter.term, "");
        assert_eq!(app.dashboard.visible().len(), 3);
    }

    // -- delete -------------------------------------------------------------

    #[test]
    fn test_delete_confirmed() {
        let mut app = three();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.take_requests().is_empty());
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(
            app.take_requests(),
            vec![Request::Delete { id: "a".into() }]
        );
        // Removal waits for the server
        assert_eq!(app.dashboard.quotes.len(), 3);
    }

    #[test]
    fn test_delete_declined_is_noop() {
        let mut app = three();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.take_requests().is_empty());
        assert!(app.dashboard.pending_delete.is_none());
        assert!(app.dashboard.notice.is_none());
    }

    // -- edit ---------------------------------------------------------------

    fn editing_alice() -> App {
        let mut app = three();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        app
    }

    #[test]
    fn test_edit_without_panel_opens_cursor_record() {
        let mut app = three();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.dashboard.draft().unwrap().id, "b");
        assert_eq!(app.edit_field, EditableField::Name);
        assert_eq!(app.edit_cursor, "Bob".len());
    }

    #[test]
    fn test_typing_edits_draft_only() {
        let mut app = editing_alice();
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "ia");
        assert_eq!(app.dashboard.draft().unwrap().name, "Alicia");
        assert_eq!(app.dashboard.find("a").unwrap().name, "Alice");

        press(&mut app, KeyCode::Home);
        type_str(&mut app, "Dr ");
        assert_eq!(app.dashboard.draft().unwrap().name, "Dr Alicia");
    }

    #[test]
    fn test_tab_moves_between_fields() {
        let mut app = editing_alice();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.edit_field, EditableField::Phone);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.edit_field, EditableField::Email);
        press_mod(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.edit_field, EditableField::Phone);
    }

    #[test]
    fn test_enter_in_message_inserts_newline() {
        let mut app = editing_alice();
        app.focus_field(EditableField::Message);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Thanks");
        assert_eq!(
            app.dashboard.draft().unwrap().message,
            "Call me back\nThanks"
        );
    }

    #[test]
    fn test_ctrl_s_sends_update_and_keeps_editing() {
        let mut app = editing_alice();
        type_str(&mut app, "!");
        press_mod(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        let requests = app.take_requests();
        let expected = QuoteUpdate {
            name: "Alice!".into(),
            phone: "555-01a".into(),
            email: "alice@example.com".into(),
            service: "Roofing".into(),
            message: "Call me back".into(),
        };
        assert_eq!(
            requests,
            vec![Request::Update {
                id: "a".into(),
                update: expected
            }]
        );
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn test_esc_cancels_edit() {
        let mut app = editing_alice();
        type_str(&mut app, "xyz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(
            app.dashboard.panel,
            Panel::Viewing(quote("a", "Alice", false))
        );
    }

    #[test]
    fn test_word_delete_and_grapheme_backspace() {
        let mut app = editing_alice();
        app.focus_field(EditableField::Service);
        type_str(&mut app, " café");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dashboard.draft().unwrap().service, "Roofing caf");
        press_mod(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(app.dashboard.draft().unwrap().service, "Roofing ");
    }
}
