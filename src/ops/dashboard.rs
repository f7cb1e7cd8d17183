//! Application state for the quote dashboard.
//!
//! `Dashboard` owns the cached collection, the view filter and the detail
//! panel. User intents return a `Request` instead of touching the collection;
//! the collection only changes when a `Completion` is applied, and then always
//! to the server's representation.

use crate::api::{ApiError, Completion, Request};
use crate::model::{EditableField, Quote, QuoteId, ViewFilter};

use super::view;

pub const FETCH_ERROR: &str = "Failed to fetch quotes";
pub const MARK_ERROR: &str = "Failed to update marked status. Please try again.";
pub const DELETE_ERROR: &str = "Failed to delete quote. Please try again.";
pub const UPDATE_ERROR: &str = "Failed to update quote. Please try again.";

/// The detail/edit panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Empty,
    Viewing(Quote),
    /// `shown` is the record being edited; `draft` is the working copy
    Editing { shown: Quote, draft: Quote },
}

impl Panel {
    /// The record the panel is about, if any
    pub fn shown(&self) -> Option<&Quote> {
        match self {
            Panel::Empty => None,
            Panel::Viewing(q) => Some(q),
            Panel::Editing { shown, .. } => Some(shown),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Panel::Editing { .. })
    }
}

/// A blocking error notification raised by a failed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Underlying cause, for diagnostics
    pub cause: String,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    /// Cache of server state, in server order
    pub quotes: Vec<Quote>,
    pub filter: ViewFilter,
    pub loading: bool,
    /// Page-level fetch error
    pub error: Option<String>,
    pub panel: Panel,
    pub notice: Option<Notice>,
    /// Id awaiting delete confirmation
    pub pending_delete: Option<QuoteId>,
}

impl Dashboard {
    pub fn new(filter: ViewFilter) -> Self {
        Dashboard {
            filter,
            ..Default::default()
        }
    }

    /// The filtered/searched subset, derived from the current inputs
    pub fn visible(&self) -> Vec<&Quote> {
        view::derive_view(&self.quotes, &self.filter)
    }

    pub fn find(&self, id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// Id of the record in the detail panel
    pub fn shown_id(&self) -> Option<&str> {
        self.panel.shown().map(|q| q.id.as_str())
    }

    // -----------------------------------------------------------------------
    // Fetch
    // -----------------------------------------------------------------------

    /// Start a full reload. Returns None while one is already loading.
    pub fn begin_refresh(&mut self) -> Option<Request> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(Request::LoadAll)
    }

    // -----------------------------------------------------------------------
    // Panel
    // -----------------------------------------------------------------------

    /// Show a record in the panel. Ignored while an edit is in progress.
    pub fn select(&mut self, id: &str) -> bool {
        if self.panel.is_editing() {
            return false;
        }
        match self.find(id) {
            Some(quote) => {
                self.panel = Panel::Viewing(quote.clone());
                true
            }
            None => false,
        }
    }

    /// Viewing -> Empty
    pub fn close_panel(&mut self) {
        if matches!(self.panel, Panel::Viewing(_)) {
            self.panel = Panel::Empty;
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Ask the server to flip `marked` on `id`, based on the cached value.
    pub fn toggle_marked(&self, id: &str) -> Option<Request> {
        let quote = self.find(id)?;
        Some(Request::SetMarked {
            id: quote.id.clone(),
            marked: !quote.marked,
        })
    }

    /// Put `id` up for confirmation. Nothing is sent yet.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    /// The user accepted the prompt
    pub fn confirm_delete(&mut self) -> Option<Request> {
        let id = self.pending_delete.take()?;
        Some(Request::Delete { id })
    }

    /// The user declined the prompt: a no-op, not an error
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Viewing -> Editing with a fresh draft of the shown record
    pub fn start_edit(&mut self) -> bool {
        match &self.panel {
            Panel::Viewing(shown) => {
                let shown = shown.clone();
                self.panel = Panel::Editing {
                    draft: shown.clone(),
                    shown,
                };
                true
            }
            _ => false,
        }
    }

    pub fn draft(&self) -> Option<&Quote> {
        match &self.panel {
            Panel::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Mutable access to one editable field of the draft
    pub fn draft_field_mut(&mut self, field: EditableField) -> Option<&mut String> {
        match &mut self.panel {
            Panel::Editing { draft, .. } => Some(field.get_mut(draft)),
            _ => None,
        }
    }

    /// Full update of the five editable fields from the draft
    pub fn save_edit(&self) -> Option<Request> {
        let draft = self.draft()?;
        Some(Request::Update {
            id: draft.id.clone(),
            update: draft.to_update(),
        })
    }

    /// Editing -> Viewing, discarding the draft
    pub fn cancel_edit(&mut self) {
        if let Panel::Editing { shown, .. } = &self.panel {
            self.panel = Panel::Viewing(shown.clone());
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // -----------------------------------------------------------------------
    // Reconciliation
    // -----------------------------------------------------------------------

    /// Fold a finished request into the state.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded(result) => self.apply_loaded(result),
            Completion::Marked { id, result } => match result {
                Ok(quote) => {
                    log::info!("quote {} marked={}", id, quote.marked);
                    self.replace(&id, quote);
                    self.panel = Panel::Empty;
                }
                Err(e) => self.raise("toggling marked status", &id, MARK_ERROR, e),
            },
            Completion::Updated { id, result } => match result {
                Ok(quote) => {
                    log::info!("quote {} updated", id);
                    self.replace(&id, quote.clone());
                    if self.shown_id() == Some(id.as_str()) {
                        self.panel = Panel::Viewing(quote);
                    }
                }
                Err(e) => self.raise("updating quote", &id, UPDATE_ERROR, e),
            },
            Completion::Deleted { id, result } => match result {
                Ok(()) => {
                    log::info!("quote {} deleted", id);
                    self.quotes.retain(|q| q.id != id);
                    if self.shown_id() == Some(id.as_str()) {
                        self.panel = Panel::Empty;
                    }
                }
                Err(e) => self.raise("deleting quote", &id, DELETE_ERROR, e),
            },
        }
    }

    fn apply_loaded(&mut self, result: Result<Vec<Quote>, ApiError>) {
        self.loading = false;
        match result {
            Ok(quotes) => {
                log::info!("loaded {} quotes", quotes.len());
                self.quotes = quotes;
                self.resync_panel();
            }
            Err(e) => {
                log::error!("Error fetching quotes: {}", e);
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
    }

    /// After a reload, show the fresh copy of the viewed record.
    /// An edit draft is never touched.
    fn resync_panel(&mut self) {
        if let Panel::Viewing(shown) = &self.panel {
            self.panel = match self.quotes.iter().find(|q| q.id == shown.id) {
                Some(fresh) => Panel::Viewing(fresh.clone()),
                None => Panel::Empty,
            };
        }
    }

    /// Swap the cached record for the server's copy. A record that has since
    /// disappeared locally is not resurrected.
    fn replace(&mut self, id: &str, quote: Quote) {
        if let Some(slot) = self.quotes.iter_mut().find(|q| q.id == id) {
            *slot = quote;
        }
    }

    fn raise(&mut self, action: &str, id: &str, message: &str, error: ApiError) {
        log::error!("Error {} {}: {}", action, id, error);
        self.notice = Some(Notice {
            message: message.to_string(),
            cause: error.to_string(),
        });
    }
}
