use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use regex::Regex;

use crate::api::{Completion, QuoteClient, Request};
use crate::model::{Config, EditableField, Quote, QuoteId, UiConfig};
use crate::ops::Dashboard;

use super::dispatch::Dispatcher;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a search term (filters live)
    Search,
    /// Editing the draft in the detail panel
    Edit,
    /// Waiting for y/n on a delete
    Confirm,
}

/// Main application state
pub struct App {
    pub dashboard: Dashboard,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Cursor index into the visible list
    pub cursor: usize,
    /// First visible list entry
    pub scroll: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Field focused in edit mode
    pub edit_field: EditableField,
    /// Byte offset into the focused field
    pub edit_cursor: usize,
    /// Transient message for the status row
    pub status_message: Option<String>,
    /// Requests produced by input, handed to the dispatcher by the event loop
    pub outbox: Vec<Request>,
}

impl App {
    pub fn new(dashboard: Dashboard, ui: &UiConfig) -> Self {
        App {
            dashboard,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            cursor: 0,
            scroll: 0,
            show_help: false,
            edit_field: EditableField::Name,
            edit_cursor: 0,
            status_message: None,
            outbox: Vec::new(),
        }
    }

    pub fn send(&mut self, request: Request) {
        self.outbox.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Reload everything unless a reload is already running
    pub fn refresh(&mut self) {
        if let Some(request) = self.dashboard.begin_refresh() {
            self.send(request);
        }
    }

    /// Quote under the list cursor
    pub fn cursor_quote(&self) -> Option<&Quote> {
        self.dashboard.visible().get(self.cursor).copied()
    }

    /// The record an action applies to: the one in the panel, else the cursor's
    pub fn target_id(&self) -> Option<QuoteId> {
        self.dashboard
            .shown_id()
            .map(str::to_string)
            .or_else(|| self.cursor_quote().map(|q| q.id.clone()))
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.dashboard.visible().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Put the edit cursor at the end of the focused field
    pub fn focus_field(&mut self, field: EditableField) {
        self.edit_field = field;
        self.edit_cursor = self
            .dashboard
            .draft()
            .map_or(0, |draft| field.get(draft).len());
    }

    /// Fold a finished request into the dashboard and resync the mode.
    pub fn apply_completion(&mut self, completion: Completion) {
        self.dashboard.apply(completion);
        self.status_message = None;
        if self.mode == Mode::Edit && !self.dashboard.panel.is_editing() {
            self.mode = Mode::Navigate;
        }
        if self.mode == Mode::Confirm && self.dashboard.pending_delete.is_none() {
            self.mode = Mode::Navigate;
        }
        self.clamp_cursor();
    }

    /// Case-insensitive literal regex of the current term, for highlighting
    pub fn search_re(&self) -> Option<Regex> {
        let term = &self.dashboard.filter.term;
        if term.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }
}

/// Run the TUI application
pub fn run(config: &Config, client: QuoteClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut dispatcher = Dispatcher::new(client)?;

    let mut app = App::new(Dashboard::new(config.ui.view_filter()), &config.ui);
    app.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &mut dispatcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if dispatcher.in_flight() > 0 {
        log::warn!("exiting with {} request(s) in flight", dispatcher.in_flight());
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &mut Dispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for request in app.take_requests() {
            dispatcher.submit(request);
        }
        for completion in dispatcher.drain() {
            app.apply_completion(completion);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
