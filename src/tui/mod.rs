//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! Everything the screen shows comes from the store's current snapshot;
//! `TuiState` only holds presentation state (cursor, open overlays,
//! whether the search field has focus, the last status line).
//!
//! ## Redraw Strategy
//!
//! The loop sleeps up to 500ms waiting for input and only redraws after
//! an event or a terminal resize. All pending events are drained before
//! the next frame.
//!
//! ## Links
//!
//! `o` opens the selected tool's URL in the browser and `y` copies it to the
//! clipboard (OSC 52). `handle_event` only records a `LinkRequest`; the loop
//! carries it out so key handling stays free of side effects.
//!
//! ## Autosave
//!
//! A store subscriber raises a dirty flag on every change. When the loop
//! exits the catalog is written once if the flag is set and autosave is on.

mod component;
pub mod components;
mod event;
mod ui;

use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;
use std::time::Duration;

use crossterm::clipboard::CopyToClipboard;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::Action;
use crate::core::catalog;
use crate::core::config::ResolvedConfig;
use crate::core::model::{AppState, CategoryId, ToolId};
use crate::core::store::Store;
use crate::tui::component::EventHandler;
use crate::tui::components::sidebar::build_rows;
use crate::tui::components::{
    FormEvent, PromptEvent, PromptPurpose, PromptState, SidebarEvent, SidebarRow, SidebarState,
    ToolFormState,
};
pub use crate::tui::event::TuiEvent;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

/// Something to do with a tool's URL outside the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRequest {
    Open(String),
    Copy(String),
}

/// TUI-specific presentation state (not part of the catalog)
pub struct TuiState {
    pub sidebar: SidebarState,
    // Overlays (None = hidden)
    pub form: Option<ToolFormState>,
    pub prompt: Option<PromptState>,
    /// Keystrokes edit the search query.
    pub searching: bool,
    /// First `d` seen on the selected tool.
    pub confirm_delete: bool,
    /// Feedback for the last key press; cleared by the next one.
    pub status_message: String,
    pub show_pinned_section: bool,
    pub link_request: Option<LinkRequest>,
}

impl TuiState {
    pub fn new(show_pinned_section: bool) -> Self {
        Self {
            sidebar: SidebarState::new(),
            form: None,
            prompt: None,
            searching: false,
            confirm_delete: false,
            status_message: String::new(),
            show_pinned_section,
            link_request: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(store: &mut Store, config: &ResolvedConfig) -> std::io::Result<()> {
    let mut tui = TuiState::new(config.show_pinned_section);

    let dirty = Rc::new(Cell::new(false));
    let subscription = {
        let dirty = Rc::clone(&dirty);
        store.subscribe(move |_| dirty.set(true))
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame
    loop {
        if needs_redraw {
            let state = store.state();
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(store, &mut tui, event) {
                should_quit = true;
                break;
            }
            if let Some(request) = tui.link_request.take() {
                tui.status_message = follow_link(request);
            }
        }
        if should_quit {
            break;
        }
    }

    ratatui::restore();
    store.unsubscribe(subscription);

    if dirty.get() {
        autosave(store, config);
    }
    Ok(())
}

fn autosave(store: &Store, config: &ResolvedConfig) {
    if !config.autosave {
        info!("Autosave disabled, discarding unsaved changes");
        return;
    }
    let Some(path) = &config.catalog_path else {
        warn!("No catalog path, changes not saved");
        return;
    };
    if let Err(e) = catalog::save_catalog(path, &store.state()) {
        warn!("Failed to save catalog to {}: {}", path.display(), e);
    }
}

/// Opens or copies a URL. Returns the status line to show.
fn follow_link(request: LinkRequest) -> String {
    match request {
        LinkRequest::Open(url) => match open::that(&url) {
            Ok(()) => {
                info!("Opened {}", url);
                "Opened in browser".to_string()
            }
            Err(e) => {
                warn!("Failed to open {}: {}", url, e);
                format!("Could not open link: {}", e)
            }
        },
        LinkRequest::Copy(url) => match execute!(stdout(), CopyToClipboard::to_clipboard_from(&url)) {
            Ok(()) => "Link copied".to_string(),
            Err(e) => {
                warn!("Failed to copy {}: {}", url, e);
                format!("Could not copy link: {}", e)
            }
        },
    }
}

/// Applies one input event. Returns true when the app should quit.
pub fn handle_event(store: &mut Store, tui: &mut TuiState, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return true,
        _ => {}
    }
    tui.status_message.clear();

    if let Some(form) = tui.form.as_mut() {
        if let Some(form_event) = form.handle_event(&event) {
            tui.form = None;
            if let FormEvent::Save(action) = form_event {
                save_tool(store, tui, action);
            }
        }
        return false;
    }

    if let Some(prompt) = tui.prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(PromptEvent::Submit(name)) => {
                let (action, message) = match &prompt.purpose {
                    PromptPurpose::NewCategory => (Action::AddCategory { name }, "Category added"),
                    PromptPurpose::RenameCategory(id) => (
                        Action::RenameCategory {
                            id: id.clone(),
                            name,
                        },
                        "Category renamed",
                    ),
                };
                if store.dispatch(action) {
                    tui.status_message = message.to_string();
                }
                tui.prompt = None;
            }
            Some(PromptEvent::Cancel) => tui.prompt = None,
            None => {}
        }
        return false;
    }

    if tui.searching {
        handle_search(store, tui, event);
        return false;
    }

    if tui.confirm_delete {
        tui.confirm_delete = false;
        let state = store.state();
        match (&event, state.selected_tool_id.clone()) {
            (TuiEvent::InputChar('d'), Some(id)) => {
                if store.dispatch(Action::DeleteTool { id }) {
                    tui.status_message = "Tool deleted".to_string();
                }
            }
            _ => tui.status_message = "Delete cancelled".to_string(),
        }
        return false;
    }

    let state = store.state();
    let rows = visible_rows(&state, tui);
    tui.sidebar.sync(rows.len());
    let cursor_row = rows.get(tui.sidebar.cursor);
    let selected = state.selected_tool_id.clone();

    match event {
        TuiEvent::InputChar('q') => return true,
        TuiEvent::InputChar('/') => {
            tui.searching = true;
            if !state.is_sidebar_open {
                store.dispatch(Action::ToggleSidebar);
            }
        }
        TuiEvent::InputChar('b') => {
            store.dispatch(Action::ToggleSidebar);
        }
        TuiEvent::InputChar('a') => {
            let preferred = cursor_category(cursor_row, &state)
                .or_else(|| state.selected_tool().map(|t| t.category_id.clone()));
            tui.form = Some(ToolFormState::for_new(&state, preferred.as_ref()));
        }
        TuiEvent::InputChar('e') => {
            if let Some(tool) = state.selected_tool() {
                tui.form = Some(ToolFormState::for_edit(&state, tool));
            }
        }
        TuiEvent::InputChar('d') => {
            if selected.is_some() {
                tui.confirm_delete = true;
                tui.status_message = "Press d again to delete".to_string();
            }
        }
        TuiEvent::InputChar('p') => {
            if let Some(id) = selected
                && store.dispatch(Action::TogglePin { id: id.clone() })
            {
                let pinned = store.state().tool(&id).is_some_and(|t| t.is_pinned);
                tui.status_message = if pinned { "Pinned" } else { "Unpinned" }.to_string();
            }
        }
        TuiEvent::InputChar('o') => {
            if let Some(tool) = state.selected_tool() {
                tui.link_request = Some(LinkRequest::Open(tool.url.clone()));
            }
        }
        TuiEvent::InputChar('y') => {
            if let Some(tool) = state.selected_tool() {
                tui.link_request = Some(LinkRequest::Copy(tool.url.clone()));
            }
        }
        TuiEvent::InputChar('n') => {
            tui.prompt = Some(PromptState::new(PromptPurpose::NewCategory, ""));
        }
        TuiEvent::InputChar('r') => {
            if let Some(SidebarRow::Category { id, name, .. }) = cursor_row {
                tui.prompt = Some(PromptState::new(
                    PromptPurpose::RenameCategory(id.clone()),
                    name.clone(),
                ));
            }
        }
        TuiEvent::InputChar('x') => {
            if let Some(SidebarRow::Category { id, .. }) = cursor_row {
                tui.status_message = if store.dispatch(Action::DeleteCategory { id: id.clone() }) {
                    "Category removed"
                } else {
                    "Only empty categories can be removed"
                }
                .to_string();
            }
        }
        TuiEvent::Escape => {
            if selected.is_some() {
                store.dispatch(Action::SelectTool { id: None });
            }
        }
        _ => {
            if let Some(SidebarEvent::Activate(index)) = tui.sidebar.handle_event(&event) {
                activate_row(store, rows.get(index));
            }
        }
    }
    false
}

fn visible_rows(state: &AppState, tui: &TuiState) -> Vec<SidebarRow> {
    if state.is_sidebar_open {
        build_rows(state, tui.show_pinned_section)
    } else {
        Vec::new()
    }
}

/// The category under the cursor, or the one owning the tool under it.
fn cursor_category(row: Option<&SidebarRow>, state: &AppState) -> Option<CategoryId> {
    match row? {
        SidebarRow::Category { id, .. } => Some(id.clone()),
        SidebarRow::Tool { id, .. } => state.tool(id).map(|t| t.category_id.clone()),
        SidebarRow::PinnedHeader { .. } => None,
    }
}

fn activate_row(store: &mut Store, row: Option<&SidebarRow>) {
    match row {
        Some(SidebarRow::Category { id, .. }) => {
            store.dispatch(Action::ToggleCategoryCollapsed {
                category_id: id.clone(),
            });
        }
        Some(SidebarRow::Tool { id, .. }) => {
            store.dispatch(Action::SelectTool {
                id: Some(id.clone()),
            });
        }
        Some(SidebarRow::PinnedHeader { .. }) | None => {}
    }
}

fn handle_search(store: &mut Store, tui: &mut TuiState, event: TuiEvent) {
    let mut query = store.state().search_query.clone();
    match event {
        TuiEvent::InputChar(c) => query.push(c),
        TuiEvent::Paste(data) => query.push_str(&data.replace(['\r', '\n'], " ")),
        TuiEvent::Backspace => {
            query.pop();
        }
        TuiEvent::Submit => {
            tui.searching = false;
            return;
        }
        TuiEvent::Escape => {
            tui.searching = false;
            query.clear();
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            tui.sidebar.handle_event(&event);
            return;
        }
        _ => return,
    }
    store.dispatch(Action::SetSearchQuery { query });
}

/// Dispatch a form's action; a newly added tool becomes the selection.
fn save_tool(store: &mut Store, tui: &mut TuiState, action: Action) {
    let before = store.state();
    let adding = matches!(action, Action::AddTool(_));
    if !store.dispatch(action) {
        tui.status_message = "Nothing changed".to_string();
        return;
    }
    if !adding {
        tui.status_message = "Tool updated".to_string();
        return;
    }

    let after = store.state();
    let added: Option<ToolId> = after
        .tools
        .keys()
        .find(|id| !before.tools.contains_key(*id))
        .cloned();
    if let Some(id) = added {
        debug!("Selecting new tool {}", id);
        store.dispatch(Action::SelectTool {
            id: Some(id.clone()),
        });
        let rows = visible_rows(&store.state(), tui);
        tui.sidebar.focus_tool(&rows, &id);
    }
    tui.status_message = "Tool added".to_string();
}
