//! # Sidebar Component
//!
//! Category sections with their tools, plus an optional "Pinned" section on
//! top. Rows are rebuilt from the snapshot every frame; only the cursor is
//! persistent.
//!
//! Filtering by the search query happens here, not in the store. While a
//! query is active, sections without matches are hidden and sections with
//! matches are shown expanded regardless of their `collapsed` flag.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed rows and state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::UnicodeWidthChar;

use crate::core::model::{AppState, CategoryId, Tool, ToolId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    PinnedHeader {
        count: usize,
    },
    Category {
        id: CategoryId,
        name: String,
        collapsed: bool,
        count: usize,
    },
    Tool {
        id: ToolId,
        name: String,
        pinned: bool,
        /// Listed under the "Pinned" header rather than its category.
        in_pinned_section: bool,
    },
}

/// Case-insensitive match on name, type, summary and tags.
pub fn matches_query(tool: &Tool, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    tool.name.to_lowercase().contains(&needle)
        || tool.kind.to_lowercase().contains(&needle)
        || tool.summary.to_lowercase().contains(&needle)
        || tool.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

fn tool_row(tool: &Tool, in_pinned_section: bool) -> SidebarRow {
    SidebarRow::Tool {
        id: tool.id.clone(),
        name: tool.name.clone(),
        pinned: tool.is_pinned,
        in_pinned_section,
    }
}

/// Rows in display order for the given snapshot.
pub fn build_rows(state: &AppState, show_pinned_section: bool) -> Vec<SidebarRow> {
    let query = state.search_query.as_str();
    let searching = !query.trim().is_empty();
    let mut rows = Vec::new();

    if show_pinned_section && !searching {
        let pinned: Vec<&Tool> = state.pinned_tools().collect();
        if !pinned.is_empty() {
            rows.push(SidebarRow::PinnedHeader { count: pinned.len() });
            rows.extend(pinned.into_iter().map(|t| tool_row(t, true)));
        }
    }

    for category in &state.categories {
        let visible: Vec<&Tool> = state
            .tools_in(category)
            .filter(|t| matches_query(t, query))
            .collect();
        if searching && visible.is_empty() {
            continue;
        }
        let collapsed = category.collapsed && !searching;
        rows.push(SidebarRow::Category {
            id: category.id.clone(),
            name: category.name.clone(),
            collapsed,
            count: visible.len(),
        });
        if !collapsed {
            rows.extend(visible.into_iter().map(|t| tool_row(t, false)));
        }
    }

    rows
}

/// Truncate to `max_width` terminal columns, adding "…" if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    /// Enter/Space on the row under the cursor.
    Activate(usize),
}

/// Persistent sidebar state: the cursor over the current rows.
pub struct SidebarState {
    pub cursor: usize,
    pub row_count: usize,
    pub list_state: ListState,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            row_count: 0,
            list_state: ListState::default(),
        }
    }

    /// Keep the cursor inside the freshly built rows.
    pub fn sync(&mut self, row_count: usize) {
        self.row_count = row_count;
        if row_count == 0 {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            self.cursor = self.cursor.min(row_count - 1);
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Place the cursor on the row showing `id` in its category section.
    pub fn focus_tool(&mut self, rows: &[SidebarRow], id: &ToolId) {
        let found = rows.iter().position(|row| {
            matches!(row, SidebarRow::Tool { id: row_id, in_pinned_section: false, .. } if row_id == id)
        });
        if let Some(index) = found {
            self.cursor = index;
            self.list_state.select(Some(index));
        }
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        if self.row_count == 0 {
            return None;
        }
        match event {
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                self.cursor = (self.cursor + 1).min(self.row_count - 1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(SidebarEvent::Activate(self.cursor)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    pub rows: &'a [SidebarRow],
    pub state: &'a mut SidebarState,
    pub selected: Option<&'a ToolId>,
    pub search_query: &'a str,
    pub searching: bool,
    pub focused: bool,
}

impl Sidebar<'_> {
    fn row_line(&self, row: &SidebarRow, width: usize) -> Line<'static> {
        match row {
            SidebarRow::PinnedHeader { count } => Line::from(Span::styled(
                format!("★ Pinned ({})", count),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            SidebarRow::Category {
                name,
                collapsed,
                count,
                ..
            } => {
                let arrow = if *collapsed { "▸" } else { "▾" };
                let label = format!("{} {} ({})", arrow, name, count);
                Line::from(Span::styled(
                    truncate_to_width(&label, width),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            }
            SidebarRow::Tool { id, name, pinned, .. } => {
                let marker = if *pinned { "★ " } else { "  " };
                let name = truncate_to_width(name, width.saturating_sub(4));
                let mut style = Style::default();
                if self.selected == Some(id) {
                    style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                }
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                    Span::styled(name, style),
                ])
            }
        }
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.searching || !self.search_query.is_empty() {
            let cursor = if self.searching { "▏" } else { "" };
            format!(" / {}{} ", self.search_query, cursor)
        } else {
            " Tools ".to_string()
        };
        let border = if self.focused { Color::Gray } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title)
            .padding(Padding::horizontal(1));

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| ListItem::new(self.row_line(row, inner_width)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
