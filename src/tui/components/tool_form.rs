//! # Tool Form Component
//!
//! Modal overlay for adding or editing a tool. Opened with `a` / `e`.
//!
//! The form is where loosely-typed user input becomes a typed `Action`:
//! text fields are validated, the comma-separated tag field is parsed into
//! an ordered list, and only then is `AddTool` / `UpdateTool` emitted.
//!
//! ## Fields
//!
//! Name, URL, Type, Category (cycled with ←/→), Tags, Summary.
//! Tab/↓ and Shift+Tab/↑ move between fields, Enter saves, Esc cancels.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::action::{Action, NewTool, ToolPatch};
use crate::core::model::{AppState, CategoryId, Tool, ToolId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::ui::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Url,
    Type,
    Category,
    Tags,
    Summary,
}

const FIELDS: [Field; 6] = [
    Field::Name,
    Field::Url,
    Field::Type,
    Field::Category,
    Field::Tags,
    Field::Summary,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Url => "URL",
            Field::Type => "Type",
            Field::Category => "Category",
            Field::Tags => "Tags (comma separated)",
            Field::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(ToolId),
}

/// Events emitted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Save(Action),
    Cancel,
}

/// Split comma-separated tag input: trimmed, empties dropped, order kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `http://` or `https://` followed by a host, with no whitespace.
pub fn is_valid_url(raw: &str) -> bool {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
        && !host.is_empty()
        && !raw.chars().any(char::is_whitespace)
}

pub struct ToolFormState {
    pub mode: FormMode,
    pub name: String,
    pub url: String,
    pub kind: String,
    pub tags: String,
    pub summary: String,
    pub categories: Vec<(CategoryId, String)>,
    pub category_index: Option<usize>,
    pub focus: usize,
    pub errors: Vec<String>,
}

impl ToolFormState {
    fn empty(mode: FormMode, state: &AppState) -> Self {
        Self {
            mode,
            name: String::new(),
            url: String::new(),
            kind: String::new(),
            tags: String::new(),
            summary: String::new(),
            categories: state
                .categories
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            category_index: None,
            focus: 0,
            errors: Vec::new(),
        }
    }

    /// New-tool form. Category defaults to `preferred`, else the first one.
    pub fn for_new(state: &AppState, preferred: Option<&CategoryId>) -> Self {
        let mut form = Self::empty(FormMode::Add, state);
        form.category_index = preferred
            .and_then(|id| form.categories.iter().position(|(c, _)| c == id))
            .or(if form.categories.is_empty() { None } else { Some(0) });
        form
    }

    /// Edit form pre-filled from `tool`; tags are joined with ", ".
    pub fn for_edit(state: &AppState, tool: &Tool) -> Self {
        let mut form = Self::empty(FormMode::Edit(tool.id.clone()), state);
        form.name = tool.name.clone();
        form.url = tool.url.clone();
        form.kind = tool.kind.clone();
        form.tags = tool.tags.join(", ");
        form.summary = tool.summary.clone();
        form.category_index = form.categories.iter().position(|(c, _)| c == &tool.category_id);
        form
    }

    pub fn focused(&self) -> Field {
        FIELDS[self.focus]
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused() {
            Field::Name => Some(&mut self.name),
            Field::Url => Some(&mut self.url),
            Field::Type => Some(&mut self.kind),
            Field::Tags => Some(&mut self.tags),
            Field::Summary => Some(&mut self.summary),
            Field::Category => None,
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let len = self.categories.len();
        if len == 0 {
            return;
        }
        let current = self.category_index.unwrap_or(0);
        self.category_index = Some(if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        });
    }

    /// Validation messages, empty when the form can be saved.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if !is_valid_url(self.url.trim()) {
            errors.push("Must be a valid URL".to_string());
        }
        if self.kind.trim().is_empty() {
            errors.push("Type is required".to_string());
        }
        if self.category_index.is_none() {
            errors.push("Category is required".to_string());
        }
        errors
    }

    /// The typed action for the current field values. Call after `validate`.
    fn to_action(&self) -> Option<Action> {
        let (category_id, _) = self.categories.get(self.category_index?)?;
        let name = self.name.trim().to_string();
        let url = self.url.trim().to_string();
        let kind = self.kind.trim().to_string();
        let summary = self.summary.trim().to_string();
        let tags = parse_tags(&self.tags);
        Some(match &self.mode {
            FormMode::Add => Action::AddTool(NewTool {
                name,
                url,
                kind,
                summary,
                tags,
                category_id: category_id.clone(),
            }),
            FormMode::Edit(id) => Action::UpdateTool(ToolPatch {
                id: id.clone(),
                name: Some(name),
                url: Some(url),
                kind: Some(kind),
                summary: Some(summary),
                tags: Some(tags),
                category_id: Some(category_id.clone()),
            }),
        })
    }
}

impl EventHandler for ToolFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => Some(FormEvent::Cancel),
            TuiEvent::Submit => {
                self.errors = self.validate();
                if !self.errors.is_empty() {
                    return None;
                }
                self.to_action().map(FormEvent::Save)
            }
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = (self.focus + 1) % FIELDS.len();
                None
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
                None
            }
            TuiEvent::CursorLeft | TuiEvent::CursorRight if self.focused() == Field::Category => {
                self.cycle_category(matches!(event, TuiEvent::CursorRight));
                None
            }
            TuiEvent::InputChar(c) => {
                if let Some(text) = self.focused_text() {
                    text.push(*c);
                }
                None
            }
            TuiEvent::Paste(data) => {
                if let Some(text) = self.focused_text() {
                    text.push_str(&data.replace(['\r', '\n'], " "));
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the form overlay.
pub struct ToolForm<'a> {
    pub state: &'a ToolFormState,
}

impl ToolForm<'_> {
    fn field_value(&self, field: Field) -> String {
        let form = self.state;
        match field {
            Field::Name => form.name.clone(),
            Field::Url => form.url.clone(),
            Field::Type => form.kind.clone(),
            Field::Tags => form.tags.clone(),
            Field::Summary => form.summary.clone(),
            Field::Category => form
                .category_index
                .and_then(|i| form.categories.get(i))
                .map(|(_, name)| format!("◂ {} ▸", name))
                .unwrap_or_else(|| "Select a category".to_string()),
        }
    }
}

impl Component for ToolForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay);

        let title = match self.state.mode {
            FormMode::Add => " Add New Tool ",
            FormMode::Edit(_) => " Edit Tool ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(title)
            .title_bottom(Line::from(" Tab Next  Enter Save  Esc Cancel ").centered())
            .padding(Padding::new(2, 2, 1, 0));

        let mut lines = Vec::new();
        for (i, field) in FIELDS.iter().enumerate() {
            let focused = i == self.state.focus;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(field.label(), label_style)));
            let cursor = if focused && *field != Field::Category { "▏" } else { "" };
            lines.push(Line::from(format!("{}{}", self.field_value(*field), cursor)));
            lines.push(Line::default());
        }
        for error in &self.state.errors {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_state;

    fn type_text(form: &mut ToolFormState, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("LLM, Productivity ,, Coding,"), ["LLM", "Productivity", "Coding"]);
        assert_eq!(parse_tags("a, a"), ["a", "a"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://chat.openai.com"));
        assert!(is_valid_url("http://localhost:8080/path?q=1"));
        assert!(!is_valid_url("chat.openai.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https://has space.com"));
        assert!(!is_valid_url("://nohost"));
        assert!(!is_valid_url("ftp://files.example.com"));
    }

    #[test]
    fn test_add_form_emits_add_tool() {
        let state = seed_state();
        let preferred = CategoryId::from("cat_dev");
        let mut form = ToolFormState::for_new(&state, Some(&preferred));
        type_text(&mut form, "Cursor");
        form.handle_event(&TuiEvent::NextField);
        type_text(&mut form, "https://cursor.com");
        form.handle_event(&TuiEvent::NextField);
        type_text(&mut form, "Editor");
        form.handle_event(&TuiEvent::NextField);
        form.handle_event(&TuiEvent::NextField);
        type_text(&mut form, "Coding, IDE");

        let event = form.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(FormEvent::Save(Action::AddTool(NewTool {
                name: "Cursor".to_string(),
                url: "https://cursor.com".to_string(),
                kind: "Editor".to_string(),
                summary: String::new(),
                tags: vec!["Coding".to_string(), "IDE".to_string()],
                category_id: preferred,
            })))
        );
    }

    #[test]
    fn test_invalid_form_reports_errors() {
        let state = seed_state();
        let mut form = ToolFormState::for_new(&state, None);
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert_eq!(
            form.errors,
            ["Name is required", "Must be a valid URL", "Type is required"]
        );
    }

    #[test]
    fn test_new_form_defaults_to_first_category() {
        let state = seed_state();
        let form = ToolFormState::for_new(&state, None);
        assert_eq!(form.category_index, Some(0));

        let empty = ToolFormState::for_new(&AppState::default(), None);
        assert_eq!(empty.category_index, None);
        assert!(empty.validate().contains(&"Category is required".to_string()));
    }

    #[test]
    fn test_edit_form_prefills_and_moves_category() {
        let state = seed_state();
        let tool = state.tool(&ToolId::from("tool_punku")).unwrap();
        let mut form = ToolFormState::for_edit(&state, tool);
        assert_eq!(form.tags, "Coding, Developer Experience");
        assert_eq!(form.category_index, Some(2));

        // Focus the category field and cycle forward: dev → chatbots.
        form.focus = 3;
        form.handle_event(&TuiEvent::CursorRight);
        assert_eq!(form.category_index, Some(0));
        form.handle_event(&TuiEvent::CursorLeft);
        form.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(form.category_index, Some(1));

        let Some(FormEvent::Save(Action::UpdateTool(patch))) = form.handle_event(&TuiEvent::Submit) else {
            panic!("expected UPDATE_TOOL");
        };
        assert_eq!(patch.id, ToolId::from("tool_punku"));
        assert_eq!(patch.category_id, Some(CategoryId::from("cat_image")));
        assert_eq!(patch.tags, Some(vec!["Coding".to_string(), "Developer Experience".to_string()]));
    }

    #[test]
    fn test_typing_on_category_field_is_ignored() {
        let state = seed_state();
        let mut form = ToolFormState::for_new(&state, None);
        form.focus = 3;
        type_text(&mut form, "xyz");
        form.handle_event(&TuiEvent::Backspace);
        assert!(form.name.is_empty() && form.tags.is_empty());
    }

    #[test]
    fn test_escape_cancels() {
        let state = seed_state();
        let mut form = ToolFormState::for_new(&state, None);
        assert_eq!(form.handle_event(&TuiEvent::Escape), Some(FormEvent::Cancel));
    }
}
