//! # Prompt Component
//!
//! Single-line input overlay used for naming categories (`n` to create,
//! `r` on a category row to rename).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::model::CategoryId;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::ui::centered_rect;

/// What a submitted prompt is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    NewCategory,
    RenameCategory(CategoryId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Trimmed, non-empty input.
    Submit(String),
    Cancel,
}

pub struct PromptState {
    pub purpose: PromptPurpose,
    pub input: String,
}

impl PromptState {
    pub fn new(purpose: PromptPurpose, initial: impl Into<String>) -> Self {
        Self {
            purpose,
            input: initial.into(),
        }
    }

    fn title(&self) -> &'static str {
        match self.purpose {
            PromptPurpose::NewCategory => " New Category ",
            PromptPurpose::RenameCategory(_) => " Rename Category ",
        }
    }
}

impl EventHandler for PromptState {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PromptEvent> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            // Blank input keeps the prompt open
            TuiEvent::Submit => {
                let name = self.input.trim();
                (!name.is_empty()).then(|| PromptEvent::Submit(name.to_string()))
            }
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                None
            }
            TuiEvent::Paste(data) => {
                self.input.push_str(&data.replace(['\r', '\n'], " "));
                None
            }
            TuiEvent::Backspace => {
                self.input.pop();
                None
            }
            _ => None,
        }
    }
}

pub struct Prompt<'a> {
    pub state: &'a PromptState,
}

impl Component for Prompt<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut overlay = centered_rect(50, 20, area);
        overlay.height = overlay.height.clamp(3.min(area.height), 5.min(area.height));
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(self.state.title())
            .title_bottom(Line::from(" Enter Save  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let line = Line::from(vec![
            Span::raw(self.state.input.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_submit_trims() {
        let mut prompt = PromptState::new(PromptPurpose::NewCategory, "");
        for c in "  Audio ".chars() {
            assert_eq!(prompt.handle_event(&TuiEvent::InputChar(c)), None);
        }
        assert_eq!(
            prompt.handle_event(&TuiEvent::Submit),
            Some(PromptEvent::Submit("Audio".to_string()))
        );
    }

    #[test]
    fn test_blank_submit_stays_open() {
        let mut prompt = PromptState::new(PromptPurpose::NewCategory, "   ");
        assert_eq!(prompt.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_rename_starts_with_current_name() {
        let mut prompt = PromptState::new(
            PromptPurpose::RenameCategory(CategoryId::from("cat_dev")),
            "Dev",
        );
        prompt.handle_event(&TuiEvent::Backspace);
        prompt.handle_event(&TuiEvent::Paste("velopers\n".to_string()));
        assert_eq!(prompt.input, "Developers ");
        assert_eq!(prompt.handle_event(&TuiEvent::Escape), Some(PromptEvent::Cancel));
    }
}
