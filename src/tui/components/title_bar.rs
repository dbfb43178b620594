//! # TitleBar Component
//!
//! Top status bar: catalog size, active search, and the last status message.
//!
//! Stateless: every field is a prop filled in by `ui::draw_ui` each frame.
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Toolshelf | 7 tools in 3 categories | Tool deleted"`
//! 2. **Search active**: `"Toolshelf | 7 tools in 3 categories | search: llm"`
//! 3. **Default**: `"Toolshelf | 7 tools in 3 categories"`
//!
//! A status message wins over the search hint so feedback for the last
//! action is never hidden.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub tool_count: usize,
    pub category_count: usize,
    pub search_query: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        tool_count: usize,
        category_count: usize,
        search_query: String,
        status_message: String,
    ) -> Self {
        Self {
            tool_count,
            category_count,
            search_query,
            status_message,
        }
    }

    pub fn text(&self) -> String {
        let counts = format!(
            "Toolshelf | {} {} in {} {}",
            self.tool_count,
            plural(self.tool_count, "tool", "tools"),
            self.category_count,
            plural(self.category_count, "category", "categories"),
        );
        if !self.status_message.is_empty() {
            format!("{} | {}", counts, self.status_message)
        } else if !self.search_query.is_empty() {
            format!("{} | search: {}", counts, self.search_query)
        } else {
            counts
        }
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(span, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_default_text() {
        let bar = TitleBar::new(7, 3, String::new(), String::new());
        assert_eq!(bar.text(), "Toolshelf | 7 tools in 3 categories");
    }

    #[test]
    fn test_singular_counts() {
        let bar = TitleBar::new(1, 1, String::new(), String::new());
        assert_eq!(bar.text(), "Toolshelf | 1 tool in 1 category");
    }

    #[test]
    fn test_status_wins_over_search() {
        let bar = TitleBar::new(7, 3, "llm".to_string(), "Tool deleted".to_string());
        assert_eq!(bar.text(), "Toolshelf | 7 tools in 3 categories | Tool deleted");

        let bar = TitleBar::new(7, 3, "llm".to_string(), String::new());
        assert_eq!(bar.text(), "Toolshelf | 7 tools in 3 categories | search: llm");
    }

    #[test]
    fn test_render() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut bar = TitleBar::new(2, 1, String::new(), String::new());
                let area = f.area();
                bar.render(f, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let line: String = (0..9u16).map(|x| buffer[(x, 0u16)].symbol().to_string()).collect();
        assert_eq!(line, "Toolshelf");
    }
}
