//! # Details Component
//!
//! The main pane: everything about the selected tool, or an empty state
//! with a hint when nothing is selected.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::model::Tool;
use crate::tui::component::Component;

pub struct Details<'a> {
    pub tool: Option<&'a Tool>,
    pub category_name: Option<&'a str>,
    /// First `d` press seen; the next one deletes.
    pub confirm_delete: bool,
}

/// Format a millisecond timestamp as a local "Jan 15, 2025" date.
pub fn format_created(ms: i64) -> String {
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d, %Y").to_string()
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_uppercase(),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))
}

/// Lines for a selected tool.
pub fn tool_lines(tool: &Tool, category_name: Option<&str>) -> Vec<Line<'static>> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut title = vec![Span::styled(
        tool.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if tool.is_pinned {
        title.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("[{}]", tool.kind), Style::default().fg(Color::Magenta)),
            Span::styled(format!("  added {}", format_created(tool.created_at)), muted),
        ]),
        Line::from(title),
        Line::default(),
        heading("About"),
    ];

    if tool.summary.trim().is_empty() {
        lines.push(Line::from(Span::styled("No summary provided.", muted)));
    } else {
        lines.push(Line::from(tool.summary.clone()));
    }

    lines.push(Line::default());
    lines.push(heading("Access"));
    lines.push(Line::from(Span::styled(
        tool.url.clone(),
        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
    )));

    lines.push(Line::default());
    lines.push(heading("Classification"));
    if let Some(name) = category_name {
        lines.push(Line::from(vec![Span::styled("Category: ", muted), Span::raw(name.to_string())]));
    }
    if tool.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tags",
            muted.add_modifier(Modifier::ITALIC),
        )));
    } else {
        let mut spans = Vec::new();
        for (i, tag) in tool.tags.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("#{}", tag),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

impl Component for Details<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help = if self.confirm_delete {
            " Press d again to delete | any other key cancels "
        } else {
            " e Edit  d Delete  p Pin  o Open  y Copy link "
        };

        let Some(tool) = self.tool else {
            let empty = Paragraph::new(vec![
                Line::default(),
                Line::from(Span::styled("No tool selected", Style::default().add_modifier(Modifier::BOLD))),
                Line::default(),
                Line::from(Span::styled(
                    "Select a tool from the sidebar to view its details, or press a to create a new one.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
            frame.render_widget(empty, area);
            return;
        };

        let border = if self.confirm_delete { Color::Red } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title_bottom(Line::from(help).centered())
            .padding(Padding::new(2, 2, 1, 0));
        let paragraph = Paragraph::new(tool_lines(tool, self.category_name))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
