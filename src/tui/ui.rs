use crate::core::model::AppState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::sidebar::build_rows;
use crate::tui::components::{Details, Prompt, Sidebar, TitleBar, ToolForm};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub const SIDEBAR_WIDTH: u16 = 34;

const HELP: &str = "/ Search  b Sidebar  a Add  e Edit  d Delete  p Pin  o Open  y Copy  n New category  r Rename  x Remove category  q Quit";
const SEARCH_HELP: &str = "Type to filter  Enter Done  Esc Clear";

pub fn draw_ui(frame: &mut Frame, state: &AppState, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let mut title_bar = TitleBar::new(
        state.tools.len(),
        state.categories.len(),
        state.search_query.clone(),
        tui.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    let details_area = if state.is_sidebar_open {
        let [sidebar_area, details_area] =
            Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);
        let rows = build_rows(state, tui.show_pinned_section);
        tui.sidebar.sync(rows.len());
        let mut sidebar = Sidebar {
            rows: &rows,
            state: &mut tui.sidebar,
            selected: state.selected_tool_id.as_ref(),
            search_query: &state.search_query,
            searching: tui.searching,
            focused: tui.form.is_none() && tui.prompt.is_none(),
        };
        sidebar.render(frame, sidebar_area);
        details_area
    } else {
        body_area
    };

    let selected = state.selected_tool();
    let mut details = Details {
        tool: selected,
        category_name: selected
            .and_then(|tool| state.category(&tool.category_id))
            .map(|c| c.name.as_str()),
        confirm_delete: tui.confirm_delete,
    };
    details.render(frame, details_area);

    let help = if tui.searching { SEARCH_HELP } else { HELP };
    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(form) = &tui.form {
        ToolForm { state: form }.render(frame, frame.area());
    }
    if let Some(prompt) = &tui.prompt {
        Prompt { state: prompt }.render(frame, frame.area());
    }
}

/// A rectangle `percent_x` by `percent_y` of `area`, centered in it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
