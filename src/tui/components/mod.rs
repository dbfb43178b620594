//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields, built fresh each frame:
//! - `TitleBar`: catalog size, search hint, last status message
//! - `Details`: the selected tool, or an empty state
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent `*State` struct lives in `TuiState` and implements
//! `EventHandler`; a short-lived wrapper borrows it to render:
//! - `SidebarState` / `Sidebar`: pinned section and categories with their tools
//! - `ToolFormState` / `ToolForm`: add/edit overlay, emits `Action`s
//! - `PromptState` / `Prompt`: single-line category name input
//!
//! Components never touch the store. They emit events; `tui::handle_event`
//! turns those into dispatched actions.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! ├── title_bar.rs  (Top status bar)
//! ├── sidebar.rs    (Category tree and search filter)
//! ├── details.rs    (Selected tool view)
//! ├── tool_form.rs  (Add/edit overlay)
//! └── prompt.rs     (Category name input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod details;
pub mod prompt;
pub mod sidebar;
pub mod tool_form;
pub use details::Details;
pub use prompt::{Prompt, PromptEvent, PromptPurpose, PromptState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarRow, SidebarState};
pub use tool_form::{FormEvent, ToolForm, ToolFormState};
