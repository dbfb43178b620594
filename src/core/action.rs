//! # Actions
//!
//! Everything that can happen to the catalog becomes an `Action`.
//! User saves the tool form? That's `Action::AddTool(..)` or `Action::UpdateTool(..)`.
//! User hits the pin key? That's `Action::TogglePin { id }`.
//!
//! The `update()` function takes the current snapshot and an action,
//! then returns the next snapshot. No side effects here. Ids and
//! timestamps are minted by the caller and handed in.
//!
//! ```text
//! Arc<AppState> + Action  →  update()  →  Arc<AppState>
//! ```
//!
//! An action that cannot apply (unknown id, unknown category, nothing to
//! change) returns the *same* `Arc`, so `Arc::ptr_eq(&before, &after)` is
//! the change test views rely on. Untouched entities are shared with the
//! previous snapshot; touched ones are copied with `Arc::make_mut`.

use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::model::{AppState, Category, CategoryId, Tool, ToolId};

/// Payload of `ADD_TOOL`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTool {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category_id: CategoryId,
}

/// Payload of `UPDATE_TOOL`. `None` leaves a field as it is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolPatch {
    pub id: ToolId,
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<CategoryId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddTool(NewTool),
    UpdateTool(ToolPatch),
    DeleteTool {
        id: ToolId,
    },
    TogglePin {
        id: ToolId,
    },
    SelectTool {
        id: Option<ToolId>,
    },
    SetSearchQuery {
        query: String,
    },
    ToggleSidebar,
    ToggleCategoryCollapsed {
        #[serde(rename = "categoryId")]
        category_id: CategoryId,
    },
    AddCategory {
        name: String,
    },
    RenameCategory {
        id: CategoryId,
        name: String,
    },
    /// Only empty categories can be deleted.
    DeleteCategory {
        id: CategoryId,
    },
}

/// Wire tags, in declaration order.
pub const ACTION_KINDS: &[&str] = &[
    "ADD_TOOL",
    "UPDATE_TOOL",
    "DELETE_TOOL",
    "TOGGLE_PIN",
    "SELECT_TOOL",
    "SET_SEARCH_QUERY",
    "TOGGLE_SIDEBAR",
    "TOGGLE_CATEGORY_COLLAPSED",
    "ADD_CATEGORY",
    "RENAME_CATEGORY",
    "DELETE_CATEGORY",
];

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("action has no \"type\" tag")]
    MissingKind,
    #[error("unknown action type {0:?}")]
    UnknownKind(String),
}

impl Action {
    /// Converts an untyped `{"type": ..., "payload": ...}` record into a
    /// typed action.
    pub fn from_json(raw: &str) -> Result<Action, ActionError> {
        let value: Value = serde_json::from_str(raw)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ActionError::MissingKind)?;
        if !ACTION_KINDS.contains(&kind) {
            return Err(ActionError::UnknownKind(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The wire tag, for logging.
    pub fn kind(&self) -> &'static str {
        let index = match self {
            Action::AddTool(_) => 0,
            Action::UpdateTool(_) => 1,
            Action::DeleteTool { .. } => 2,
            Action::TogglePin { .. } => 3,
            Action::SelectTool { .. } => 4,
            Action::SetSearchQuery { .. } => 5,
            Action::ToggleSidebar => 6,
            Action::ToggleCategoryCollapsed { .. } => 7,
            Action::AddCategory { .. } => 8,
            Action::RenameCategory { .. } => 9,
            Action::DeleteCategory { .. } => 10,
        };
        ACTION_KINDS[index]
    }

    /// True for actions that create an entity and need a `Minted` value.
    pub fn mints_id(&self) -> bool {
        matches!(self, Action::AddTool(_) | Action::AddCategory { .. })
    }
}

/// Fresh id and creation time for a new entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minted {
    pub id: String,
    pub created_at: i64,
}

/// Pure transition: `(state, action) -> state'`.
pub fn update(state: &Arc<AppState>, action: Action, minted: Option<Minted>) -> Arc<AppState> {
    match action {
        Action::AddTool(new_tool) => add_tool(state, new_tool, minted),
        Action::UpdateTool(patch) => update_tool(state, patch),
        Action::DeleteTool { id } => delete_tool(state, &id),
        Action::TogglePin { id } => toggle_pin(state, &id),
        Action::SelectTool { id } => select_tool(state, id),
        Action::SetSearchQuery { query } => {
            if state.search_query == query {
                return Arc::clone(state);
            }
            let mut next = AppState::clone(state);
            next.search_query = query;
            Arc::new(next)
        }
        Action::ToggleSidebar => {
            let mut next = AppState::clone(state);
            next.is_sidebar_open = !next.is_sidebar_open;
            Arc::new(next)
        }
        Action::ToggleCategoryCollapsed { category_id } => {
            let Some(index) = state.category_index(&category_id) else {
                return Arc::clone(state);
            };
            let mut next = AppState::clone(state);
            let category = Arc::make_mut(&mut next.categories[index]);
            category.collapsed = !category.collapsed;
            Arc::new(next)
        }
        Action::AddCategory { name } => add_category(state, name, minted),
        Action::RenameCategory { id, name } => {
            let Some(index) = state.category_index(&id) else {
                return Arc::clone(state);
            };
            if state.categories[index].name == name {
                return Arc::clone(state);
            }
            let mut next = AppState::clone(state);
            Arc::make_mut(&mut next.categories[index]).name = name;
            Arc::new(next)
        }
        Action::DeleteCategory { id } => delete_category(state, &id),
    }
}

fn add_tool(state: &Arc<AppState>, new_tool: NewTool, minted: Option<Minted>) -> Arc<AppState> {
    let Some(index) = state.category_index(&new_tool.category_id) else {
        warn!("ADD_TOOL rejected: unknown category {}", new_tool.category_id);
        return Arc::clone(state);
    };
    let Some(minted) = minted else {
        warn!("ADD_TOOL rejected: no id minted");
        return Arc::clone(state);
    };
    if state.id_in_use(&minted.id) {
        warn!("ADD_TOOL rejected: id {} already in use", minted.id);
        return Arc::clone(state);
    }

    let id = ToolId::new(minted.id);
    let tool = Tool {
        id: id.clone(),
        name: new_tool.name,
        url: new_tool.url,
        kind: new_tool.kind,
        summary: new_tool.summary,
        tags: new_tool.tags,
        category_id: new_tool.category_id,
        is_pinned: false,
        created_at: minted.created_at,
    };

    let mut next = AppState::clone(state);
    next.tools.insert(id.clone(), Arc::new(tool));
    Arc::make_mut(&mut next.categories[index]).tool_ids.push(id);
    Arc::new(next)
}

fn update_tool(state: &Arc<AppState>, patch: ToolPatch) -> Arc<AppState> {
    let Some(current) = state.tools.get(&patch.id) else {
        return Arc::clone(state);
    };

    // A move must name a real category; the whole patch is dropped otherwise.
    let move_to = match &patch.category_id {
        Some(target) if target != &current.category_id => match state.category_index(target) {
            Some(index) => Some(index),
            None => {
                warn!("UPDATE_TOOL rejected: unknown category {}", target);
                return Arc::clone(state);
            }
        },
        _ => None,
    };

    let mut tool = Tool::clone(current);
    if let Some(name) = patch.name {
        tool.name = name;
    }
    if let Some(url) = patch.url {
        tool.url = url;
    }
    if let Some(kind) = patch.kind {
        tool.kind = kind;
    }
    if let Some(summary) = patch.summary {
        tool.summary = summary;
    }
    if let Some(tags) = patch.tags {
        tool.tags = tags;
    }
    if let Some(category_id) = patch.category_id {
        tool.category_id = category_id;
    }
    if tool == **current {
        return Arc::clone(state);
    }

    let mut next = AppState::clone(state);
    if let Some(to) = move_to {
        if let Some(from) = next.category_index(&current.category_id) {
            Arc::make_mut(&mut next.categories[from])
                .tool_ids
                .retain(|id| id != &tool.id);
        }
        Arc::make_mut(&mut next.categories[to])
            .tool_ids
            .push(tool.id.clone());
    }
    next.tools.insert(tool.id.clone(), Arc::new(tool));
    Arc::new(next)
}

fn delete_tool(state: &Arc<AppState>, id: &ToolId) -> Arc<AppState> {
    let Some(tool) = state.tools.get(id) else {
        return Arc::clone(state);
    };

    let mut next = AppState::clone(state);
    next.tools.remove(id);
    if let Some(index) = next.category_index(&tool.category_id) {
        Arc::make_mut(&mut next.categories[index])
            .tool_ids
            .retain(|listed| listed != id);
    }
    if next.selected_tool_id.as_ref() == Some(id) {
        next.selected_tool_id = None;
    }
    Arc::new(next)
}

fn toggle_pin(state: &Arc<AppState>, id: &ToolId) -> Arc<AppState> {
    if !state.tools.contains_key(id) {
        return Arc::clone(state);
    }
    let mut next = AppState::clone(state);
    if let Some(tool) = next.tools.get_mut(id) {
        let tool = Arc::make_mut(tool);
        tool.is_pinned = !tool.is_pinned;
    }
    Arc::new(next)
}

fn select_tool(state: &Arc<AppState>, id: Option<ToolId>) -> Arc<AppState> {
    if state.selected_tool_id == id {
        return Arc::clone(state);
    }
    if let Some(target) = &id
        && !state.tools.contains_key(target)
    {
        warn!("SELECT_TOOL rejected: unknown tool {}", target);
        return Arc::clone(state);
    }
    let mut next = AppState::clone(state);
    next.selected_tool_id = id;
    Arc::new(next)
}

fn add_category(state: &Arc<AppState>, name: String, minted: Option<Minted>) -> Arc<AppState> {
    let Some(minted) = minted else {
        warn!("ADD_CATEGORY rejected: no id minted");
        return Arc::clone(state);
    };
    if state.id_in_use(&minted.id) {
        warn!("ADD_CATEGORY rejected: id {} already in use", minted.id);
        return Arc::clone(state);
    }
    let mut next = AppState::clone(state);
    next.categories.push(Arc::new(Category {
        id: CategoryId::new(minted.id),
        name,
        collapsed: false,
        tool_ids: Vec::new(),
    }));
    Arc::new(next)
}

fn delete_category(state: &Arc<AppState>, id: &CategoryId) -> Arc<AppState> {
    let Some(index) = state.category_index(id) else {
        return Arc::clone(state);
    };
    if !state.categories[index].tool_ids.is_empty() {
        warn!("DELETE_CATEGORY rejected: {} still has tools", id);
        return Arc::clone(state);
    }
    let mut next = AppState::clone(state);
    next.categories.remove(index);
    Arc::new(next)
}
