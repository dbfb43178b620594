//! # Referential Integrity
//!
//! Checks the catalog invariants that every view relies on without
//! re-validating:
//!
//! - category ids are unique
//! - every `tool_ids` entry names a tool whose `category_id` points back
//! - every tool is listed by exactly one category, once
//! - map keys equal `Tool.id`
//! - `selected_tool_id` names an existing tool
//!
//! `Store` runs this on its seed and on every next state before accepting it.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::model::{AppState, CategoryId, ToolId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("category id {0} is used more than once")]
    DuplicateCategory(CategoryId),
    #[error("category {category} lists unknown tool {tool}")]
    DanglingToolRef { category: CategoryId, tool: ToolId },
    #[error("tool {tool} is listed by {listed_in} but belongs to {belongs_to}")]
    MembershipMismatch {
        tool: ToolId,
        listed_in: CategoryId,
        belongs_to: CategoryId,
    },
    #[error("tool {0} is listed more than once")]
    DuplicateMembership(ToolId),
    #[error("tool {0} is not listed by any category")]
    OrphanTool(ToolId),
    #[error("tool stored under key {key} has id {id}")]
    KeyMismatch { key: ToolId, id: ToolId },
    #[error("selected tool {0} does not exist")]
    DanglingSelection(ToolId),
}

/// Returns the first violated invariant, if any.
pub fn check(state: &AppState) -> Result<(), IntegrityError> {
    for (key, tool) in &state.tools {
        if key != &tool.id {
            return Err(IntegrityError::KeyMismatch {
                key: key.clone(),
                id: tool.id.clone(),
            });
        }
    }

    let mut seen_categories = HashSet::new();
    let mut listed_by: HashMap<&ToolId, &CategoryId> = HashMap::new();
    for category in &state.categories {
        if !seen_categories.insert(&category.id) {
            return Err(IntegrityError::DuplicateCategory(category.id.clone()));
        }
        for tool_id in &category.tool_ids {
            let Some(tool) = state.tools.get(tool_id) else {
                return Err(IntegrityError::DanglingToolRef {
                    category: category.id.clone(),
                    tool: tool_id.clone(),
                });
            };
            if tool.category_id != category.id {
                return Err(IntegrityError::MembershipMismatch {
                    tool: tool_id.clone(),
                    listed_in: category.id.clone(),
                    belongs_to: tool.category_id.clone(),
                });
            }
            if listed_by.insert(tool_id, &category.id).is_some() {
                return Err(IntegrityError::DuplicateMembership(tool_id.clone()));
            }
        }
    }

    if let Some(orphan) = state.tools.keys().find(|id| !listed_by.contains_key(id)) {
        return Err(IntegrityError::OrphanTool(orphan.clone()));
    }

    if let Some(selected) = &state.selected_tool_id
        && !state.tools.contains_key(selected)
    {
        return Err(IntegrityError::DanglingSelection(selected.clone()));
    }

    Ok(())
}
