//! # Entity Model
//!
//! The normalized catalog shape. Tools live in one flat map keyed by id;
//! categories reference them by id and define display order.
//!
//! ```text
//! AppState
//! ├── categories: Vec<Arc<Category>>        // section order
//! │     └── tool_ids: Vec<ToolId>           // membership + order
//! ├── tools: BTreeMap<ToolId, Arc<Tool>>    // authoritative tool data
//! ├── selected_tool_id: Option<ToolId>      // detail view target
//! ├── search_query: String                  // view filter, never applied here
//! └── is_sidebar_open: bool                 // layout flag
//! ```
//!
//! Entities sit behind `Arc` so a transition can share every entity it did
//! not touch with the previous snapshot. See `integrity` for the invariants.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ToolId(String);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CategoryId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(ToolId);
string_id!(CategoryId);

/// One cataloged item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub url: String,
    /// Free-text classification ("Chatbot", "Design Tool", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    /// Display order; duplicates allowed.
    pub tags: Vec<String>,
    pub category_id: CategoryId,
    pub is_pinned: bool,
    /// Milliseconds since the Unix epoch. Display only.
    pub created_at: i64,
}

/// A named, collapsible section of the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub collapsed: bool,
    pub tool_ids: Vec<ToolId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub categories: Vec<Arc<Category>>,
    pub tools: BTreeMap<ToolId, Arc<Tool>>,
    pub selected_tool_id: Option<ToolId>,
    #[serde(default)]
    pub search_query: String,
    #[serde(default = "default_sidebar_open")]
    pub is_sidebar_open: bool,
}

fn default_sidebar_open() -> bool {
    true
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            tools: BTreeMap::new(),
            selected_tool_id: None,
            search_query: String::new(),
            is_sidebar_open: true,
        }
    }
}

impl AppState {
    pub fn tool(&self, id: &ToolId) -> Option<&Tool> {
        self.tools.get(id).map(Arc::as_ref)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id).map(Arc::as_ref)
    }

    pub(crate) fn category_index(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| &c.id == id)
    }

    pub fn selected_tool(&self) -> Option<&Tool> {
        self.selected_tool_id.as_ref().and_then(|id| self.tool(id))
    }

    /// The category that lists `tool_id`, found through the tool's own
    /// `category_id`.
    pub fn category_of(&self, tool_id: &ToolId) -> Option<&Category> {
        self.tool(tool_id).and_then(|t| self.category(&t.category_id))
    }

    /// Tools of a category in `tool_ids` order.
    pub fn tools_in<'a>(&'a self, category: &'a Category) -> impl Iterator<Item = &'a Tool> + 'a {
        category.tool_ids.iter().filter_map(move |id| self.tool(id))
    }

    pub fn pinned_tools(&self) -> impl Iterator<Item = &Tool> + '_ {
        self.categories
            .iter()
            .flat_map(move |c| self.tools_in(c))
            .filter(|t| t.is_pinned)
    }

    /// True if `id` is already used by a tool or a category.
    pub fn id_in_use(&self, id: &str) -> bool {
        self.tools.contains_key(&ToolId::from(id)) || self.categories.iter().any(|c| c.id.as_str() == id)
    }
}
