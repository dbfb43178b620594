//! # Core Catalog Logic
//!
//! This module contains Toolshelf's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • AppState (catalog)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (dispatch)     │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  catalog   │      │   JSON     │
//!     │  Adapter   │      │  (disk)    │      │  actions   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `Tool`, `Category`, `AppState`
//! - [`integrity`]: the catalog invariants and their checker
//! - [`action`]: the `Action` enum and the pure `update()` transition
//! - [`store`]: `Store`, the single owner of the current snapshot
//! - [`ids`]: fresh UUID v4 ids
//! - [`seed`]: the built-in catalog
//! - [`catalog`]: JSON persistence
//! - [`config`]: settings resolution

pub mod action;
pub mod catalog;
pub mod config;
pub mod ids;
pub mod integrity;
pub mod model;
pub mod seed;
pub mod store;

// Re-export commonly used types for convenience
pub use action::{Action, NewTool, ToolPatch};
pub use model::{AppState, Category, CategoryId, Tool, ToolId};
pub use store::Store;
