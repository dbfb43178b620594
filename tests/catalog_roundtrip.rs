//! Saving a catalog, reopening it, and continuing to edit it.

use std::fs;

use tempfile::TempDir;

use toolshelf::core::catalog::{CatalogError, load_catalog, save_catalog};
use toolshelf::core::ids::{RandomIds, is_v4};
use toolshelf::core::seed::default_catalog;
use toolshelf::core::{Action, CategoryId, NewTool, Store, ToolId, ToolPatch};

fn store_from(state: toolshelf::core::AppState) -> Store {
    Store::new(state, Box::new(RandomIds::seeded(11)))
        .unwrap_or_else(|e| panic!("catalog rejected: {e}"))
        .with_clock(|| 1_700_000_000_000)
}

#[test]
fn edits_survive_a_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shelf").join("catalog.json");

    let mut store = store_from(default_catalog(0));
    assert!(store.dispatch(Action::AddTool(NewTool {
        name: "Cursor".to_string(),
        url: "https://cursor.com".to_string(),
        kind: "Editor".to_string(),
        summary: "AI code editor".to_string(),
        tags: vec!["Coding".to_string()],
        category_id: CategoryId::from("cat_dev"),
    })));
    assert!(store.dispatch(Action::TogglePin {
        id: ToolId::from("tool_punku"),
    }));
    assert!(store.dispatch(Action::ToggleCategoryCollapsed {
        category_id: CategoryId::from("cat_image"),
    }));
    save_catalog(&path, &store.state()).unwrap();

    let loaded = load_catalog(&path).unwrap().unwrap();
    assert_eq!(loaded, *store.state());

    let added = loaded.tools.values().find(|t| t.name == "Cursor").unwrap();
    assert!(is_v4(added.id.as_str()));
    assert_eq!(added.created_at, 1_700_000_000_000);
    let dev = loaded.category(&CategoryId::from("cat_dev")).unwrap();
    assert_eq!(dev.tool_ids.last(), Some(&added.id));

    // Reopened catalog keeps accepting actions.
    let mut reopened = store_from(loaded.clone());
    assert!(reopened.dispatch(Action::UpdateTool(ToolPatch {
        id: added.id.clone(),
        category_id: Some(CategoryId::from("cat_chatbots")),
        ..Default::default()
    })));
    let state = reopened.state();
    assert_eq!(
        state.category_of(&added.id).map(|c| c.id.clone()),
        Some(CategoryId::from("cat_chatbots"))
    );
}

#[test]
fn saved_file_uses_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    save_catalog(&path, &default_catalog(0)).unwrap();

    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"toolIds\""));
    assert!(json.contains("\"isPinned\""));
    assert!(json.contains("\"categoryId\""));
    assert!(json.contains("\"type\": \"Chatbot\""));
    assert!(!dir.path().join("catalog.tmp").exists());
}

#[test]
fn missing_file_loads_as_none() {
    let dir = TempDir::new().unwrap();
    assert!(load_catalog(&dir.path().join("nope.json")).unwrap().is_none());
}

#[test]
fn inconsistent_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let mut state = default_catalog(0);
    state.selected_tool_id = Some(ToolId::from("tool_gone"));
    fs::write(&path, serde_json::to_string(&state).unwrap()).unwrap();

    assert!(matches!(load_catalog(&path), Err(CatalogError::Integrity(_))));
}
