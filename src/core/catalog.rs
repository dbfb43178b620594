//! # Catalog Persistence
//!
//! Save/load the whole `AppState` as one JSON file, by default
//! `~/.toolshelf/catalog.json`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.
//! Loaded catalogs go through the integrity check before anyone sees them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::core::integrity::{self, IntegrityError};
use crate::core::model::AppState;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog is inconsistent: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Returns `~/.toolshelf/catalog.json`.
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".toolshelf").join("catalog.json"))
}

/// Load a catalog. `Ok(None)` if the file does not exist.
pub fn load_catalog(path: &Path) -> Result<Option<AppState>, CatalogError> {
    if !path.exists() {
        debug!("No catalog at {}", path.display());
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    let state: AppState = serde_json::from_str(&json)?;
    integrity::check(&state)?;
    info!(
        "Loaded catalog from {} ({} categories, {} tools)",
        path.display(),
        state.categories.len(),
        state.tools.len()
    );
    Ok(Some(state))
}

/// Save a catalog, creating parent directories as needed.
pub fn save_catalog(path: &Path, state: &AppState) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    atomic_write_json(path, state)?;
    info!("Saved catalog to {}", path.display());
    Ok(())
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), CatalogError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ToolId;
    use crate::test_support::seed_state;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_catalog(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");
        save_catalog(&path, &seed_state()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_rejects_inconsistent_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut state = seed_state();
        state.selected_tool_id = Some(ToolId::from("ghost"));
        fs::write(&path, serde_json::to_string(&state).unwrap()).unwrap();

        assert!(matches!(
            load_catalog(&path),
            Err(CatalogError::Integrity(IntegrityError::DanglingSelection(_)))
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_catalog(&path), Err(CatalogError::Parse(_))));
    }
}
