//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::action::Minted;
use crate::core::ids::RandomIds;
use crate::core::model::AppState;
use crate::core::seed::default_catalog;
use crate::core::store::Store;

/// Fixed clock value for seeded tools and minted ids.
pub const TEST_NOW: i64 = 1_700_000_000_000;

/// The built-in catalog, stamped with `TEST_NOW`.
pub fn seed_state() -> AppState {
    default_catalog(TEST_NOW)
}

pub fn seed_arc() -> Arc<AppState> {
    Arc::new(seed_state())
}

pub fn minted(id: &str) -> Minted {
    Minted {
        id: id.to_string(),
        created_at: TEST_NOW,
    }
}

/// Store over the seed with deterministic ids and a fixed clock.
pub fn test_store() -> Store {
    match Store::new(seed_state(), Box::new(RandomIds::seeded(7))) {
        Ok(store) => store.with_clock(|| TEST_NOW),
        Err(e) => panic!("seed catalog is inconsistent: {e}"),
    }
}
