//! # Store
//!
//! Owns the current catalog snapshot and is the only way to change it.
//!
//! ```text
//! view ──dispatch(Action)──▶ Store ──update()──▶ next snapshot
//!                              │                      │
//!                              │       integrity::check (gate)
//!                              ▼                      │
//!                        subscribers ◀────────────────┘
//! ```
//!
//! Dispatch is synchronous and runs to completion. A snapshot handed out by
//! `state()` never changes afterwards; the store swaps in a new `Arc`.

use std::sync::Arc;

use log::{debug, error, warn};

use crate::core::action::{Action, Minted, update};
use crate::core::ids::{IdGenerator, RandomIds};
use crate::core::integrity::{self, IntegrityError};
use crate::core::model::AppState;
use crate::core::seed::default_catalog;

/// Candidate ids drawn before giving up on a collision-free one.
const MAX_ID_ATTEMPTS: usize = 8;

type Subscriber = Box<dyn FnMut(&Arc<AppState>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct Store {
    state: Arc<AppState>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Fn() -> i64>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl Store {
    /// Builds a store from a seed. The seed must already satisfy every
    /// catalog invariant.
    pub fn new(seed: AppState, ids: Box<dyn IdGenerator>) -> Result<Self, IntegrityError> {
        integrity::check(&seed)?;
        Ok(Self::from_checked(seed, ids))
    }

    /// Built-in catalog with OS-random ids.
    pub fn with_defaults() -> Self {
        Self::from_checked(default_catalog(now_millis()), Box::new(RandomIds::new()))
    }

    fn from_checked(seed: AppState, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state: Arc::new(seed),
            ids,
            clock: Box::new(now_millis),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the creation-time source.
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current snapshot. Cheap: clones the `Arc`.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Applies an action. Returns true if the snapshot changed.
    ///
    /// Rejected actions (unknown ids, unknown categories, nothing to change)
    /// leave the current snapshot in place and notify nobody.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.kind();
        let minted = if action.mints_id() {
            Some(self.mint())
        } else {
            None
        };

        let next = update(&self.state, action, minted);
        if Arc::ptr_eq(&next, &self.state) {
            debug!("{} left the catalog unchanged", kind);
            return false;
        }
        if let Err(e) = integrity::check(&next) {
            error!("{} discarded, it would break the catalog: {}", kind, e);
            return false;
        }

        debug!("{} applied", kind);
        self.state = next;
        self.notify();
        true
    }

    /// Dispatches an untyped `{"type": ..., "payload": ...}` record.
    /// Malformed or unknown records are logged and ignored.
    pub fn dispatch_json(&mut self, raw: &str) -> bool {
        match Action::from_json(raw) {
            Ok(action) => self.dispatch(action),
            Err(e) => {
                warn!("Ignoring action: {}", e);
                false
            }
        }
    }

    /// Registers a callback run after every dispatch that changed the
    /// snapshot, in subscription order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<AppState>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        let state = Arc::clone(&self.state);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&state);
        }
    }

    fn mint(&mut self) -> Minted {
        let mut id = self.ids.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.state.id_in_use(&id) {
                break;
            }
            warn!("Generated id {} collides, drawing again", id);
            id = self.ids.next_id();
        }
        Minted {
            id,
            created_at: (self.clock)(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{NewTool, ToolPatch};
    use crate::core::ids::is_v4;
    use crate::core::model::{CategoryId, ToolId};
    use crate::test_support::{TEST_NOW, seed_state, test_store};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn add_to(category: &str) -> Action {
        Action::AddTool(NewTool {
            name: "Perplexity".to_string(),
            url: "https://perplexity.ai".to_string(),
            kind: "Search".to_string(),
            summary: String::new(),
            tags: vec!["Search".to_string()],
            category_id: CategoryId::from(category),
        })
    }

    struct FixedIds(&'static str);

    impl IdGenerator for FixedIds {
        fn next_id(&mut self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_add_then_find() {
        let mut store = test_store();
        let before = store.state();
        assert!(store.dispatch(add_to("cat_dev")));

        let after = store.state();
        let new_ids: Vec<&ToolId> = after
            .tools
            .keys()
            .filter(|id| !before.tools.contains_key(*id))
            .collect();
        assert_eq!(new_ids.len(), 1);
        let new_id = new_ids[0];
        assert!(is_v4(new_id.as_str()));

        let dev = after.category(&CategoryId::from("cat_dev")).unwrap();
        assert_eq!(dev.tool_ids.last(), Some(new_id));
        assert_eq!(after.tool(new_id).unwrap().created_at, TEST_NOW);
    }

    #[test]
    fn test_held_snapshot_is_unchanged() {
        let mut store = test_store();
        let held = store.state();
        store.dispatch(Action::DeleteTool { id: ToolId::from("tool_openai") });
        store.dispatch(Action::ToggleSidebar);
        assert_eq!(*held, seed_state());
        assert!(!store.state().tools.contains_key(&ToolId::from("tool_openai")));
    }

    #[test]
    fn test_rejected_dispatch_keeps_reference() {
        let mut store = test_store();
        let before = store.state();
        assert!(!store.dispatch(add_to("cat_missing")));
        assert!(!store.dispatch(Action::TogglePin { id: ToolId::from("ghost") }));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let mut store = test_store();
        let seen: Rc<RefCell<Vec<bool>>> = Rc::default();
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.is_sidebar_open));

        store.dispatch(Action::ToggleSidebar);
        store.dispatch(Action::DeleteTool { id: ToolId::from("ghost") });
        store.dispatch(Action::ToggleSidebar);

        assert_eq!(*seen.borrow(), [false, true]);
    }

    #[test]
    fn test_subscribers_receive_current_snapshot() {
        let mut store = test_store();
        let last: Rc<RefCell<Option<Arc<AppState>>>> = Rc::default();
        let sink = Rc::clone(&last);
        store.subscribe(move |state| *sink.borrow_mut() = Some(Arc::clone(state)));

        store.dispatch(Action::SetSearchQuery { query: "agents".to_string() });
        let notified = last.borrow().clone().unwrap();
        assert!(Arc::ptr_eq(&notified, &store.state()));
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = test_store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.dispatch(Action::ToggleSidebar);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Action::ToggleSidebar);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_new_rejects_inconsistent_seed() {
        let mut seed = seed_state();
        seed.selected_tool_id = Some(ToolId::from("ghost"));
        assert!(matches!(
            Store::new(seed, Box::new(RandomIds::seeded(1))),
            Err(IntegrityError::DanglingSelection(_))
        ));
    }

    #[test]
    fn test_dispatch_json_ignores_bad_input() {
        let mut store = test_store();
        let before = store.state();
        assert!(!store.dispatch_json(r#"{"type": "ARCHIVE_TOOL", "payload": {"id": "tool_punku"}}"#));
        assert!(!store.dispatch_json("{"));
        assert!(Arc::ptr_eq(&before, &store.state()));

        assert!(store.dispatch_json(r#"{"type": "TOGGLE_PIN", "payload": {"id": "tool_punku"}}"#));
        assert!(store.state().tool(&ToolId::from("tool_punku")).unwrap().is_pinned);
    }

    #[test]
    fn test_colliding_generator_is_rejected() {
        let mut store = Store::new(seed_state(), Box::new(FixedIds("tool_openai"))).unwrap();
        let before = store.state();
        assert!(!store.dispatch(add_to("cat_dev")));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_move_through_store() {
        let mut store = test_store();
        store.dispatch(Action::UpdateTool(ToolPatch {
            id: ToolId::from("tool_punku"),
            category_id: Some(CategoryId::from("cat_image")),
            ..Default::default()
        }));
        let state = store.state();
        let image = state.category(&CategoryId::from("cat_image")).unwrap();
        assert_eq!(image.tool_ids.last(), Some(&ToolId::from("tool_punku")));
        assert_eq!(integrity::check(&state), Ok(()));
    }

    #[test]
    fn test_with_defaults_loads_builtin_catalog() {
        let store = Store::with_defaults();
        assert_eq!(store.state().tools.len(), 7);
    }
}
