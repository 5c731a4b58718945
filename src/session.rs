//! Server-side session store for shopper selections.
//!
//! Selections survive AJAX round-trips until checkout completes or the
//! session idles out. Charge breakdowns are never stored - every quote is
//! recomputed from scratch from the current selections.

use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

use crate::checkout::models::CustomerSelections;

/// Per-shopper selection state, keyed by the storefront's session id.
#[derive(Clone)]
pub struct SessionStore {
    selections: Cache<Uuid, CustomerSelections>,
}

impl SessionStore {
    /// Create a session store with checkout-scale TTLs: sessions live for
    /// two hours, or thirty minutes idle.
    pub fn new() -> Self {
        Self {
            selections: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(2 * 60 * 60))
                .time_to_idle(Duration::from_secs(30 * 60))
                .build(),
        }
    }

    pub async fn get(&self, session_id: Uuid) -> Option<CustomerSelections> {
        self.selections.get(&session_id).await
    }

    /// Load a shopper's selections, or fresh defaults for a new session.
    pub async fn get_or_default(&self, session_id: Uuid) -> CustomerSelections {
        self.selections
            .get(&session_id)
            .await
            .unwrap_or_default()
    }

    pub async fn insert(&self, session_id: Uuid, selections: CustomerSelections) {
        self.selections.insert(session_id, selections).await;
    }

    /// Drop a session, e.g. after checkout completion.
    pub async fn remove(&self, session_id: Uuid) {
        self.selections.invalidate(&session_id).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.selections.entry_count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::models::{SelectionUpdate, UpgradePack};

    #[tokio::test]
    async fn test_selections_survive_round_trips() {
        let store = SessionStore::new();
        let session_id = Uuid::new_v4();

        let mut selections = store.get_or_default(session_id).await;
        selections.apply(SelectionUpdate::SetCareBundle { selected: true });
        selections.apply(SelectionUpdate::SetUpgradePack {
            pack: UpgradePack::TwoPack,
        });
        store.insert(session_id, selections.clone()).await;

        let reloaded = store.get_or_default(session_id).await;
        assert_eq!(reloaded, selections);
        assert!(reloaded.care_bundle);
    }

    #[tokio::test]
    async fn test_unknown_session_gets_defaults() {
        let store = SessionStore::new();
        let selections = store.get_or_default(Uuid::new_v4()).await;
        assert_eq!(selections, CustomerSelections::default());
    }

    #[tokio::test]
    async fn test_remove_clears_session() {
        let store = SessionStore::new();
        let session_id = Uuid::new_v4();

        let mut selections = store.get_or_default(session_id).await;
        selections.apply(SelectionUpdate::SetJersey { selected: true });
        store.insert(session_id, selections).await;

        store.remove(session_id).await;
        assert!(store.get(session_id).await.is_none());
    }
}
