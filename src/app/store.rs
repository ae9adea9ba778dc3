//! The country store: owned state plus the actions that change it.
//!
//! [`CountryStore`] is a cloneable handle; every clone shares one
//! [`StoreState`]. UI code reads snapshots and derived views and invokes the
//! actions below. Data actions go through the [`RecordGateway`] and follow
//! one protocol:
//!
//! 1. Set `is_loading`, clear `error`.
//! 2. Await the gateway call.
//! 3. On success, apply the minimal change from the server's row and clear
//!    `is_loading`.
//! 4. On failure, record the message in `error`, clear `is_loading`, and leave
//!    the records as they were before the action.
//!
//! Under [`SyncPolicy::Optimistic`] step 3 happens before step 2 and step 4
//! rolls it back through the pending ledger.
//!
//! # Concurrency
//!
//! The state lock is held only for synchronous sections, never across an
//! `.await`. Concurrent actions therefore interleave and their completions
//! apply in whatever order the network returns them. `is_loading` is
//! last-writer-wins, not a reentrancy guard, and there is no versioning:
//! the last confirmed write wins.

use super::modes::{SyncPolicy, Toggle};
use super::pending::{self, PendingOp};
use super::state::StoreState;
use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{Country, CountryDraft, CountryPatch, DetailParams};
use crate::storage::RecordGateway;
use crate::ui::viewmodel::ListViewModel;
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Instrument;

/// Handle to the country store.
#[derive(Clone)]
pub struct CountryStore {
    state: Arc<Mutex<StoreState>>,
    gateway: Arc<dyn RecordGateway>,
    policy: SyncPolicy,
}

impl std::fmt::Debug for CountryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountryStore")
            .field("policy", &self.policy)
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl CountryStore {
    /// Creates an empty store using confirm-then-apply.
    #[must_use]
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self::with_policy(gateway, SyncPolicy::default())
    }

    #[must_use]
    pub fn with_policy(gateway: Arc<dyn RecordGateway>, policy: SyncPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            gateway,
            policy,
        }
    }

    /// Replaces the initial state, e.g. to start from cached records.
    #[must_use]
    pub fn with_state(self, state: StoreState) -> Self {
        *self.lock() = state;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> SyncPolicy {
        self.policy
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        // Mutations are single assignments or Vec ops; a panic mid-update
        // cannot leave a half-applied record.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.lock())
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.lock().clone()
    }

    #[must_use]
    pub fn countries(&self) -> Vec<Country> {
        self.read(|s| s.countries().to_vec())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(StoreState::is_loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read(|s| s.error().map(str::to_string))
    }

    #[must_use]
    pub fn viewmodel(&self) -> ListViewModel {
        self.read(StoreState::compute_viewmodel)
    }

    /// Replaces the search text. Always succeeds.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::trace!(query = %text, "search text updated");
        self.update(|s| s.set_search_text(text));
    }

    /// Replaces the view mode. Always succeeds.
    pub fn set_toggle(&self, toggle: Toggle) {
        tracing::debug!(toggle = %toggle, "view mode changed");
        self.update(|s| s.set_toggle(toggle));
    }

    /// Navigation parameters for the record with `id`.
    #[must_use]
    pub fn select(&self, id: &str) -> Option<DetailParams> {
        self.read(|s| s.find(id).map(DetailParams::from))
    }

    /// Records a failed action and hands the error back to the caller.
    fn fail(&self, action: &'static str, err: CountryDeckError) -> CountryDeckError {
        tracing::error!(action = action, error = %err, "store action failed");
        self.update(|s| s.finish_err(err.to_string()));
        err
    }

    /// Loads every row from the gateway, oldest first.
    ///
    /// On success the working set is replaced wholesale. On failure it is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, which is also stored in `error`.
    pub async fn fetch_countries(&self) -> Result<()> {
        let span = tracing::debug_span!("fetch_countries");
        async {
            self.update(StoreState::begin_request);

            match self.gateway.select_all().await {
                Ok(rows) => {
                    tracing::debug!(count = rows.len(), "countries fetched");
                    self.update(|s| {
                        s.replace_all(rows);
                        s.finish_ok();
                    });
                    Ok(())
                }
                Err(e) => Err(self.fail("fetch countries", e)),
            }
        }
        .instrument(span)
        .await
    }

    /// Creates a record from `draft` and returns the server's row.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, which is also stored in `error`; the working
    /// set is unchanged (or rolled back under the optimistic policy).
    pub async fn add_country(&self, draft: CountryDraft) -> Result<Country> {
        let span = tracing::debug_span!("add_country", name = %draft.name, policy = ?self.policy);
        async {
            let pending = self.update(|s| {
                s.begin_request();
                match self.policy {
                    SyncPolicy::ConfirmThenApply => None,
                    SyncPolicy::Optimistic => {
                        let temp_id = pending::temp_id();
                        let temp = Country::new(
                            temp_id.clone(),
                            draft.name.clone(),
                            draft.capital.clone(),
                            draft.continent.clone(),
                            draft.flag.clone(),
                        );
                        s.upsert(temp);
                        Some((s.record_pending(PendingOp::Add { temp_id: temp_id.clone() }), temp_id))
                    }
                }
            });

            let result = self.gateway.insert(&draft).await;

            match result {
                Ok(row) => {
                    tracing::debug!(id = %row.id, "country added");
                    self.update(|s| {
                        match pending {
                            Some((op, temp_id)) => {
                                s.settle_pending(op);
                                s.replace(&temp_id, row.clone());
                            }
                            None => s.upsert(row.clone()),
                        }
                        s.finish_ok();
                    });
                    Ok(row)
                }
                Err(e) => {
                    if let Some((op, _)) = pending {
                        self.update(|s| {
                            if let Some(op) = s.settle_pending(op) {
                                s.roll_back(op);
                            }
                        });
                    }
                    Err(self.fail("add country", e))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, which is also stored in `error`; the record
    /// stays in (or is restored to) the working set.
    pub async fn remove_country(&self, id: &str) -> Result<()> {
        let span = tracing::debug_span!("remove_country", id = %id, policy = ?self.policy);
        async {
            let pending = self.update(|s| {
                s.begin_request();
                match self.policy {
                    SyncPolicy::ConfirmThenApply => None,
                    SyncPolicy::Optimistic => {
                        let index = s.countries().iter().position(|c| c.id == id)?;
                        let country = s.remove(id)?;
                        Some(s.record_pending(PendingOp::Remove { index, country }))
                    }
                }
            });

            match self.gateway.delete(id).await {
                Ok(()) => {
                    tracing::debug!("country removed");
                    self.update(|s| {
                        if let Some(op) = pending {
                            s.settle_pending(op);
                        }
                        // A fetch that landed while the delete was in flight
                        // may have brought the row back.
                        s.remove(id);
                        s.finish_ok();
                    });
                    Ok(())
                }
                Err(e) => {
                    if let Some(op) = pending {
                        self.update(|s| {
                            if let Some(op) = s.settle_pending(op) {
                                s.roll_back(op);
                            }
                        });
                    }
                    Err(self.fail("remove country", e))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Applies `patch` to the record with `id` and returns the server's row.
    ///
    /// A fresh `updated_at` is sent with the patch.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, which is also stored in `error`; the record
    /// keeps (or is restored to) its previous value.
    pub async fn update_country(&self, id: &str, patch: CountryPatch) -> Result<Country> {
        let span = tracing::debug_span!("update_country", id = %id, policy = ?self.policy);
        async {
            let pending = self.update(|s| {
                s.begin_request();
                match self.policy {
                    SyncPolicy::ConfirmThenApply => None,
                    SyncPolicy::Optimistic => {
                        let previous = patch.inverse_for(s.find(id)?);
                        s.merge(id, &patch).ok()?;
                        Some(s.record_pending(PendingOp::Update {
                            id: id.to_string(),
                            applied: patch.clone(),
                            previous,
                        }))
                    }
                }
            });

            let updated_at = Utc::now();
            match self.gateway.update(id, &patch, updated_at).await {
                Ok(row) => {
                    tracing::debug!("country updated");
                    self.update(|s| {
                        if let Some(op) = pending {
                            s.settle_pending(op);
                        }
                        if s.find(id).is_some() {
                            s.replace(id, row.clone());
                        }
                        s.finish_ok();
                    });
                    Ok(row)
                }
                Err(e) => {
                    if let Some(op) = pending {
                        self.update(|s| {
                            if let Some(op) = s.settle_pending(op) {
                                s.roll_back(op);
                            }
                        });
                    }
                    Err(self.fail("update country", e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::sample_countries;
    use crate::storage::{DisconnectedGateway, MemoryGateway};

    fn seeded() -> (Arc<MemoryGateway>, CountryStore) {
        let gateway = Arc::new(MemoryGateway::seeded(sample_countries()));
        let store = CountryStore::new(gateway.clone());
        (gateway, store)
    }

    fn chile() -> CountryDraft {
        CountryDraft::new("Chile", "Santiago", "South America", "🇨🇱")
    }

    fn assert_unique_ids(store: &CountryStore) {
        let countries = store.countries();
        let mut ids: Vec<&str> = countries.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), countries.len());
    }

    #[tokio::test]
    async fn fetch_replaces_countries_and_clears_loading() {
        let (_, store) = seeded();
        store.fetch_countries().await.unwrap();

        assert_eq!(store.countries().len(), 8);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_countries() {
        let (gateway, store) = seeded();
        store.fetch_countries().await.unwrap();
        gateway.fail_next("timeout");

        let err = store.fetch_countries().await.unwrap_err();
        assert_eq!(err.to_string(), "timeout");
        assert_eq!(store.countries().len(), 8);
        assert!(!store.is_loading());
        assert_eq!(store.error().as_deref(), Some("timeout"));
    }

    #[tokio::test]
    async fn successful_sequence_yields_expected_set() {
        let (_, store) = seeded();
        store.fetch_countries().await.unwrap();

        let added = store.add_country(chile()).await.unwrap();
        store.remove_country("2").await.unwrap();
        let updated = store
            .update_country("1", CountryPatch::new().capital("Nusantara"))
            .await
            .unwrap();

        let countries = store.countries();
        assert_eq!(countries.len(), 8);
        assert_eq!(countries.last().unwrap().id, added.id);
        assert!(countries.iter().all(|c| c.id != "2"));
        assert_eq!(store.read(|s| s.find("1").cloned()), Some(updated.clone()));
        assert_eq!(updated.name, "Indonesia");
        assert!(updated.updated_at.is_some());
        assert_unique_ids(&store);
    }

    #[tokio::test]
    async fn failed_remove_leaves_countries_and_sets_error() {
        let (gateway, store) = seeded();
        store.fetch_countries().await.unwrap();
        let before = store.countries();
        gateway.fail_next("permission denied for table countries");

        assert!(store.remove_country("3").await.is_err());
        assert_eq!(store.countries(), before);
        assert_eq!(store.error().as_deref(), Some("permission denied for table countries"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn failed_add_and_update_leave_state_untouched() {
        let (gateway, store) = seeded();
        store.fetch_countries().await.unwrap();
        let before = store.countries();

        gateway.fail_next("insert rejected");
        assert!(store.add_country(chile()).await.is_err());
        assert_eq!(store.countries(), before);

        gateway.fail_next("update rejected");
        assert!(store
            .update_country("1", CountryPatch::new().name("Nope"))
            .await
            .is_err());
        assert_eq!(store.countries(), before);
        assert_eq!(store.error().as_deref(), Some("update rejected"));
    }

    #[tokio::test]
    async fn next_action_clears_previous_error() {
        let (gateway, store) = seeded();
        gateway.fail_next("boom");
        let _ = store.fetch_countries().await;
        assert!(store.error().is_some());

        store.fetch_countries().await.unwrap();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn disconnected_gateway_reports_through_error_channel() {
        let store = CountryStore::new(Arc::new(DisconnectedGateway::new("no endpoint")))
            .with_state(StoreState::new(sample_countries()));

        assert!(store.remove_country("1").await.is_err());
        assert_eq!(store.countries().len(), 8);
        assert_eq!(store.error().as_deref(), Some("configuration error: no endpoint"));
    }

    #[tokio::test]
    async fn optimistic_add_swaps_temp_id_for_server_id() {
        let gateway = Arc::new(MemoryGateway::new());
        let store = CountryStore::with_policy(gateway, SyncPolicy::Optimistic);

        let row = store.add_country(chile()).await.unwrap();
        let countries = store.countries();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].id, row.id);
        assert!(!row.id.starts_with(pending::PENDING_ID_PREFIX));
        assert_eq!(store.read(StoreState::pending_count), 0);
    }

    #[tokio::test]
    async fn optimistic_failures_roll_back() {
        let gateway = Arc::new(MemoryGateway::seeded(sample_countries()));
        let store = CountryStore::with_policy(gateway.clone(), SyncPolicy::Optimistic);
        store.fetch_countries().await.unwrap();
        let before = store.countries();

        gateway.fail_next("insert rejected");
        assert!(store.add_country(chile()).await.is_err());
        assert_eq!(store.countries(), before);

        gateway.fail_next("delete rejected");
        assert!(store.remove_country("4").await.is_err());
        assert_eq!(store.countries(), before);

        gateway.fail_next("update rejected");
        assert!(store
            .update_country("5", CountryPatch::new().capital("Lyon"))
            .await
            .is_err());
        assert_eq!(store.countries(), before);

        assert_eq!(store.read(StoreState::pending_count), 0);
        assert_eq!(store.error().as_deref(), Some("update rejected"));
    }

    #[tokio::test]
    async fn concurrent_actions_all_apply() {
        let (_, store) = seeded();
        store.fetch_countries().await.unwrap();

        let (a, b, c) = tokio::join!(
            store.add_country(chile()),
            store.remove_country("8"),
            store.update_country("6", CountryPatch::new().capital("Brasilia")),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(store.countries().len(), 8);
        assert!(!store.is_loading());
        assert_unique_ids(&store);
    }

    #[test]
    fn select_returns_detail_params() {
        let store = CountryStore::new(Arc::new(MemoryGateway::new()))
            .with_state(StoreState::new(sample_countries()));

        let detail = store.select("3").unwrap();
        assert_eq!(detail.name, "Singapore");
        assert!(store.select("99").is_none());
    }
}
