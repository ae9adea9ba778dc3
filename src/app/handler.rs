//! Event handling for the list screen.
//!
//! This module turns UI intents into store calls and collects the side
//! effects the shell must run afterwards.
//!
//! # Architecture
//!
//! 1. The shell translates user input into an [`Event`]
//! 2. [`handle_event`] pattern-matches the event and calls the store
//! 3. The store mutates its state (and awaits the gateway for data events)
//! 4. Actions are collected and returned with a "needs render" flag
//!
//! # Event Types
//!
//! - **View**: `SetSearchText`, `SetToggle`
//! - **Navigation**: `Select`, `Close`
//! - **Data**: `Refresh`, `Add`, `Remove`, `Update`
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::{handle_event, CountryStore, Event, StoreState, Toggle};
//! use countrydeck::domain::sample::sample_countries;
//! use countrydeck::storage::MemoryGateway;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = CountryStore::new(Arc::new(MemoryGateway::new()))
//!     .with_state(StoreState::new(sample_countries()));
//! let (render, actions) = handle_event(&store, Event::SetToggle(Toggle::Continent)).await?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), countrydeck::CountryDeckError>(())
//! # }).unwrap();
//! ```

use crate::app::{Action, CountryStore, Toggle};
use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{CountryDraft, CountryPatch};

/// UI intents for the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Replaces the search text.
    SetSearchText(String),
    /// Switches between list and continent view.
    SetToggle(Toggle),
    /// Opens the detail screen for the record with this id.
    Select(String),
    /// Leaves the list screen.
    Close,

    /// Reloads every record from the remote store.
    Refresh,
    /// Creates a record.
    Add(CountryDraft),
    /// Deletes the record with this id.
    Remove(String),
    /// Patches the record with `id`.
    Update {
        id: String,
        patch: CountryPatch,
    },
}

/// Processes an event against the store and returns actions to execute.
///
/// The boolean is `true` when the list screen should be re-rendered.
///
/// Data events never fail here: a failed remote call is already recorded in
/// the store's `error` field and comes back as [`Action::ShowError`].
///
/// # Errors
///
/// Returns [`CountryDeckError::NotFound`] when `Select` names an id the store
/// does not hold.
pub async fn handle_event(store: &CountryStore, event: Event) -> Result<(bool, Vec<Action>)> {
    tracing::debug!(event_type = ?event, "handle_event");

    match event {
        Event::SetSearchText(text) => {
            store.set_search_text(text);
            Ok((true, vec![]))
        }
        Event::SetToggle(toggle) => {
            if store.read(|s| s.toggle()) == toggle {
                return Ok((false, vec![]));
            }
            store.set_toggle(toggle);
            Ok((true, vec![]))
        }
        Event::Select(id) => {
            let Some(detail) = store.select(&id) else {
                tracing::debug!(id = %id, "selected id not in store");
                return Err(CountryDeckError::NotFound(id));
            };
            tracing::debug!(id = %detail.id, name = %detail.name, "opening detail");
            Ok((false, vec![Action::OpenDetail(detail)]))
        }
        Event::Close => Ok((false, vec![Action::Close])),
        Event::Refresh => Ok(settle(store.fetch_countries().await)),
        Event::Add(draft) => Ok(settle(store.add_country(draft).await)),
        Event::Remove(id) => Ok(settle(store.remove_country(&id).await)),
        Event::Update { id, patch } => {
            if patch.is_empty() {
                tracing::debug!(id = %id, "empty patch ignored");
                return Ok((false, vec![]));
            }
            Ok(settle(store.update_country(&id, patch).await))
        }
    }
}

fn settle<T>(result: Result<T>) -> (bool, Vec<Action>) {
    match result {
        Ok(_) => (true, vec![]),
        Err(e) => (true, vec![Action::ShowError(e.to_string())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StoreState;
    use crate::domain::sample::sample_countries;
    use crate::storage::MemoryGateway;
    use std::sync::Arc;

    fn store() -> (Arc<MemoryGateway>, CountryStore) {
        let gateway = Arc::new(MemoryGateway::seeded(sample_countries()));
        let store = CountryStore::new(gateway.clone()).with_state(StoreState::new(sample_countries()));
        (gateway, store)
    }

    #[tokio::test]
    async fn select_opens_detail_with_record_fields() {
        let (_, store) = store();
        let (render, actions) = handle_event(&store, Event::Select("3".into())).await.unwrap();

        assert!(!render);
        match actions.as_slice() {
            [Action::OpenDetail(detail)] => {
                assert_eq!(detail.name, "Singapore");
                assert_eq!(detail.continent, "Asia");
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[tokio::test]
    async fn select_unknown_id_is_not_found() {
        let (_, store) = store();
        let err = handle_event(&store, Event::Select("nope".into())).await.unwrap_err();
        assert!(matches!(err, CountryDeckError::NotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn failed_remove_surfaces_error_action() {
        let (gateway, store) = store();
        gateway.fail_next("row is locked");

        let (render, actions) = handle_event(&store, Event::Remove("1".into())).await.unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::ShowError("row is locked".to_string())]);
        assert_eq!(store.countries().len(), 8);
    }

    #[tokio::test]
    async fn repeated_toggle_skips_render() {
        let (_, store) = store();
        let (render, _) = handle_event(&store, Event::SetToggle(Toggle::List)).await.unwrap();
        assert!(!render);

        let (render, _) = handle_event(&store, Event::SetToggle(Toggle::Continent)).await.unwrap();
        assert!(render);
        assert_eq!(store.read(StoreState::toggle), Toggle::Continent);
    }

    #[tokio::test]
    async fn empty_patch_makes_no_remote_call() {
        let (gateway, store) = store();
        let before = gateway.calls();

        handle_event(
            &store,
            Event::Update {
                id: "1".into(),
                patch: CountryPatch::new(),
            },
        )
        .await
        .unwrap();
        assert_eq!(gateway.calls(), before);
    }
}
