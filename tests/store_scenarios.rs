//! End-to-end store behavior through the event handler.

use countrydeck::domain::sample::sample_countries;
use countrydeck::storage::MemoryGateway;
use countrydeck::ui::{render, render_detail};
use countrydeck::{
    handle_event, Action, CountryDraft, CountryPatch, CountryStore, Event, StoreState, SyncPolicy, Toggle,
};
use std::sync::Arc;

async fn loaded(policy: SyncPolicy) -> (Arc<MemoryGateway>, CountryStore) {
    let gateway = Arc::new(MemoryGateway::seeded(sample_countries()));
    let store = CountryStore::with_policy(gateway.clone(), policy);
    let (render, actions) = handle_event(&store, Event::Refresh).await.unwrap();
    assert!(render);
    assert!(actions.is_empty());
    (gateway, store)
}

#[tokio::test]
async fn browse_search_and_open_detail() {
    let (_, store) = loaded(SyncPolicy::ConfirmThenApply).await;

    handle_event(&store, Event::SetToggle(Toggle::Continent)).await.unwrap();
    let groups: Vec<String> = store.read(|s| s.grouped().iter().map(|g| g.continent.to_string()).collect());
    assert_eq!(groups, vec!["Asia", "Europe", "South America", "North America", "Oceania"]);

    handle_event(&store, Event::SetToggle(Toggle::List)).await.unwrap();
    handle_event(&store, Event::SetSearchText("SINGAPORE".into())).await.unwrap();
    let text = render(&store.viewmodel());
    assert!(text.contains("By List (1)"));
    assert!(text.contains("[Singapore]"));

    let (_, actions) = handle_event(&store, Event::Select("3".into())).await.unwrap();
    let [Action::OpenDetail(detail)] = actions.as_slice() else {
        panic!("expected detail navigation, got {actions:?}");
    };
    let params = detail.to_params();
    assert_eq!(params.get("capital").map(String::as_str), Some("Singapore"));
    assert!(render_detail(detail).contains("Continent: Asia"));
}

#[tokio::test]
async fn confirmed_add_matches_gateway_rows() {
    let (gateway, store) = loaded(SyncPolicy::ConfirmThenApply).await;

    handle_event(
        &store,
        Event::Add(CountryDraft::new("Kenya", "Nairobi", "Africa", "🇰🇪")),
    )
    .await
    .unwrap();

    let local = store.countries();
    assert_eq!(local.len(), 9);
    assert_eq!(local, gateway.rows());
    assert_eq!(store.read(|s| s.grouped().last().map(|g| g.continent.to_string())), Some("Africa".into()));
}

#[tokio::test]
async fn optimistic_update_reconciles_with_server_row() {
    let (gateway, store) = loaded(SyncPolicy::Optimistic).await;

    handle_event(
        &store,
        Event::Update {
            id: "7".into(),
            patch: CountryPatch::new().name("USA"),
        },
    )
    .await
    .unwrap();

    let row = store.read(|s| s.find("7").cloned()).unwrap();
    assert_eq!(row.name, "USA");
    assert_eq!(Some(row), gateway.rows().into_iter().find(|c| c.id == "7"));
    assert_eq!(store.read(StoreState::pending_count), 0);
}

#[tokio::test]
async fn rejection_is_reported_and_recovers_on_next_action() {
    let (gateway, store) = loaded(SyncPolicy::ConfirmThenApply).await;
    gateway.fail_next("JWT expired");

    let (_, actions) = handle_event(&store, Event::Remove("1".into())).await.unwrap();
    assert_eq!(actions, vec![Action::ShowError("JWT expired".into())]);
    assert!(render(&store.viewmodel()).contains("Error: JWT expired"));
    assert!(store.read(|s| s.find("1").is_some()));

    handle_event(&store, Event::Remove("1".into())).await.unwrap();
    assert!(store.error().is_none());
    assert!(store.read(|s| s.find("1").is_none()));
}
