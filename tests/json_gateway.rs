//! JSON file backend persistence.

use countrydeck::storage::{JsonGateway, RecordGateway};
use countrydeck::{initialize, Backend, Config, CountryDeckError, CountryDraft, CountryPatch};
use tempfile::TempDir;

fn draft(name: &str, capital: &str) -> CountryDraft {
    CountryDraft::new(name, capital, "Europe", "🏳")
}

#[tokio::test]
async fn rows_survive_reopen_in_insert_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("countries.json");

    let gateway = JsonGateway::open(path.clone()).unwrap();
    let spain = gateway.insert(&draft("Spain", "Madrid")).await.unwrap();
    let italy = gateway.insert(&draft("Italy", "Rome")).await.unwrap();
    gateway
        .update(&spain.id, &CountryPatch::new().capital("Barcelona"), chrono::Utc::now())
        .await
        .unwrap();
    drop(gateway);

    let reopened = JsonGateway::open(path).unwrap();
    let rows = reopened.select_all().await.unwrap();
    let names: Vec<&str> = rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Spain", "Italy"]);
    assert_eq!(rows[0].capital, "Barcelona");
    assert!(rows[0].updated_at.is_some());
    assert_eq!(rows[1].id, italy.id);
}

#[tokio::test]
async fn delete_persists_and_missing_id_is_ok() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("countries.json");

    let gateway = JsonGateway::open(path.clone()).unwrap();
    let row = gateway.insert(&draft("Portugal", "Lisbon")).await.unwrap();
    gateway.delete(&row.id).await.unwrap();
    gateway.delete(&row.id).await.unwrap();

    let reopened = JsonGateway::open(path).unwrap();
    assert!(reopened.select_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_update_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("countries.json");

    let gateway = JsonGateway::open(path.clone()).unwrap();
    gateway.insert(&draft("Greece", "Athens")).await.unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = gateway
        .update("missing", &CountryPatch::new().name("x"), chrono::Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, CountryDeckError::NotFound(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("countries.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonGateway::open(path).unwrap_err();
    assert!(matches!(err, CountryDeckError::Storage(_)));
}

#[tokio::test]
async fn file_backend_store_from_config() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        backend: Backend::File,
        data_file: Some(dir.path().join("countries.json")),
        ..Default::default()
    };

    let store = initialize(&config).unwrap();
    store.fetch_countries().await.unwrap();
    store.add_country(draft("Austria", "Vienna")).await.unwrap();

    let second = initialize(&config).unwrap();
    second.fetch_countries().await.unwrap();
    assert_eq!(second.countries().len(), 1);
    assert_eq!(second.countries()[0].capital, "Vienna");
}
