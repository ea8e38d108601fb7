// tests/history_store_tests.rs

use std::sync::Arc;

use practice_server::{
    error::AppError,
    models::user::ExternalProfile,
    store::{HistoryStore, Stores, file::FileStore, sql::SqlStore},
};
use serde_json::json;
use tempfile::TempDir;

fn profile(sub: &str) -> ExternalProfile {
    ExternalProfile {
        sub: sub.to_string(),
        email: format!("{}@example.com", sub),
        name: None,
        picture: Some("https://example.com/avatar.png".to_string()),
    }
}

async fn file_stores() -> (Stores, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("history.json"), dir.path().join("users.json"))
        .await
        .unwrap();
    (Stores::shared(Arc::new(store)), dir)
}

async fn sql_stores() -> Stores {
    let store = SqlStore::connect("sqlite::memory:").await.unwrap();
    Stores::shared(Arc::new(store))
}

async fn check_round_trip(stores: &Stores) {
    let id = stores.history.append(json!({"foo": "bar"}), None).await.unwrap();

    let session = stores.history.get(id, None).await.unwrap().unwrap();
    assert_eq!(session.id, id);
    assert_eq!(session.owner_id, None);
    assert_eq!(session.payload, json!({"foo": "bar", "id": id.to_string()}));

    assert!(stores.history.get(uuid::Uuid::new_v4(), None).await.unwrap().is_none());
}

async fn check_newest_first(stores: &Stores) {
    for n in 0..5 {
        stores.history.append(json!({"n": n}), None).await.unwrap();
    }

    let sessions = stores.history.list(None).await.unwrap();
    let order: Vec<i64> = sessions.iter().map(|s| s.payload["n"].as_i64().unwrap()).collect();
    assert_eq!(order, [4, 3, 2, 1, 0]);
    assert!(sessions.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

async fn check_partitions(stores: &Stores) {
    let alice = stores.identities.resolve(&profile("alice")).await.unwrap();
    let bob = stores.identities.resolve(&profile("bob")).await.unwrap();
    assert_ne!(alice.id, bob.id);

    let anon = stores.history.append(json!({"who": "anon"}), None).await.unwrap();
    let owned = stores
        .history
        .append(json!({"who": "alice"}), Some(alice.id))
        .await
        .unwrap();

    let listed = stores.history.list(Some(alice.id)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, owned);

    assert!(stores.history.list(Some(bob.id)).await.unwrap().is_empty());
    assert!(stores.history.list(None).await.unwrap().iter().all(|s| s.owner_id.is_none()));

    assert!(stores.history.get(owned, Some(alice.id)).await.unwrap().is_some());
    assert!(stores.history.get(owned, Some(bob.id)).await.unwrap().is_none());
    assert!(stores.history.get(owned, None).await.unwrap().is_none());
    assert!(stores.history.get(anon, Some(alice.id)).await.unwrap().is_none());
}

async fn check_identities(stores: &Stores) {
    let first = stores.identities.resolve(&profile("carol")).await.unwrap();
    let again = stores.identities.resolve(&profile("carol")).await.unwrap();
    assert_eq!(first, again);
    assert_eq!(first.email, "carol@example.com");

    assert_eq!(stores.identities.find(first.id).await.unwrap(), Some(first));
    assert!(stores.identities.find(9_999).await.unwrap().is_none());

    let mut bad = profile("dave");
    bad.email = "not-an-email".to_string();
    assert!(matches!(
        stores.identities.resolve(&bad).await,
        Err(AppError::BadRequest(_))
    ));
}

async fn check_owner_without_user_row(stores: &Stores) {
    assert!(stores.identities.find(42).await.unwrap().is_none());

    let id = stores.history.append(json!({"x": 1}), Some(42)).await.unwrap();

    let listed = stores.history.list(Some(42)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert!(stores.history.list(None).await.unwrap().is_empty());
}

async fn check_rejects_non_objects(stores: &Stores) {
    assert!(matches!(
        stores.history.append(json!("just text"), None).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(stores.history.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn file_round_trip() {
    let (stores, _dir) = file_stores().await;
    check_round_trip(&stores).await;
}

#[tokio::test]
async fn sql_round_trip() {
    check_round_trip(&sql_stores().await).await;
}

#[tokio::test]
async fn file_lists_newest_first() {
    let (stores, _dir) = file_stores().await;
    check_newest_first(&stores).await;
}

#[tokio::test]
async fn sql_lists_newest_first() {
    check_newest_first(&sql_stores().await).await;
}

#[tokio::test]
async fn file_partitions_by_owner() {
    let (stores, _dir) = file_stores().await;
    check_partitions(&stores).await;
}

#[tokio::test]
async fn sql_partitions_by_owner() {
    check_partitions(&sql_stores().await).await;
}

#[tokio::test]
async fn file_identities_are_stable() {
    let (stores, _dir) = file_stores().await;
    check_identities(&stores).await;
}

#[tokio::test]
async fn sql_identities_are_stable() {
    check_identities(&sql_stores().await).await;
}

#[tokio::test]
async fn file_owner_needs_no_user_row() {
    let (stores, _dir) = file_stores().await;
    check_owner_without_user_row(&stores).await;
}

#[tokio::test]
async fn sql_owner_needs_no_user_row() {
    check_owner_without_user_row(&sql_stores().await).await;
}

#[tokio::test]
async fn file_rejects_non_objects() {
    let (stores, _dir) = file_stores().await;
    check_rejects_non_objects(&stores).await;
}

#[tokio::test]
async fn sql_rejects_non_objects() {
    check_rejects_non_objects(&sql_stores().await).await;
}

#[tokio::test]
async fn file_history_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.json");
    let users = dir.path().join("users.json");

    let id = {
        let store = FileStore::open(&history, &users).await.unwrap();
        store.append(json!({"kept": true}), None).await.unwrap()
    };

    let reopened = Stores::shared(Arc::new(FileStore::open(&history, &users).await.unwrap()));
    let session = reopened.history.get(id, None).await.unwrap().unwrap();
    assert_eq!(session.payload["kept"], true);
}

#[tokio::test]
async fn concurrent_appends_are_all_kept() {
    let (stores, _dir) = file_stores().await;

    let handles: Vec<_> = (0..20)
        .map(|n| {
            let history = stores.history.clone();
            tokio::spawn(async move { history.append(json!({"n": n}), None).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(stores.history.list(None).await.unwrap().len(), 20);
}
