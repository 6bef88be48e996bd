//! Integration tests for the SQLite and in-memory favorites stores.

mod common;

use common::{test_dao, TestDatabase};
use daodash_core::{DaoKey, DaoPlugin, OffsetRequest};
use daodash_repository::{FavoritedDaoStore, InMemoryFavoritedDaoStore, SqliteFavoritedDaoStore};
use std::sync::Arc;

#[tokio::test]
async fn test_insert_and_get() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    let mut dao = test_dao(137, "0xabc")
        .with_avatar("ipfs://QmAvatar")
        .with_ens_domain("poly.dao.eth");
    dao.plugins.push(DaoPlugin {
        id: "token-voting.plugin.dao.eth".to_string(),
        instance_address: "0xplugin".to_string(),
    });
    store.insert(&dao).await.expect("Failed to insert favorite");

    let found = store
        .get(&DaoKey::new(137, "0xabc"))
        .await
        .expect("Query failed")
        .expect("Favorite not found");

    assert_eq!(found, dao);
}

#[tokio::test]
async fn test_get_unknown_key_is_none() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    store.insert(&test_dao(1, "0xabc")).await.unwrap();

    let result = store.get(&DaoKey::new(5, "0xabc")).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_insert_duplicate_is_conflict() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    store.insert(&test_dao(1, "0xabc")).await.unwrap();
    let err = store.insert(&test_dao(1, "0xabc")).await.unwrap_err();

    assert_eq!(err.error_code(), "CONFLICT");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_follows_insertion_order() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    for i in 0..9 {
        store.insert(&test_dao(1, &format!("0x{}", i))).await.unwrap();
    }

    let page = store.list(OffsetRequest::new(4, Some(4))).await.unwrap();
    let addresses: Vec<_> = page.iter().map(|d| d.address.as_str()).collect();
    assert_eq!(addresses, vec!["0x4", "0x5", "0x6", "0x7"]);

    let tail = store.list(OffsetRequest::new(8, Some(4))).await.unwrap();
    assert_eq!(tail.len(), 1);

    let all = store.list(OffsetRequest::all()).await.unwrap();
    assert_eq!(all.len(), 9);

    let beyond = store.list(OffsetRequest::new(20, None)).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_update_keeps_position() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    for address in ["0xa", "0xb", "0xc"] {
        store.insert(&test_dao(1, address)).await.unwrap();
    }

    let mut renamed = test_dao(1, "0xb");
    renamed.metadata.name = "Renamed".to_string();
    store.update(&renamed).await.expect("Failed to update favorite");

    let all = store.list(OffsetRequest::all()).await.unwrap();
    let names: Vec<_> = all.iter().map(|d| d.metadata.name.as_str()).collect();
    assert_eq!(names, vec!["DAO 0xa", "Renamed", "DAO 0xc"]);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    let err = store.update(&test_dao(1, "0xmissing")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete() {
    let db = TestDatabase::new().await;
    let store = SqliteFavoritedDaoStore::new(db.pool());

    store.insert(&test_dao(1, "0xa")).await.unwrap();
    store.insert(&test_dao(1, "0xb")).await.unwrap();

    assert!(store.delete(&DaoKey::new(1, "0xa")).await.unwrap());
    assert!(!store.delete(&DaoKey::new(1, "0xa")).await.unwrap());

    let remaining = store.list(OffsetRequest::all()).await.unwrap();
    assert_eq!(remaining, vec![test_dao(1, "0xb")]);
}

#[tokio::test]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}

async fn concurrent_distinct_inserts(store: Arc<dyn FavoritedDaoStore>) {
    let dao_a = test_dao(1, "0xa");
    let dao_b = test_dao(1, "0xb");
    let (a, b) = futures::join!(store.insert(&dao_a), store.insert(&dao_b),);
    a.unwrap();
    b.unwrap();

    let all = store.list(OffsetRequest::all()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|d| d.address == "0xa"));
    assert!(all.iter().any(|d| d.address == "0xb"));
}

async fn concurrent_same_key_updates(store: Arc<dyn FavoritedDaoStore>) {
    store.insert(&test_dao(1, "0xa")).await.unwrap();

    let mut first = test_dao(1, "0xa");
    first.metadata.name = "First".to_string();
    let mut second = test_dao(1, "0xa");
    second.metadata.name = "Second".to_string();

    let (a, b) = futures::join!(store.update(&first), store.update(&second));
    a.unwrap();
    b.unwrap();

    let all = store.list(OffsetRequest::all()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].metadata.name == "First" || all[0].metadata.name == "Second");
}

#[tokio::test]
async fn test_concurrent_distinct_inserts_sqlite() {
    let db = TestDatabase::new().await;
    concurrent_distinct_inserts(Arc::new(SqliteFavoritedDaoStore::new(db.pool()))).await;
}

#[tokio::test]
async fn test_concurrent_distinct_inserts_memory() {
    concurrent_distinct_inserts(Arc::new(InMemoryFavoritedDaoStore::new())).await;
}

#[tokio::test]
async fn test_concurrent_same_key_updates_sqlite() {
    let db = TestDatabase::new().await;
    concurrent_same_key_updates(Arc::new(SqliteFavoritedDaoStore::new(db.pool()))).await;
}

#[tokio::test]
async fn test_concurrent_same_key_updates_memory() {
    concurrent_same_key_updates(Arc::new(InMemoryFavoritedDaoStore::new())).await;
}
