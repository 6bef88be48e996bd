//! Integration tests for the favorites mutations and their invalidation.

mod common;

use common::{dao, Fixture, MockStore};
use daodash_core::{DaoKey, DaodashError, Network};
use daodash_service::{FavoritesService, MutationStatus, QueryKey};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_added_record_is_listed_and_resolvable() {
    let fixture = Fixture::with_daos(2);
    let listing = fixture.listing(0, None);
    let infinite = fixture.infinite(4);
    assert_eq!(listing.fetch().await.unwrap().len(), 2);
    assert_eq!(infinite.fetch().await.unwrap().len(), 2);

    let new_dao = dao(7);
    fixture.add().mutate(new_dao.clone()).await.expect("Add failed");

    assert!(fixture.client.is_stale(&listing.key()));
    assert!(fixture.client.is_stale(&infinite.key()));

    let listed = listing.fetch().await.unwrap();
    assert_eq!(listed.last(), Some(&new_dao));
    assert_eq!(infinite.fetch().await.unwrap().flatten().last(), Some(&new_dao));

    let found = fixture
        .lookup(Some(&new_dao.address), Some(Network::Ethereum))
        .fetch()
        .await
        .unwrap();
    assert_eq!(found, Some(new_dao));
}

#[tokio::test]
async fn test_add_invalidates_every_listing_skip() {
    let fixture = Fixture::with_daos(6);
    for skip in [0, 2, 4] {
        fixture.listing(skip, Some(2)).fetch().await.unwrap();
    }
    fixture.lookup(Some(&dao(0).address), Some(Network::Ethereum)).fetch().await.unwrap();

    fixture.add().mutate(dao(6)).await.unwrap();

    for skip in [0, 2, 4] {
        assert!(fixture.client.is_stale(&QueryKey::favorited_daos(skip, Some(2))));
    }
    let lookup = QueryKey::favorited_dao(dao(0).address, Some(Network::Ethereum));
    assert!(!fixture.client.is_stale(&lookup));
}

#[tokio::test]
async fn test_removed_record_leaves_every_listing() {
    let fixture = Fixture::with_daos(5);
    let target = dao(2);
    for skip in [0, 2] {
        fixture.listing(skip, None).fetch().await.unwrap();
    }
    fixture.infinite(4).fetch().await.unwrap();

    let removed = fixture.remove().mutate(&target).await.unwrap();
    assert!(removed);

    for skip in [0, 2] {
        let listed = fixture.listing(skip, None).fetch().await.unwrap();
        assert!(!listed.contains(&target), "skip {}", skip);
    }
    let pages = fixture.infinite(4).fetch().await.unwrap();
    assert!(!pages.flatten().contains(&target));
    assert_eq!(pages.len(), 4);
}

#[tokio::test]
async fn test_remove_missing_key_is_noop_success() {
    let fixture = Fixture::with_daos(1);
    let mutation = fixture.remove();

    let removed = mutation.mutate(DaoKey::new(1, "0xmissing")).await.unwrap();
    assert!(!removed);
    assert_eq!(mutation.state().status, MutationStatus::Success);
    assert_eq!(fixture.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_refreshes_lookup_and_keeps_position() {
    let fixture = Fixture::with_daos(3);
    let lookup = fixture.lookup(Some(&dao(1).address), Some(Network::Ethereum));
    lookup.fetch().await.unwrap();
    fixture.listing(0, None).fetch().await.unwrap();

    let mut renamed = dao(1).with_ens_domain("renamed.dao.eth");
    renamed.metadata.name = "Renamed".to_string();
    fixture.update().mutate(renamed.clone()).await.expect("Update failed");

    assert_eq!(lookup.fetch().await.unwrap(), Some(renamed.clone()));
    let listed = fixture.listing(0, None).fetch().await.unwrap();
    assert_eq!(listed[1], renamed);
}

#[tokio::test]
async fn test_update_of_missing_record_is_not_found() {
    let fixture = Fixture::with_daos(1);
    fixture.listing(0, None).fetch().await.unwrap();
    let mutation = fixture.update();

    let err = mutation.mutate(dao(9)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(mutation.state().status, MutationStatus::Error);
    assert!(!fixture.client.is_stale(&QueryKey::favorited_daos(0, None)));
    assert_eq!(fixture.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_add_is_conflict_without_side_effects() {
    let fixture = Fixture::with_daos(2);
    fixture.listing(0, None).fetch().await.unwrap();
    let called = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&called);
    let mutation = fixture
        .add()
        .with_on_success(move |_| flag.store(true, Ordering::SeqCst));

    let err = mutation.mutate(dao(0)).await.unwrap_err();

    assert_eq!(err.error_code(), "CONFLICT");
    assert!(!called.load(Ordering::SeqCst));
    assert!(!fixture.client.is_stale(&QueryKey::favorited_daos(0, None)));
    assert_eq!(fixture.store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_backend_failure_skips_invalidation_and_callback() {
    let mut store = MockStore::new();
    store.expect_list().returning(|_| Ok(vec![dao(0)]));
    store
        .expect_insert()
        .returning(|_| Err(DaodashError::storage("write failed")));
    store
        .expect_update()
        .returning(|_| Err(DaodashError::storage("write failed")));
    store
        .expect_delete()
        .returning(|_| Err(DaodashError::storage("write failed")));
    let fixture = Fixture::with_store(Arc::new(store));
    fixture.listing(0, None).fetch().await.unwrap();
    fixture.infinite(4).fetch().await.unwrap();

    let callbacks = Arc::new(AtomicUsize::new(0));
    let (c1, c2, c3) = (Arc::clone(&callbacks), Arc::clone(&callbacks), Arc::clone(&callbacks));
    let add = fixture.add().with_on_success(move |_| {
        c1.fetch_add(1, Ordering::SeqCst);
    });
    let update = fixture.update().with_on_success(move |_| {
        c2.fetch_add(1, Ordering::SeqCst);
    });
    let remove = fixture.remove().with_on_success(move |_| {
        c3.fetch_add(1, Ordering::SeqCst);
    });

    assert!(add.mutate(dao(1)).await.is_err());
    assert!(update.mutate(dao(0)).await.is_err());
    assert!(remove.mutate(&dao(0)).await.is_err());

    for state in [add.state(), update.state(), remove.state()] {
        assert_eq!(state.status, MutationStatus::Error);
        assert!(state.error.unwrap().contains("write failed"));
    }
    assert_eq!(callbacks.load(Ordering::SeqCst), 0);
    assert!(!fixture.client.is_stale(&QueryKey::favorited_daos(0, None)));
    assert!(!fixture.client.is_stale(&QueryKey::infinite_favorited_daos(4)));
}

#[tokio::test]
async fn test_callback_runs_after_invalidation() {
    let fixture = Fixture::with_daos(1);
    fixture.listing(0, None).fetch().await.unwrap();

    let client = Arc::clone(&fixture.client);
    let saw_stale = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&saw_stale);
    let mutation = fixture.add().with_on_success(move |_| {
        flag.store(client.is_stale(&QueryKey::favorited_daos(0, None)), Ordering::SeqCst);
    });

    mutation.mutate(dao(1)).await.unwrap();
    assert!(saw_stale.load(Ordering::SeqCst));
    assert!(mutation.state().is_success());
}

#[tokio::test]
async fn test_concurrent_adds_of_distinct_keys_both_persist() {
    let fixture = Fixture::with_daos(0);
    let service = fixture.service();

    let (a, b) = tokio::join!(service.add_favorite(dao(1)), service.add_favorite(dao(2)));
    a.unwrap();
    b.unwrap();

    let listed = service.favorited_daos(0, None).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&dao(1)));
    assert!(listed.contains(&dao(2)));
}

#[tokio::test]
async fn test_concurrent_updates_of_one_key_leave_one_value() {
    let fixture = Fixture::with_daos(1);
    let service = fixture.service();

    let mut first = dao(0);
    first.metadata.name = "First".to_string();
    let mut second = dao(0);
    second.metadata.name = "Second".to_string();

    let (a, b) = tokio::join!(
        service.update_favorite(first.clone()),
        service.update_favorite(second.clone())
    );
    a.unwrap();
    b.unwrap();

    let listed = service.favorited_daos(0, None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0] == first || listed[0] == second);
}

#[tokio::test]
async fn test_service_round_trip() {
    let fixture = Fixture::with_daos(9);
    let service = fixture.service();

    let data = service.infinite_favorited_daos(None).await.unwrap();
    let sizes: Vec<_> = data.pages.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 4, 1]);

    let limited = service.infinite_favorited_daos(Some(2)).await.unwrap();
    assert_eq!(limited.pages.len(), 3);

    service.remove_favorite(dao(0).key()).await.unwrap();
    assert!(!service.is_favorited(&dao(0).address, Network::Ethereum).await.unwrap());
    assert_eq!(service.favorites_count().await.unwrap(), 8);

    let data = service.infinite_favorited_daos(None).await.unwrap();
    let sizes: Vec<_> = data.pages.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 4, 0]);
}
