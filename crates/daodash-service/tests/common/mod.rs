//! Shared fixtures for the cache-layer integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use daodash_core::{DaoKey, DaodashResult, FavoritedDao, Network, OffsetRequest, PageRequest};
use daodash_repository::{FavoritedDaoStore, InMemoryFavoritedDaoStore};
use daodash_service::{
    AddFavoriteDaoMutation, AvatarResolver, FavoritedDaoQuery, FavoritedDaosQuery,
    FavoritesServiceImpl, InfiniteFavoritedDaosQuery, IpfsAvatarResolver, QueryClient,
    RemoveFavoriteDaoMutation, UpdateFavoritedDaoMutation,
};
use mockall::mock;
use std::sync::Arc;

pub const CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

mock! {
    pub Store {}

    #[async_trait]
    impl FavoritedDaoStore for Store {
        async fn get(&self, key: &DaoKey) -> DaodashResult<Option<FavoritedDao>>;
        async fn list(&self, request: OffsetRequest) -> DaodashResult<Vec<FavoritedDao>>;
        async fn insert(&self, dao: &FavoritedDao) -> DaodashResult<()>;
        async fn update(&self, dao: &FavoritedDao) -> DaodashResult<()>;
        async fn delete(&self, key: &DaoKey) -> DaodashResult<bool>;
        async fn count(&self) -> DaodashResult<u64>;
    }
}

/// The `i`-th test DAO on Ethereum mainnet.
pub fn dao(i: usize) -> FavoritedDao {
    FavoritedDao::new(
        Network::Ethereum.chain_id(),
        format!("0x{:040x}", i),
        format!("DAO {}", i),
    )
}

/// Query client, backend and resolver shared by the queries under test.
pub struct Fixture {
    pub client: Arc<QueryClient>,
    pub store: Arc<dyn FavoritedDaoStore>,
    pub resolver: Arc<dyn AvatarResolver>,
}

impl Fixture {
    /// In-memory backend seeded with `dao(0)..dao(n)`.
    pub fn with_daos(n: usize) -> Self {
        let daos = (0..n).map(dao).collect();
        Self::with_store(Arc::new(InMemoryFavoritedDaoStore::with_daos(daos)))
    }

    pub fn with_store(store: Arc<dyn FavoritedDaoStore>) -> Self {
        Self {
            client: Arc::new(QueryClient::default()),
            store,
            resolver: Arc::new(IpfsAvatarResolver::new("https://ipfs.io", "https://testnet.ipfs.io")),
        }
    }

    pub fn lookup(&self, address: Option<&str>, network: Option<Network>) -> FavoritedDaoQuery {
        FavoritedDaoQuery::new(
            Arc::clone(&self.client),
            Arc::clone(&self.store),
            address.map(str::to_string),
            network,
        )
    }

    pub fn listing(&self, skip: usize, limit: Option<usize>) -> FavoritedDaosQuery {
        FavoritedDaosQuery::new(
            Arc::clone(&self.client),
            Arc::clone(&self.store),
            Arc::clone(&self.resolver),
        )
        .skip(skip)
        .limit(limit)
    }

    pub fn infinite(&self, limit: usize) -> InfiniteFavoritedDaosQuery {
        InfiniteFavoritedDaosQuery::new(
            Arc::clone(&self.client),
            Arc::clone(&self.store),
            Arc::clone(&self.resolver),
        )
        .limit(limit)
    }

    pub fn add(&self) -> AddFavoriteDaoMutation {
        AddFavoriteDaoMutation::new(Arc::clone(&self.client), Arc::clone(&self.store))
    }

    pub fn remove(&self) -> RemoveFavoriteDaoMutation {
        RemoveFavoriteDaoMutation::new(Arc::clone(&self.client), Arc::clone(&self.store))
    }

    pub fn update(&self) -> UpdateFavoritedDaoMutation {
        UpdateFavoritedDaoMutation::new(Arc::clone(&self.client), Arc::clone(&self.store))
    }

    pub fn service(&self) -> FavoritesServiceImpl {
        FavoritesServiceImpl::new(
            Arc::clone(&self.store),
            Arc::clone(&self.resolver),
            Arc::clone(&self.client),
            PageRequest::DEFAULT_SIZE,
        )
    }
}
